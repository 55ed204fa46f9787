use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, http::header};
use std::io::ErrorKind;

use super::FileService;
use crate::errors::CourseHubError;
use crate::models::{ApiResponse, ErrorCode};

pub async fn handle_download(
    service: &FileService,
    request: &HttpRequest,
    file_token: String,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let db_file = match storage.get_file_by_token(&file_token).await {
        Ok(Some(file)) => file,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::FileNotFound,
                "File not found",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("File query failed: {e}"),
                )),
            );
        }
    };

    // 记录还在但磁盘文件没了，按 404 处理而不是 500
    let body = match tokio::fs::read(super::stored_path(&db_file.download_token)).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Ok(HttpResponse::NotFound()
                .json(ApiResponse::error_empty(ErrorCode::NotFound, "文件不存在")));
        }
        Err(e) => {
            tracing::error!("{}", CourseHubError::file_operation(format!("{e}")));
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "File read failed",
                )),
            );
        }
    };

    let content_type = if db_file.file_type.is_empty() {
        "application/octet-stream".to_string()
    } else {
        db_file.file_type
    };
    // 文件名里的引号会破坏 Content-Disposition，直接去掉
    let attachment_name = db_file.file_name.replace('"', "");

    Ok(HttpResponse::Ok()
        .insert_header((header::CONTENT_TYPE, content_type))
        .insert_header((
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{attachment_name}\""),
        ))
        .body(body))
}
