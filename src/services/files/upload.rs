use actix_multipart::{Field, Multipart};
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use futures_util::TryStreamExt;
use futures_util::stream::StreamExt;
use std::fs;
use std::io::Write;
use std::path::Path;
use uuid::Uuid;

use super::FileService;
use crate::config::AppConfig;
use crate::errors::CourseHubError;
use crate::middlewares::RequireJWT;
use crate::models::ErrorCode;
use crate::models::{ApiResponse, files::responses::FileUploadResponse};
use crate::utils::validate_magic_bytes;

/// 已落盘、等待入库的上传文件
struct ReceivedFile {
    download_token: String,
    original_name: String,
    content_type: String,
    size: i64,
}

/// 接收文件字段失败的两类结果：请求不合法（400）与磁盘或传输错误（500）
enum UploadRejection {
    Refused(ErrorCode, String),
    Io(String),
}

pub async fn handle_upload(
    service: &FileService,
    req: &HttpRequest,
    mut payload: Multipart,
) -> ActixResult<HttpResponse> {
    // 先确认登录用户，再碰磁盘
    let Some(user_id) = RequireJWT::extract_user_id(req) else {
        return Ok(
            HttpResponse::Unauthorized().json(ApiResponse::<()>::error_empty(
                ErrorCode::Unauthorized,
                "用户未登录",
            )),
        );
    };

    let config = AppConfig::get();
    if let Err(e) = fs::create_dir_all(&config.upload.dir) {
        tracing::error!("{}", CourseHubError::file_operation(format!("{e}")));
        return Ok(
            HttpResponse::InternalServerError().json(ApiResponse::<()>::error_empty(
                ErrorCode::FileUploadFailed,
                "创建上传目录失败",
            )),
        );
    }

    let mut received: Option<ReceivedFile> = None;
    while let Ok(Some(field)) = payload.try_next().await {
        let is_file_field = field
            .content_disposition()
            .and_then(|cd| cd.get_name())
            .is_some_and(|name| name == "file");
        if !is_file_field {
            continue;
        }

        // 第二个文件字段出现时丢掉已写入的半成品并整体拒绝
        if let Some(first) = received.take() {
            let _ = fs::remove_file(super::stored_path(&first.download_token));
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::MultifileUploadNotAllowed,
                "Only one file can be uploaded at a time",
            )));
        }

        match receive_file(field, config.upload.max_size, &config.upload.allowed_types).await {
            Ok(file) => received = Some(file),
            Err(UploadRejection::Refused(code, message)) => {
                return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(code, message)));
            }
            Err(UploadRejection::Io(detail)) => {
                tracing::error!("{}", CourseHubError::file_operation(detail));
                return Ok(HttpResponse::InternalServerError().json(
                    ApiResponse::<()>::error_empty(ErrorCode::FileUploadFailed, "文件写入失败"),
                ));
            }
        }
    }

    let Some(file) = received else {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::FileNotFound,
            "No file found in upload payload",
        )));
    };

    let storage = service.get_storage(req);
    match storage
        .upload_file(
            &file.download_token,
            &file.original_name,
            file.size,
            &file.content_type,
            user_id,
        )
        .await
    {
        Ok(db_file) => {
            let response = FileUploadResponse {
                download_token: db_file.download_token,
                file_name: db_file.file_name,
                size: db_file.file_size,
                content_type: db_file.file_type,
                uploaded_at: db_file.uploaded_at,
            };
            Ok(HttpResponse::Ok()
                .json(ApiResponse::success(response, "File uploaded successfully")))
        }
        Err(e) => {
            // 入库失败时磁盘文件一并清掉，避免孤儿文件
            let _ = fs::remove_file(super::stored_path(&file.download_token));
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::FileUploadFailed,
                    format!("Failed to upload file: {e}"),
                )),
            )
        }
    }
}

/// 把一个 multipart 文件字段写入上传目录，边写边校验类型与大小。
/// 任何一步失败都会清掉已写入的部分文件。
async fn receive_file(
    mut field: Field,
    max_size: usize,
    allowed_types: &[String],
) -> Result<ReceivedFile, UploadRejection> {
    let original_name = field
        .content_disposition()
        .and_then(|cd| cd.get_filename())
        .map(|s| s.to_string())
        .unwrap_or_default();

    let extension = Path::new(&original_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
        .unwrap_or_default();

    // 白名单按无点小写形式比较，配置写 "pdf" 或 ".pdf" 都认
    let allowed = allowed_types
        .iter()
        .any(|t| t.trim_start_matches('.').to_lowercase() == extension);
    if extension.is_empty() || !allowed {
        return Err(UploadRejection::Refused(
            ErrorCode::FileTypeNotAllowed,
            "File type not allowed".to_string(),
        ));
    }

    // MIME 类型只存档，不参与校验
    let content_type = field
        .content_type()
        .map(|ct| ct.to_string())
        .unwrap_or_default();

    // 下载令牌同时决定磁盘文件名
    let download_token = Uuid::new_v4().to_string();
    let file_path = super::stored_path(&download_token);
    let mut sink = fs::File::create(&file_path).map_err(|e| UploadRejection::Io(e.to_string()))?;

    let dotted_extension = format!(".{extension}");
    let mut size: usize = 0;
    let mut first_chunk = true;
    while let Some(chunk) = field.next().await {
        let data = match chunk {
            Ok(data) => data,
            Err(e) => {
                let _ = fs::remove_file(&file_path);
                return Err(UploadRejection::Io(e.to_string()));
            }
        };

        // 首个分块校验魔术字节，内容与扩展名不符直接拒绝
        if first_chunk {
            first_chunk = false;
            if !validate_magic_bytes(&data, &dotted_extension) {
                let _ = fs::remove_file(&file_path);
                return Err(UploadRejection::Refused(
                    ErrorCode::FileTypeNotAllowed,
                    "文件内容与扩展名不匹配".to_string(),
                ));
            }
        }

        size += data.len();
        if size > max_size {
            let _ = fs::remove_file(&file_path);
            return Err(UploadRejection::Refused(
                ErrorCode::FileSizeExceeded,
                "File size exceeds the limit".to_string(),
            ));
        }

        if let Err(e) = sink.write_all(&data) {
            let _ = fs::remove_file(&file_path);
            return Err(UploadRejection::Io(e.to_string()));
        }
    }

    Ok(ReceivedFile {
        download_token,
        original_name,
        content_type,
        size: size as i64,
    })
}
