use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::MaterialService;
use crate::models::materials::requests::CreateMaterialRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::policy::{self, Action};
use crate::services::{deny_response, extract_principal};

pub async fn create_material(
    service: &MaterialService,
    request: &HttpRequest,
    material_data: CreateMaterialRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let principal = match extract_principal(request) {
        Ok(principal) => principal,
        Err(response) => return Ok(response),
    };

    // 目标课程必须存在
    let course = match storage.get_course_by_id(material_data.course_id).await {
        Ok(Some(course)) => course,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::CourseNotFound,
                "Course not found",
            )));
        }
        Err(e) => {
            error!("Failed to retrieve course: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to retrieve course: {e}"),
                )),
            );
        }
    };

    // 权限校验
    if let Err(reason) = policy::authorize(&principal, &Action::CreateMaterial { course: &course })
    {
        return Ok(deny_response(reason));
    }

    if material_data.title.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "Material title cannot be empty",
        )));
    }

    // file_token 必须指向本人已上传的文件
    let file = match storage.get_file_by_token(&material_data.file_token).await {
        Ok(Some(file)) if file.user_id == principal.user_id => file,
        Ok(_) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::FileNotFound,
                "Uploaded file not found",
            )));
        }
        Err(e) => {
            error!("Failed to look up file token: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to look up file: {e}"),
                )),
            );
        }
    };

    match storage
        .create_material(
            principal.user_id,
            material_data,
            file.file_name,
            file.file_type,
        )
        .await
    {
        Ok(material) => {
            info!(
                "Material {} created in course {} by instructor {}",
                material.id, material.course_id, principal.user_id
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                material,
                "Material created successfully",
            )))
        }
        Err(e) => {
            error!("Failed to create material: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::MaterialCreationFailed,
                    format!("Failed to create material: {e}"),
                )),
            )
        }
    }
}
