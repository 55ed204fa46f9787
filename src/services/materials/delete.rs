use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::MaterialService;
use crate::models::{ApiResponse, ErrorCode};
use crate::policy::{self, Action};
use crate::services::files::remove_stored_file;
use crate::services::{deny_response, extract_principal};

pub async fn delete_material(
    service: &MaterialService,
    request: &HttpRequest,
    material_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let principal = match extract_principal(request) {
        Ok(principal) => principal,
        Err(response) => return Ok(response),
    };

    // 加载资料
    let material = match storage.get_material_by_id(material_id).await {
        Ok(Some(material)) => material,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::MaterialNotFound,
                "Material not found",
            )));
        }
        Err(e) => {
            error!("Failed to retrieve material {}: {}", material_id, e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to retrieve material: {e}"),
                )),
            );
        }
    };

    // 权限校验
    if let Err(reason) = policy::authorize(
        &principal,
        &Action::DeleteMaterial {
            material: &material,
        },
    ) {
        return Ok(deny_response(reason));
    }

    match storage.delete_material(material_id).await {
        Ok(true) => {
            // 资料记录删除后清理对应文件
            remove_stored_file(&storage, &material.file_token).await;
            info!(
                "Material {} deleted by instructor {}",
                material_id, principal.user_id
            );
            Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty(
                "Material deleted successfully",
            )))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::MaterialNotFound,
            "Material not found",
        ))),
        Err(e) => {
            error!("Failed to delete material {}: {}", material_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to delete material: {e}"),
                )),
            )
        }
    }
}
