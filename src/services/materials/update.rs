use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::MaterialService;
use crate::models::materials::requests::UpdateMaterialRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::policy::{self, Action};
use crate::services::{deny_response, extract_principal};

pub async fn update_material(
    service: &MaterialService,
    request: &HttpRequest,
    material_id: i64,
    update_data: UpdateMaterialRequest,
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
        &Action::UpdateMaterial {
            material: &material,
        },
    ) {
        return Ok(deny_response(reason));
    }

    if let Some(ref title) = update_data.title
        && title.trim().is_empty()
    {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "Material title cannot be empty",
        )));
    }

    match storage.update_material(material_id, update_data).await {
        Ok(Some(material)) => {
            info!(
                "Material {} updated by instructor {}",
                material_id, principal.user_id
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                material,
                "Material updated successfully",
            )))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::MaterialNotFound,
            "Material not found",
        ))),
        Err(e) => {
            error!("Failed to update material {}: {}", material_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to update material: {e}"),
                )),
            )
        }
    }
}
