use std::collections::HashMap;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::{MaterialService, uploader_info};
use crate::models::materials::responses::{MaterialListItem, MaterialListResponse};
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::policy::{self, Action};
use crate::services::{deny_response, extract_principal};

pub async fn list_materials(
    service: &MaterialService,
    request: &HttpRequest,
    course_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let principal = match extract_principal(request) {
        Ok(principal) => principal,
        Err(response) => return Ok(response),
    };

    // 加载课程
    let course = match storage.get_course_by_id(course_id).await {
        Ok(Some(course)) => course,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::CourseNotFound,
                "Course not found",
            )));
        }
        Err(e) => {
            error!("Failed to retrieve course {}: {}", course_id, e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to retrieve course: {e}"),
                )),
            );
        }
    };

    let enrolled = if principal.role == UserRole::Student {
        match storage.is_enrolled(course_id, principal.user_id).await {
            Ok(enrolled) => enrolled,
            Err(e) => {
                error!("Failed to check enrollment: {}", e);
                return Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        format!("Failed to check enrollment: {e}"),
                    )),
                );
            }
        }
    } else {
        false
    };

    // 权限校验
    if let Err(reason) = policy::authorize(
        &principal,
        &Action::ReadMaterials {
            course: &course,
            enrolled,
        },
    ) {
        return Ok(deny_response(reason));
    }

    let materials = match storage.list_materials_by_course(course_id).await {
        Ok(materials) => materials,
        Err(e) => {
            error!("Failed to retrieve materials: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to retrieve materials: {e}"),
                )),
            );
        }
    };

    // 批量补全上传者摘要
    let uploader_ids: Vec<i64> = materials.iter().map(|m| m.uploaded_by).collect();
    let uploaders = match storage.get_users_by_ids(&uploader_ids).await {
        Ok(users) => users,
        Err(e) => {
            error!("Failed to retrieve material uploaders: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to retrieve material uploaders: {e}"),
                )),
            );
        }
    };
    let uploader_map: HashMap<i64, _> = uploaders
        .iter()
        .map(|u| (u.id, uploader_info(u)))
        .collect();

    let items: Vec<MaterialListItem> = materials
        .into_iter()
        .map(|material| {
            let uploader = uploader_map.get(&material.uploaded_by).cloned();
            MaterialListItem { material, uploader }
        })
        .collect();

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        MaterialListResponse { items },
        "Material list retrieved successfully",
    )))
}
