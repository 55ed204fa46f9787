use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::AssignmentService;
use crate::models::assignments::requests::UpdateAssignmentRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::policy::{self, Action};
use crate::services::{deny_response, extract_principal};

pub async fn update_assignment(
    service: &AssignmentService,
    request: &HttpRequest,
    assignment_id: i64,
    update_data: UpdateAssignmentRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let principal = match extract_principal(request) {
        Ok(principal) => principal,
        Err(response) => return Ok(response),
    };

    // 加载作业
    let assignment = match storage.get_assignment_by_id(assignment_id).await {
        Ok(Some(assignment)) => assignment,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::AssignmentNotFound,
                "Assignment not found",
            )));
        }
        Err(e) => {
            error!("Failed to retrieve assignment {}: {}", assignment_id, e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to retrieve assignment: {e}"),
                )),
            );
        }
    };

    // 权限校验
    if let Err(reason) = policy::authorize(
        &principal,
        &Action::UpdateAssignment {
            assignment: &assignment,
        },
    ) {
        return Ok(deny_response(reason));
    }

    if let Some(ref title) = update_data.title
        && title.trim().is_empty()
    {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "Assignment title cannot be empty",
        )));
    }

    if let Some(max_points) = update_data.max_points
        && max_points < 0.0
    {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "Max points cannot be negative",
        )));
    }

    match storage.update_assignment(assignment_id, update_data).await {
        Ok(Some(assignment)) => {
            info!(
                "Assignment {} updated by instructor {}",
                assignment_id, principal.user_id
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                assignment,
                "Assignment updated successfully",
            )))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::AssignmentNotFound,
            "Assignment not found",
        ))),
        Err(e) => {
            error!("Failed to update assignment {}: {}", assignment_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to update assignment: {e}"),
                )),
            )
        }
    }
}
