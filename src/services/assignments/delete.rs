use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::AssignmentService;
use crate::models::{ApiResponse, ErrorCode};
use crate::policy::{self, Action};
use crate::services::files::remove_stored_file;
use crate::services::{deny_response, extract_principal};

pub async fn delete_assignment(
    service: &AssignmentService,
    request: &HttpRequest,
    assignment_id: i64,
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
        &Action::DeleteAssignment {
            assignment: &assignment,
        },
    ) {
        return Ok(deny_response(reason));
    }

    // 级联删除前收集提交文件 token
    let file_tokens: Vec<String> = match storage.list_submissions_by_assignment(assignment_id).await
    {
        Ok(submissions) => submissions.into_iter().map(|s| s.file_token).collect(),
        Err(e) => {
            error!(
                "Failed to collect submissions of assignment {}: {}",
                assignment_id, e
            );
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to delete assignment: {e}"),
                )),
            );
        }
    };

    match storage.delete_assignment(assignment_id).await {
        Ok(true) => {
            for token in &file_tokens {
                remove_stored_file(&storage, token).await;
            }
            info!(
                "Assignment {} deleted by instructor {}, {} submission files cleaned up",
                assignment_id,
                principal.user_id,
                file_tokens.len()
            );
            Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty(
                "Assignment deleted successfully",
            )))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::AssignmentNotFound,
            "Assignment not found",
        ))),
        Err(e) => {
            error!("Failed to delete assignment {}: {}", assignment_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to delete assignment: {e}"),
                )),
            )
        }
    }
}
