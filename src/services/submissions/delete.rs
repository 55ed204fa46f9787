use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::SubmissionService;
use crate::models::{ApiResponse, ErrorCode};
use crate::policy::{self, Action};
use crate::services::files::remove_stored_file;
use crate::services::{deny_response, extract_principal};

pub async fn delete_submission(
    service: &SubmissionService,
    request: &HttpRequest,
    submission_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let principal = match extract_principal(request) {
        Ok(principal) => principal,
        Err(response) => return Ok(response),
    };

    let submission = match storage.get_submission_by_id(submission_id).await {
        Ok(Some(submission)) => submission,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::SubmissionNotFound,
                "Submission not found",
            )));
        }
        Err(e) => {
            error!("Failed to retrieve submission {}: {}", submission_id, e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to retrieve submission: {e}"),
                )),
            );
        }
    };

    // 权限校验，撤回仅限提交者本人
    if let Err(reason) = policy::authorize(
        &principal,
        &Action::DeleteSubmission {
            submission: &submission,
        },
    ) {
        return Ok(deny_response(reason));
    }

    match storage.delete_submission(submission_id).await {
        Ok(true) => {
            // 评分记录级联删除，提交文件一并清理
            remove_stored_file(&storage, &submission.file_token).await;
            info!(
                "Submission {} withdrawn by student {}",
                submission_id, principal.user_id
            );
            Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty(
                "Submission deleted successfully",
            )))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::SubmissionNotFound,
            "Submission not found",
        ))),
        Err(e) => {
            error!("Failed to delete submission {}: {}", submission_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to delete submission: {e}"),
                )),
            )
        }
    }
}
