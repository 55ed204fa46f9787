use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::SubmissionService;
use crate::models::submissions::requests::GradeSubmissionRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::policy::{self, Action};
use crate::services::{deny_response, extract_principal};

pub async fn grade_submission(
    service: &SubmissionService,
    request: &HttpRequest,
    submission_id: i64,
    grade_data: GradeSubmissionRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let principal = match extract_principal(request) {
        Ok(principal) => principal,
        Err(response) => return Ok(response),
    };

    let mut submission = match storage.get_submission_by_id(submission_id).await {
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

    let assignment = match storage.get_assignment_by_id(submission.assignment_id).await {
        Ok(Some(assignment)) => assignment,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::AssignmentNotFound,
                "Assignment not found",
            )));
        }
        Err(e) => {
            error!("Failed to retrieve assignment: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to retrieve assignment: {e}"),
                )),
            );
        }
    };

    let course = match storage.get_course_by_id(assignment.course_id).await {
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
    if let Err(reason) = policy::authorize(&principal, &Action::GradeSubmission { course: &course })
    {
        return Ok(deny_response(reason));
    }

    // 得分必须落在 [0, 作业满分] 区间
    if !(0.0..=assignment.max_points).contains(&grade_data.score) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::GradeOutOfRange,
            format!("Score must be between 0 and {}", assignment.max_points),
        )));
    }

    let feedback = grade_data.feedback.unwrap_or_default();

    match storage
        .upsert_grade(submission.id, principal.user_id, grade_data.score, feedback)
        .await
    {
        Ok(grade) => {
            info!(
                "Submission {} graded {} by instructor {}",
                submission.id, grade.score, principal.user_id
            );
            submission.grade = Some(grade);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                submission,
                "Submission graded successfully",
            )))
        }
        Err(e) => {
            error!("Failed to grade submission {}: {}", submission.id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::GradeFailed,
                    format!("Failed to grade submission: {e}"),
                )),
            )
        }
    }
}
