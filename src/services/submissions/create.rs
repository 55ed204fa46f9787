use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::SubmissionService;
use crate::models::submissions::requests::{CreateSubmissionRequest, NewSubmission};
use crate::models::{ApiResponse, ErrorCode};
use crate::policy::{self, Action};
use crate::services::{deny_response, extract_principal};

pub async fn create_submission(
    service: &SubmissionService,
    request: &HttpRequest,
    submission_data: CreateSubmissionRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let principal = match extract_principal(request) {
        Ok(principal) => principal,
        Err(response) => return Ok(response),
    };

    // 目标作业必须存在
    let assignment = match storage
        .get_assignment_by_id(submission_data.assignment_id)
        .await
    {
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

    let enrolled = match storage.is_enrolled(course.id, principal.user_id).await {
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
    };

    // 权限校验
    if let Err(reason) = policy::authorize(&principal, &Action::CreateSubmission { enrolled }) {
        return Ok(deny_response(reason));
    }

    // 每个学生对同一作业只能有一份提交
    match storage
        .get_submission_by_assignment_and_student(assignment.id, principal.user_id)
        .await
    {
        Ok(Some(_)) => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::SubmissionAlreadyExists,
                "Assignment already submitted",
            )));
        }
        Ok(None) => {}
        Err(e) => {
            error!("Failed to check existing submission: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to check existing submission: {e}"),
                )),
            );
        }
    }

    // file_token 必须指向本人已上传的文件
    let file = match storage.get_file_by_token(&submission_data.file_token).await {
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

    // 迟交标记在提交时与截止时间比较后冻结，之后截止时间变更不回溯
    let now = chrono::Utc::now();
    let new_submission = NewSubmission {
        assignment_id: assignment.id,
        student_id: principal.user_id,
        file_token: submission_data.file_token,
        file_name: file.file_name,
        submitted_at: now,
        is_late: assignment.is_past_due(now),
    };

    match storage.create_submission(new_submission).await {
        Ok(submission) => {
            info!(
                "Submission {} created for assignment {} by student {}",
                submission.id, assignment.id, principal.user_id
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                submission,
                "Submission created successfully",
            )))
        }
        // 并发提交撞唯一索引也视为重复提交
        Err(e) if crate::services::is_unique_violation(&e.to_string()) => {
            Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::SubmissionAlreadyExists,
                "Assignment already submitted",
            )))
        }
        Err(e) => {
            error!("Failed to create submission: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::SubmissionFailed,
                    format!("Failed to create submission: {e}"),
                )),
            )
        }
    }
}
