use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::{SubmissionService, student_info};
use crate::models::submissions::responses::{
    SubmissionAssignmentInfo, SubmissionCourseInfo, SubmissionDetail,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::policy::{self, Action};
use crate::services::{deny_response, extract_principal};

pub async fn get_submission(
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

    // 可见性沿 提交 -> 作业 -> 课程 链判定
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
    if let Err(reason) = policy::authorize(
        &principal,
        &Action::ReadSubmission {
            course: &course,
            submission: &submission,
        },
    ) {
        return Ok(deny_response(reason));
    }

    let student = match storage.get_user_by_id(submission.student_id).await {
        Ok(user) => user.as_ref().map(student_info),
        Err(e) => {
            error!("Failed to retrieve student: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to retrieve student: {e}"),
                )),
            );
        }
    };

    let detail = SubmissionDetail {
        submission,
        student,
        assignment: Some(SubmissionAssignmentInfo {
            id: assignment.id,
            title: assignment.title,
            due_date: assignment.due_date,
            max_points: assignment.max_points,
            course: Some(SubmissionCourseInfo {
                id: course.id,
                name: course.name,
                code: course.code,
            }),
        }),
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        detail,
        "Submission retrieved successfully",
    )))
}
