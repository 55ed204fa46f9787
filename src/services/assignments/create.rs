use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::AssignmentService;
use crate::models::assignments::requests::CreateAssignmentRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::policy::{self, Action};
use crate::services::{deny_response, extract_principal};

pub async fn create_assignment(
    service: &AssignmentService,
    request: &HttpRequest,
    assignment_data: CreateAssignmentRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let principal = match extract_principal(request) {
        Ok(principal) => principal,
        Err(response) => return Ok(response),
    };

    // 目标课程必须存在
    let course = match storage.get_course_by_id(assignment_data.course_id).await {
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
    if let Err(reason) = policy::authorize(&principal, &Action::CreateAssignment { course: &course })
    {
        return Ok(deny_response(reason));
    }

    if assignment_data.title.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "Assignment title cannot be empty",
        )));
    }

    // 满分为 0 的作业合法（不计入成绩核算），负数不行
    if assignment_data.max_points < 0.0 {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "Max points cannot be negative",
        )));
    }

    match storage
        .create_assignment(principal.user_id, assignment_data)
        .await
    {
        Ok(assignment) => {
            info!(
                "Assignment {} created in course {} by instructor {}",
                assignment.id, assignment.course_id, principal.user_id
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                assignment,
                "Assignment created successfully",
            )))
        }
        Err(e) => {
            error!("Failed to create assignment: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to create assignment: {e}"),
                )),
            )
        }
    }
}
