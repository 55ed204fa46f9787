use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::{AssignmentService, creator_info};
use crate::models::assignments::responses::{AssignmentCourseInfo, AssignmentDetail};
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::policy::{self, Action};
use crate::services::{deny_response, extract_principal};

pub async fn get_assignment(
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

    // 作业的可见性跟随所属课程
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

    let enrolled = if principal.role == UserRole::Student {
        match storage.is_enrolled(course.id, principal.user_id).await {
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
        &Action::ReadAssignments {
            course: &course,
            enrolled,
        },
    ) {
        return Ok(deny_response(reason));
    }

    let creator = match storage.get_user_by_id(assignment.created_by).await {
        Ok(user) => user.as_ref().map(creator_info),
        Err(e) => {
            error!("Failed to retrieve assignment creator: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to retrieve assignment creator: {e}"),
                )),
            );
        }
    };

    let detail = AssignmentDetail {
        assignment,
        creator,
        course: Some(AssignmentCourseInfo {
            id: course.id,
            name: course.name,
            code: course.code,
        }),
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        detail,
        "Assignment retrieved successfully",
    )))
}
