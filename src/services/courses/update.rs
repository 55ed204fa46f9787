use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::CourseService;
use crate::models::courses::requests::UpdateCourseRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::policy::{self, Action};
use crate::services::{deny_response, extract_principal};
use crate::utils::validate::validate_course_code;

pub async fn update_course(
    service: &CourseService,
    request: &HttpRequest,
    course_id: i64,
    mut update_data: UpdateCourseRequest,
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

    // 权限校验
    if let Err(reason) = policy::authorize(&principal, &Action::UpdateCourse { course: &course }) {
        return Ok(deny_response(reason));
    }

    // 换选课码时先归一化再校验
    if let Some(code) = update_data.code.take() {
        let code = code.trim().to_uppercase();
        if let Err(msg) = validate_course_code(&code) {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::InvalidCourseCode, msg)));
        }
        update_data.code = Some(code);
    }

    // 更新课程
    match storage.update_course(course_id, update_data).await {
        Ok(Some(course)) => {
            info!("Course {} updated by instructor {}", course_id, principal.user_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(course, "Course updated successfully")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::CourseNotFound,
            "Course not found",
        ))),
        Err(e) if crate::services::is_unique_violation(&e.to_string()) => {
            Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::CourseCodeAlreadyExists,
                "Course code already exists",
            )))
        }
        Err(e) => {
            error!("Failed to update course {}: {}", course_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to update course: {e}"),
                )),
            )
        }
    }
}
