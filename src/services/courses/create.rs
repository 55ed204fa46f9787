use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::CourseService;
use crate::models::courses::requests::CreateCourseRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::policy::{self, Action};
use crate::services::{deny_response, extract_principal};
use crate::utils::validate::validate_course_code;

pub async fn create_course(
    service: &CourseService,
    request: &HttpRequest,
    mut course_data: CreateCourseRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let principal = match extract_principal(request) {
        Ok(principal) => principal,
        Err(response) => return Ok(response),
    };

    // 权限校验
    if let Err(reason) = policy::authorize(&principal, &Action::CreateCourse) {
        return Ok(deny_response(reason));
    }

    // 课程名不能为空
    if course_data.name.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "Course name cannot be empty",
        )));
    }

    // 选课码统一大写后校验
    course_data.code = course_data.code.trim().to_uppercase();
    if let Err(msg) = validate_course_code(&course_data.code) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::InvalidCourseCode, msg)));
    }

    // 创建课程
    match storage.create_course(principal.user_id, course_data).await {
        Ok(course) => {
            info!(
                "Course {} ({}) created by instructor {}",
                course.name, course.code, principal.user_id
            );
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(course, "Course created successfully")))
        }
        Err(e) => Ok(course_create_failed(&e.to_string())),
    }
}

// 选课码撞车按业务校验失败处理，其余入库失败一律 500
fn course_create_failed(e: &str) -> HttpResponse {
    error!("Course creation failed: {}", e);
    if crate::services::is_unique_violation(e) {
        HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::CourseCodeAlreadyExists,
            "Course code already exists",
        ))
    } else {
        HttpResponse::InternalServerError().json(ApiResponse::error_empty(
            ErrorCode::CourseCreationFailed,
            format!("Course creation failed: {e}"),
        ))
    }
}
