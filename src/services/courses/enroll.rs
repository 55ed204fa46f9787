use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::CourseService;
use crate::models::courses::requests::EnrollCourseRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::policy::{self, Action};
use crate::services::{deny_response, extract_principal};

pub async fn enroll_course(
    service: &CourseService,
    request: &HttpRequest,
    enroll_data: EnrollCourseRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let principal = match extract_principal(request) {
        Ok(principal) => principal,
        Err(response) => return Ok(response),
    };

    // 权限校验
    if let Err(reason) = policy::authorize(&principal, &Action::EnrollCourse) {
        return Ok(deny_response(reason));
    }

    // 选课码不区分大小写
    let code = enroll_data.code.trim().to_uppercase();

    let course = match storage.get_course_by_code(&code).await {
        Ok(Some(course)) => course,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::CourseNotFound,
                "Course not found",
            )));
        }
        Err(e) => {
            error!("Failed to look up course by code: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to look up course: {e}"),
                )),
            );
        }
    };

    // 重复选课直接拒绝
    match storage.is_enrolled(course.id, principal.user_id).await {
        Ok(true) => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::AlreadyEnrolled,
                "Already enrolled in this course",
            )));
        }
        Ok(false) => {}
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

    match storage.enroll_student(course.id, principal.user_id).await {
        Ok(_) => {
            info!(
                "Student {} enrolled in course {} ({})",
                principal.user_id, course.id, course.code
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(course, "Enrolled successfully")))
        }
        // 并发下撞唯一索引也视为重复选课
        Err(e) if crate::services::is_unique_violation(&e.to_string()) => {
            Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::AlreadyEnrolled,
                "Already enrolled in this course",
            )))
        }
        Err(e) => {
            error!("Failed to enroll in course {}: {}", course.id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::EnrollFailed,
                    format!("Failed to enroll: {e}"),
                )),
            )
        }
    }
}

pub async fn unenroll_course(
    service: &CourseService,
    request: &HttpRequest,
    course_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let principal = match extract_principal(request) {
        Ok(principal) => principal,
        Err(response) => return Ok(response),
    };

    // 权限校验
    if let Err(reason) = policy::authorize(&principal, &Action::UnenrollCourse) {
        return Ok(deny_response(reason));
    }

    // 删除不存在的选课记录视为成功（幂等）
    match storage.unenroll_student(course_id, principal.user_id).await {
        Ok(removed) => {
            if removed {
                info!(
                    "Student {} unenrolled from course {}",
                    principal.user_id, course_id
                );
            }
            Ok(HttpResponse::Ok()
                .json(ApiResponse::<()>::success_empty("Unenrolled successfully")))
        }
        Err(e) => {
            error!("Failed to unenroll from course {}: {}", course_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to unenroll: {e}"),
                )),
            )
        }
    }
}
