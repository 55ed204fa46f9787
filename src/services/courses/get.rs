use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::{CourseService, instructor_info};
use crate::models::courses::responses::CourseItem;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::policy::{self, Action};
use crate::services::{deny_response, extract_principal};

pub async fn get_course(
    service: &CourseService,
    request: &HttpRequest,
    course_id: i64,
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

    // 学生需已选课才能查看
    let enrolled = if principal.role == UserRole::Student {
        match storage.is_enrolled(course_id, principal.user_id).await {
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
        &Action::ReadCourse {
            course: &course,
            enrolled,
        },
    ) {
        return Ok(deny_response(reason));
    }

    let item = match principal.role {
        // 课程属主视角：附加花名册
        UserRole::Instructor => match storage.list_course_roster(course_id).await {
            Ok(students) => CourseItem {
                course,
                instructor: None,
                students: Some(students),
            },
            Err(e) => {
                error!("Failed to retrieve roster for course {}: {}", course_id, e);
                return Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        format!("Failed to retrieve course roster: {e}"),
                    )),
                );
            }
        },
        // 学生视角：附加教师摘要
        UserRole::Student => {
            let instructor = match storage.get_user_by_id(course.instructor_id).await {
                Ok(user) => user.as_ref().map(instructor_info),
                Err(e) => {
                    error!("Failed to retrieve instructor: {}", e);
                    return Ok(
                        HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                            ErrorCode::InternalServerError,
                            format!("Failed to retrieve instructor: {e}"),
                        )),
                    );
                }
            };
            CourseItem {
                course,
                instructor,
                students: None,
            }
        }
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        item,
        "Course retrieved successfully",
    )))
}
