use std::collections::HashMap;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::{CourseService, instructor_info};
use crate::models::courses::entities::Course;
use crate::models::courses::requests::{CourseListQuery, CourseQueryParams};
use crate::models::courses::responses::{CourseItem, CourseListResponse, EnrolledCoursesResponse};
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::extract_principal;
use crate::storage::Storage;

pub async fn list_courses(
    service: &CourseService,
    request: &HttpRequest,
    query: CourseQueryParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let principal = match extract_principal(request) {
        Ok(principal) => principal,
        Err(response) => return Ok(response),
    };

    // 教师看自己开设的课程，学生看全部课程目录
    let (page, size) = query.pagination.normalized();
    let list_query = CourseListQuery {
        page: Some(page),
        size: Some(size),
        instructor_id: (principal.role == UserRole::Instructor).then_some(principal.user_id),
        search: query.search,
    };

    let (courses, pagination) = match storage.list_courses_with_pagination(list_query).await {
        Ok(result) => result,
        Err(e) => {
            error!("Failed to retrieve course list: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to retrieve course list: {e}"),
                )),
            );
        }
    };

    let items = match principal.role {
        // 教师视角携带花名册
        UserRole::Instructor => {
            let mut items = Vec::with_capacity(courses.len());
            for course in courses {
                let students = match storage.list_course_roster(course.id).await {
                    Ok(roster) => roster,
                    Err(e) => {
                        error!("Failed to retrieve roster for course {}: {}", course.id, e);
                        return Ok(HttpResponse::InternalServerError().json(
                            ApiResponse::error_empty(
                                ErrorCode::InternalServerError,
                                format!("Failed to retrieve course roster: {e}"),
                            ),
                        ));
                    }
                };
                items.push(CourseItem {
                    course,
                    instructor: None,
                    students: Some(students),
                });
            }
            items
        }
        // 学生视角携带教师摘要，不暴露花名册
        UserRole::Student => match with_instructors(&storage, courses).await {
            Ok(items) => items,
            Err(response) => return Ok(response),
        },
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        CourseListResponse { items, pagination },
        "Course list retrieved successfully",
    )))
}

pub async fn enrolled_courses(
    service: &CourseService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let principal = match extract_principal(request) {
        Ok(principal) => principal,
        Err(response) => return Ok(response),
    };

    let courses = match storage.list_courses_by_student(principal.user_id).await {
        Ok(courses) => courses,
        Err(e) => {
            error!("Failed to retrieve enrolled courses: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to retrieve enrolled courses: {e}"),
                )),
            );
        }
    };

    let items = match with_instructors(&storage, courses).await {
        Ok(items) => items,
        Err(response) => return Ok(response),
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        EnrolledCoursesResponse { items },
        "Enrolled courses retrieved successfully",
    )))
}

// 批量补全课程条目的教师摘要
async fn with_instructors(
    storage: &std::sync::Arc<dyn Storage>,
    courses: Vec<Course>,
) -> Result<Vec<CourseItem>, HttpResponse> {
    let instructor_ids: Vec<i64> = courses.iter().map(|c| c.instructor_id).collect();

    let instructors = match storage.get_users_by_ids(&instructor_ids).await {
        Ok(users) => users,
        Err(e) => {
            error!("Failed to retrieve instructors: {}", e);
            return Err(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to retrieve instructors: {e}"),
                )),
            );
        }
    };

    let instructor_map: HashMap<i64, _> = instructors
        .iter()
        .map(|u| (u.id, instructor_info(u)))
        .collect();

    Ok(courses
        .into_iter()
        .map(|course| {
            let instructor = instructor_map.get(&course.instructor_id).cloned();
            CourseItem {
                course,
                instructor,
                students: None,
            }
        })
        .collect())
}
