use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::{GradeService, aggregate};
use crate::models::grades::responses::{CourseGradeOverview, GradeCourseInfo, GradesOverviewResponse};
use crate::models::{ApiResponse, ErrorCode};
use crate::policy::{self, Action};
use crate::services::{deny_response, extract_principal};

/// 逐课程汇总当前学生的成绩
pub async fn my_overview(
    service: &GradeService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let principal = match extract_principal(request) {
        Ok(principal) => principal,
        Err(response) => return Ok(response),
    };

    // 权限校验，只看自己已选的课程
    if let Err(reason) = policy::authorize(&principal, &Action::ReadMyGrades { enrolled: true }) {
        return Ok(deny_response(reason));
    }

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

    let mut items = Vec::with_capacity(courses.len());
    for course in courses {
        let assignments = match storage.list_assignments_by_course(course.id).await {
            Ok(assignments) => assignments,
            Err(e) => {
                error!("Failed to retrieve assignments for course {}: {}", course.id, e);
                return Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        format!("Failed to retrieve assignments: {e}"),
                    )),
                );
            }
        };

        let assignment_ids: Vec<i64> = assignments.iter().map(|a| a.id).collect();
        let submissions = match storage
            .list_submissions_by_assignments(&assignment_ids, Some(principal.user_id))
            .await
        {
            Ok(submissions) => submissions,
            Err(e) => {
                error!("Failed to retrieve submissions for course {}: {}", course.id, e);
                return Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        format!("Failed to retrieve submissions: {e}"),
                    )),
                );
            }
        };

        let summary = aggregate::summarize(&assignments, &submissions);
        items.push(CourseGradeOverview {
            course: GradeCourseInfo {
                id: course.id,
                name: course.name,
                code: course.code,
            },
            summary,
        });
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        GradesOverviewResponse { items },
        "Grade overview retrieved successfully",
    )))
}
