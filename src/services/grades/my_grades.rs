use std::collections::HashMap;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::{GradeService, aggregate};
use crate::models::grades::responses::{
    AssignmentGradeDetail, GradeAssignmentInfo, GradeCourseInfo, GradeSubmissionInfo,
    MyCourseGradesResponse,
};
use crate::models::submissions::entities::Submission;
use crate::models::{ApiResponse, ErrorCode};
use crate::policy::{self, Action};
use crate::services::{deny_response, extract_principal};

pub async fn my_course_grades(
    service: &GradeService,
    request: &HttpRequest,
    course_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let principal = match extract_principal(request) {
        Ok(principal) => principal,
        Err(response) => return Ok(response),
    };

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
    if let Err(reason) = policy::authorize(&principal, &Action::ReadMyGrades { enrolled }) {
        return Ok(deny_response(reason));
    }

    let mut assignments = match storage.list_assignments_by_course(course_id).await {
        Ok(assignments) => assignments,
        Err(e) => {
            error!("Failed to retrieve assignments: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to retrieve assignments: {e}"),
                )),
            );
        }
    };
    // 成绩明细按截止时间升序展示，同一截止时间按 id
    assignments.sort_by_key(|a| (a.due_date, a.id));

    let assignment_ids: Vec<i64> = assignments.iter().map(|a| a.id).collect();
    let submissions = match storage
        .list_submissions_by_assignments(&assignment_ids, Some(principal.user_id))
        .await
    {
        Ok(submissions) => submissions,
        Err(e) => {
            error!("Failed to retrieve submissions: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to retrieve submissions: {e}"),
                )),
            );
        }
    };

    let summary = aggregate::summarize(&assignments, &submissions);

    let mut submission_map: HashMap<i64, Submission> = submissions
        .into_iter()
        .map(|s| (s.assignment_id, s))
        .collect();

    let grades = assignments
        .into_iter()
        .map(|a| {
            let submission = submission_map.remove(&a.id).map(|s| GradeSubmissionInfo {
                id: s.id,
                submitted_at: s.submitted_at,
                is_late: s.is_late,
                grade: s.grade,
            });
            AssignmentGradeDetail {
                assignment: GradeAssignmentInfo {
                    id: a.id,
                    title: a.title,
                    due_date: a.due_date,
                    max_points: a.max_points,
                },
                submission,
            }
        })
        .collect();

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        MyCourseGradesResponse {
            course: GradeCourseInfo {
                id: course.id,
                name: course.name,
                code: course.code,
            },
            summary,
            grades,
        },
        "Grades retrieved successfully",
    )))
}
