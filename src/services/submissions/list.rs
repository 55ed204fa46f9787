use std::collections::HashMap;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::{SubmissionService, student_info};
use crate::models::submissions::responses::{
    SubmissionAssignmentInfo, SubmissionCourseInfo, SubmissionDetail, SubmissionListResponse,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::policy::{self, Action};
use crate::services::{deny_response, extract_principal};

/// 作业下全部提交，按提交时间降序，携带学生摘要
pub async fn list_by_assignment(
    service: &SubmissionService,
    request: &HttpRequest,
    assignment_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let principal = match extract_principal(request) {
        Ok(principal) => principal,
        Err(response) => return Ok(response),
    };

    let assignment = match storage.get_assignment_by_id(assignment_id).await {
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
    if let Err(reason) = policy::authorize(&principal, &Action::ListSubmissions { course: &course })
    {
        return Ok(deny_response(reason));
    }

    let submissions = match storage.list_submissions_by_assignment(assignment_id).await {
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

    // 批量补全学生摘要
    let student_ids: Vec<i64> = submissions.iter().map(|s| s.student_id).collect();
    let students = match storage.get_users_by_ids(&student_ids).await {
        Ok(users) => users,
        Err(e) => {
            error!("Failed to retrieve students: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to retrieve students: {e}"),
                )),
            );
        }
    };
    let student_map: HashMap<i64, _> = students.iter().map(|u| (u.id, student_info(u))).collect();

    let items = submissions
        .into_iter()
        .map(|submission| {
            let student = student_map.get(&submission.student_id).cloned();
            SubmissionDetail {
                submission,
                student,
                assignment: None,
            }
        })
        .collect();

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        SubmissionListResponse { items },
        "Submissions retrieved successfully",
    )))
}

/// 当前学生的全部提交，携带作业与课程摘要
pub async fn my_submissions(
    service: &SubmissionService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let principal = match extract_principal(request) {
        Ok(principal) => principal,
        Err(response) => return Ok(response),
    };

    let submissions = match storage.list_submissions_by_student(principal.user_id).await {
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

    // 两步批量查询作业与课程，避免逐条回表
    let assignment_ids: Vec<i64> = submissions.iter().map(|s| s.assignment_id).collect();
    let assignments = match storage.get_assignments_by_ids(&assignment_ids).await {
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

    let course_ids: Vec<i64> = assignments.iter().map(|a| a.course_id).collect();
    let courses = match storage.get_courses_by_ids(&course_ids).await {
        Ok(courses) => courses,
        Err(e) => {
            error!("Failed to retrieve courses: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to retrieve courses: {e}"),
                )),
            );
        }
    };

    let course_map: HashMap<i64, SubmissionCourseInfo> = courses
        .into_iter()
        .map(|c| {
            (
                c.id,
                SubmissionCourseInfo {
                    id: c.id,
                    name: c.name,
                    code: c.code,
                },
            )
        })
        .collect();

    let assignment_map: HashMap<i64, SubmissionAssignmentInfo> = assignments
        .into_iter()
        .map(|a| {
            let course = course_map.get(&a.course_id).cloned();
            (
                a.id,
                SubmissionAssignmentInfo {
                    id: a.id,
                    title: a.title,
                    due_date: a.due_date,
                    max_points: a.max_points,
                    course,
                },
            )
        })
        .collect();

    let items = submissions
        .into_iter()
        .map(|submission| {
            let assignment = assignment_map.get(&submission.assignment_id).cloned();
            SubmissionDetail {
                submission,
                student: None,
                assignment,
            }
        })
        .collect();

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        SubmissionListResponse { items },
        "Submissions retrieved successfully",
    )))
}
