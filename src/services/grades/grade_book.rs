use std::collections::HashMap;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::{GradeService, aggregate};
use crate::models::grades::responses::{
    GradeAssignmentInfo, GradeBookCell, GradeBookResponse, GradeBookRow, GradeBookStudent,
    GradeCourseInfo,
};
use crate::models::submissions::entities::Submission;
use crate::models::{ApiResponse, ErrorCode};
use crate::policy::{self, Action};
use crate::services::{deny_response, extract_principal};

/// 课程成绩册，名册内每名学生一行，每个作业一格
pub async fn course_grade_book(
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

    // 权限校验
    if let Err(reason) = policy::authorize(&principal, &Action::ReadGradeBook { course: &course }) {
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
    // 成绩册各列与学生成绩明细保持一致，按截止时间升序，同一截止时间按 id
    assignments.sort_by_key(|a| (a.due_date, a.id));

    let roster = match storage.list_course_roster(course_id).await {
        Ok(roster) => roster,
        Err(e) => {
            error!("Failed to retrieve roster: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to retrieve course roster: {e}"),
                )),
            );
        }
    };

    // 一次取回课程内全部提交，在内存中按学生分组
    let assignment_ids: Vec<i64> = assignments.iter().map(|a| a.id).collect();
    let submissions = match storage
        .list_submissions_by_assignments(&assignment_ids, None)
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

    let mut by_student: HashMap<i64, Vec<Submission>> = HashMap::new();
    for submission in submissions {
        by_student
            .entry(submission.student_id)
            .or_default()
            .push(submission);
    }

    let grade_book = roster
        .into_iter()
        .map(|entry| {
            let student_submissions = by_student.remove(&entry.id).unwrap_or_default();
            let summary = aggregate::summarize(&assignments, &student_submissions);

            let by_assignment: HashMap<i64, &Submission> = student_submissions
                .iter()
                .map(|s| (s.assignment_id, s))
                .collect();

            let grades = assignments
                .iter()
                .map(|a| {
                    let submission = by_assignment.get(&a.id);
                    GradeBookCell {
                        assignment_id: a.id,
                        assignment_title: a.title.clone(),
                        max_points: a.max_points,
                        score: submission
                            .and_then(|s| s.grade.as_ref())
                            .map(|g| g.score),
                        submitted: submission.is_some(),
                        is_late: submission.map(|s| s.is_late).unwrap_or(false),
                    }
                })
                .collect();

            GradeBookRow {
                student: GradeBookStudent {
                    id: entry.id,
                    username: entry.username,
                    display_name: entry.display_name,
                    email: entry.email,
                },
                grades,
                summary,
            }
        })
        .collect();

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        GradeBookResponse {
            course: GradeCourseInfo {
                id: course.id,
                name: course.name,
                code: course.code,
            },
            assignments: assignments
                .into_iter()
                .map(|a| GradeAssignmentInfo {
                    id: a.id,
                    title: a.title,
                    due_date: a.due_date,
                    max_points: a.max_points,
                })
                .collect(),
            grade_book,
        },
        "Grade book retrieved successfully",
    )))
}
