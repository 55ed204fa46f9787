use std::collections::HashMap;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::{AssignmentService, creator_info};
use crate::models::assignments::responses::{AssignmentListItem, AssignmentWithStatus};
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::policy::{self, Action};
use crate::services::{deny_response, extract_principal};

pub async fn list_assignments(
    service: &AssignmentService,
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
        &Action::ReadAssignments {
            course: &course,
            enrolled,
        },
    ) {
        return Ok(deny_response(reason));
    }

    let assignments = match storage.list_assignments_by_course(course_id).await {
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

    // 批量补全创建者摘要
    let creator_ids: Vec<i64> = assignments.iter().map(|a| a.created_by).collect();
    let creators = match storage.get_users_by_ids(&creator_ids).await {
        Ok(users) => users,
        Err(e) => {
            error!("Failed to retrieve assignment creators: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to retrieve assignment creators: {e}"),
                )),
            );
        }
    };
    let creator_map: HashMap<i64, _> = creators.iter().map(|u| (u.id, creator_info(u))).collect();

    match principal.role {
        UserRole::Instructor => {
            let items: Vec<AssignmentListItem> = assignments
                .into_iter()
                .map(|assignment| {
                    let creator = creator_map.get(&assignment.created_by).cloned();
                    AssignmentListItem {
                        assignment,
                        creator,
                    }
                })
                .collect();

            Ok(HttpResponse::Ok().json(ApiResponse::success(
                items,
                "Assignment list retrieved successfully",
            )))
        }
        // 学生视角标注本人提交状态
        UserRole::Student => {
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

            let mut submission_map: HashMap<i64, _> = submissions
                .into_iter()
                .map(|s| (s.assignment_id, s))
                .collect();

            let items: Vec<AssignmentWithStatus> = assignments
                .into_iter()
                .map(|assignment| {
                    let creator = creator_map.get(&assignment.created_by).cloned();
                    let submission = submission_map.remove(&assignment.id);
                    AssignmentWithStatus {
                        has_submitted: submission.is_some(),
                        submission,
                        creator,
                        assignment,
                    }
                })
                .collect();

            Ok(HttpResponse::Ok().json(ApiResponse::success(
                items,
                "Assignment list retrieved successfully",
            )))
        }
    }
}
