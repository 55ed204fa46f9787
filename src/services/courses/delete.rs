use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::CourseService;
use crate::models::{ApiResponse, ErrorCode};
use crate::policy::{self, Action};
use crate::services::files::remove_stored_file;
use crate::services::{deny_response, extract_principal};

pub async fn delete_course(
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

    // 权限校验
    if let Err(reason) = policy::authorize(&principal, &Action::DeleteCourse { course: &course }) {
        return Ok(deny_response(reason));
    }

    // 数据库行级联删除前先收集文件 token，之后无法再查到
    let file_tokens = match collect_file_tokens(&storage, course_id).await {
        Ok(tokens) => tokens,
        Err(e) => {
            error!("Failed to collect files of course {}: {}", course_id, e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to delete course: {e}"),
                )),
            );
        }
    };

    // 删除课程，选课、作业、提交、评分、资料记录随外键级联删除
    match storage.delete_course(course_id).await {
        Ok(true) => {
            for token in &file_tokens {
                remove_stored_file(&storage, token).await;
            }
            info!(
                "Course {} deleted by instructor {}, {} files cleaned up",
                course_id,
                principal.user_id,
                file_tokens.len()
            );
            Ok(HttpResponse::Ok()
                .json(ApiResponse::<()>::success_empty("Course deleted successfully")))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::CourseNotFound,
            "Course not found",
        ))),
        Err(e) => {
            error!("Failed to delete course {}: {}", course_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to delete course: {e}"),
                )),
            )
        }
    }
}

// 课程下提交与资料引用的全部文件 token
async fn collect_file_tokens(
    storage: &std::sync::Arc<dyn crate::storage::Storage>,
    course_id: i64,
) -> crate::errors::Result<Vec<String>> {
    let mut tokens = Vec::new();

    let assignments = storage.list_assignments_by_course(course_id).await?;
    let assignment_ids: Vec<i64> = assignments.iter().map(|a| a.id).collect();

    let submissions = storage
        .list_submissions_by_assignments(&assignment_ids, None)
        .await?;
    tokens.extend(submissions.into_iter().map(|s| s.file_token));

    let materials = storage.list_materials_by_course(course_id).await?;
    tokens.extend(materials.into_iter().map(|m| m.file_token));

    Ok(tokens)
}
