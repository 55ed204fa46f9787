pub mod assignments;
pub mod auth;
pub mod courses;
pub mod files;
pub mod grades;
pub mod materials;
pub mod submissions;

pub use assignments::AssignmentService;
pub use auth::AuthService;
pub use courses::CourseService;
pub use files::FileService;
pub use grades::GradeService;
pub use materials::MaterialService;
pub use submissions::SubmissionService;

use actix_web::{HttpRequest, HttpResponse};
use std::sync::Arc;

use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode};
use crate::policy::{DenyReason, Principal};
use crate::storage::Storage;

// 各服务共用：从 app_data 取全局存储实例
pub(crate) fn storage_from_request(request: &HttpRequest) -> Arc<dyn Storage> {
    request
        .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
        .expect("Storage not found in app data")
        .get_ref()
        .clone()
}

// 从请求扩展取出鉴权主体，缺失说明路由未挂 RequireJWT
pub(crate) fn extract_principal(request: &HttpRequest) -> Result<Principal, HttpResponse> {
    match RequireJWT::extract_user_claims(request) {
        Some(user) => Ok(Principal::from_user(&user)),
        None => Err(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Unauthorized: missing user identity",
        ))),
    }
}

// 唯一约束冲突的报错措辞因数据库后端而异
pub(crate) fn is_unique_violation(err: &str) -> bool {
    err.contains("UNIQUE constraint failed") // SQLite
        || err.contains("duplicate key value") // PostgreSQL
        || err.contains("Duplicate entry") // MySQL
}

// 授权拒绝统一映射为 403 响应
pub(crate) fn deny_response(reason: DenyReason) -> HttpResponse {
    let code = match reason {
        DenyReason::RequireInstructor | DenyReason::RequireStudent => ErrorCode::Forbidden,
        DenyReason::NotCourseOwner => ErrorCode::CoursePermissionDenied,
        DenyReason::NotEnrolled => ErrorCode::NotEnrolled,
        DenyReason::NotCreator => ErrorCode::AssignmentPermissionDenied,
        DenyReason::NotUploader => ErrorCode::MaterialPermissionDenied,
        DenyReason::NotSubmissionOwner => ErrorCode::SubmissionPermissionDenied,
    };

    HttpResponse::Forbidden().json(ApiResponse::error_empty(code, reason.message()))
}
