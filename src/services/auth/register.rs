use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::{ApiResponse, ErrorCode, users::requests::RegisterRequest};
use crate::utils::password::hash_password;
use crate::utils::validate::{validate_email, validate_password, validate_username};

use super::AuthService;

pub async fn handle_register(
    service: &AuthService,
    mut register_request: RegisterRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    // 格式校验先行，不合法的请求不必打数据库
    if let Err(msg) = validate_username(&register_request.username) {
        return Ok(bad_request(ErrorCode::UserNameInvalid, msg));
    }
    if let Err(msg) = validate_email(&register_request.email) {
        return Ok(bad_request(ErrorCode::UserEmailInvalid, msg));
    }
    if let Err(msg) = validate_password(&register_request.password) {
        return Ok(bad_request(ErrorCode::UserPasswordInvalid, msg));
    }

    let storage = service.get_storage(request);

    // 用户名与邮箱都要求全局唯一
    match storage
        .get_user_by_username(&register_request.username)
        .await
    {
        Ok(Some(_)) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::UserNameAlreadyExists,
                "Username already exists",
            )));
        }
        Ok(None) => {}
        Err(e) => return Ok(register_failed(e)),
    }
    match storage.get_user_by_email(&register_request.email).await {
        Ok(Some(_)) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::UserEmailAlreadyExists,
                "Email already exists",
            )));
        }
        Ok(None) => {}
        Err(e) => return Ok(register_failed(e)),
    }

    // 入库前把明文密码换成散列
    register_request.password = match hash_password(&register_request.password) {
        Ok(hash) => hash,
        Err(e) => return Ok(register_failed(e)),
    };

    match storage.create_user(register_request).await {
        Ok(user) => Ok(HttpResponse::Created().json(ApiResponse::success(user, "注册成功"))),
        Err(e) => Ok(register_failed(e)),
    }
}

fn bad_request(code: ErrorCode, message: impl Into<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::error_empty(code, message))
}

fn register_failed(err: impl std::fmt::Display) -> HttpResponse {
    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
        ErrorCode::RegisterFailed,
        format!("注册失败: {err}"),
    ))
}
