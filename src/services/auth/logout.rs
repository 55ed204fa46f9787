use actix_web::{HttpResponse, Result as ActixResult};

use crate::models::ApiResponse;
use crate::utils::jwt::JwtUtils;

/// 处理用户登出
///
/// access token 本身无状态，登出只需让浏览器丢弃 refresh_token cookie。
pub async fn handle_logout() -> ActixResult<HttpResponse> {
    // max_age=0 使浏览器立即删除该 cookie
    let empty_cookie = JwtUtils::create_empty_refresh_token_cookie();

    Ok(HttpResponse::Ok()
        .cookie(empty_cookie)
        .json(ApiResponse::<()>::success_empty("登出成功")))
}
