use serde::Deserialize;
use ts_rs::TS;

// 登录请求，username 字段同时接受用户名与邮箱
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
    /// 勾选后 refresh token 按 remember_me 有效期签发
    #[serde(default)]
    pub remember_me: bool,
}
