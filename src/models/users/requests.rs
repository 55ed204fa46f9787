use super::entities::UserRole;
use serde::Deserialize;
use ts_rs::TS;

// 注册请求，角色注册时选定后不可变更
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: UserRole,
    pub display_name: Option<String>,
}
