use crate::models::users::entities::User;
use serde::Serialize;
use ts_rs::TS;

// 颁发给客户端的访问令牌，expires_in 单位为秒
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub struct TokenGrant {
    pub access_token: String,
    pub expires_in: i64,
}

impl TokenGrant {
    /// 配置中的有效期按分钟计，对外统一折算成秒
    pub fn new(access_token: String, expiry_minutes: i64) -> Self {
        Self {
            access_token,
            expires_in: expiry_minutes * 60,
        }
    }
}

// 登录响应：令牌加当前用户信息
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub struct LoginResponse {
    #[serde(flatten)]
    #[ts(flatten)]
    pub token: TokenGrant,
    pub user: User,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub struct UserInfoResponse {
    pub user: User,
}

// 令牌能通过 RequireJWT 即为有效，字段为前端轮询保留
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub struct TokenVerificationResponse {
    pub is_valid: bool,
}
