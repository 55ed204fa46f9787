/*!
 * 固定窗口速率限制中间件
 *
 * 以进程内 moka 计数器实现每分钟固定窗口限流，键为
 * `{端点前缀}:{user:ID 或 ip:地址}`：已认证请求按用户限流，
 * 匿名请求（登录、注册）按客户端 IP 限流。超限返回 429 与 Retry-After。
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage, HttpResponse,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
    http::header::CONTENT_TYPE,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use moka::future::Cache;
use once_cell::sync::Lazy;
use std::rc::Rc;
use std::time::Duration;
use tracing::warn;

use crate::models::{ApiResponse, ErrorCode, users::entities::User};

/// 窗口长度，计数器随缓存条目一起过期
const WINDOW_SECS: u64 = 60;

static RATE_LIMIT_CACHE: Lazy<Cache<String, u32>> = Lazy::new(|| {
    Cache::builder()
        .time_to_live(Duration::from_secs(WINDOW_SECS))
        .max_capacity(100_000)
        .build()
});

/// 速率限制配置，一个实例对应一类端点
#[derive(Clone)]
pub struct RateLimit {
    max_per_minute: u32,
    key_prefix: &'static str,
}

impl RateLimit {
    fn per_minute(max_per_minute: u32, key_prefix: &'static str) -> Self {
        Self {
            max_per_minute,
            key_prefix,
        }
    }

    /// 登录：5次/分钟，防撞库
    pub fn login() -> Self {
        Self::per_minute(5, "login")
    }

    /// 注册：3次/分钟，防批量建号
    pub fn register() -> Self {
        Self::per_minute(3, "register")
    }

    /// 刷新令牌：10次/分钟
    pub fn refresh_token() -> Self {
        Self::per_minute(10, "refresh")
    }

    /// 选课：10次/分钟，防选课码暴力枚举
    pub fn enroll() -> Self {
        Self::per_minute(10, "enroll")
    }

    /// 文件上传：10次/分钟
    pub fn file_upload() -> Self {
        Self::per_minute(10, "upload")
    }
}

fn is_valid_ip(ip: &str) -> bool {
    use std::net::IpAddr;
    ip.parse::<IpAddr>().is_ok()
}

/// 提取客户端 IP：连接对端优先，其次 X-Forwarded-For 首项，再次 X-Real-IP。
/// 转发头只有在可信反向代理后面才可靠，解析前先做格式校验。
fn extract_client_ip(req: &ServiceRequest) -> String {
    let connection_ip = req
        .connection_info()
        .realip_remote_addr()
        .map(|s| s.to_string());

    if let Some(ref ip) = connection_ip
        && is_valid_ip(ip)
    {
        return ip.clone();
    }

    if let Some(forwarded) = req.headers().get("X-Forwarded-For")
        && let Ok(value) = forwarded.to_str()
        && let Some(ip) = value.split(',').next()
    {
        let ip = ip.trim();
        if is_valid_ip(ip) {
            return ip.to_string();
        }
    }

    if let Some(real_ip) = req.headers().get("X-Real-IP")
        && let Ok(ip) = real_ip.to_str()
    {
        let ip = ip.trim();
        if is_valid_ip(ip) {
            return ip.to_string();
        }
    }

    connection_ip.unwrap_or_else(|| "unknown".to_string())
}

/// 限流键：已认证请求按用户，匿名请求按 IP
fn limit_key(prefix: &str, req: &ServiceRequest) -> String {
    let identity = req
        .extensions()
        .get::<User>()
        .map(|user| format!("user:{}", user.id))
        .unwrap_or_else(|| format!("ip:{}", extract_client_ip(req)));
    format!("{prefix}:{identity}")
}

fn too_many_requests() -> HttpResponse {
    HttpResponse::build(StatusCode::TOO_MANY_REQUESTS)
        .insert_header((CONTENT_TYPE, "application/json; charset=utf-8"))
        .insert_header(("Retry-After", WINDOW_SECS.to_string()))
        .insert_header(("X-RateLimit-Remaining", "0"))
        .json(ApiResponse::<()>::error_empty(
            ErrorCode::RateLimitExceeded,
            "请求过于频繁，请稍后再试",
        ))
}

impl<S, B> Transform<S, ServiceRequest> for RateLimit
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RateLimitMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RateLimitMiddleware {
            service: Rc::new(service),
            max_per_minute: self.max_per_minute,
            key_prefix: self.key_prefix,
        }))
    }
}

pub struct RateLimitMiddleware<S> {
    service: Rc<S>,
    max_per_minute: u32,
    key_prefix: &'static str,
}

impl<S, B> Service<ServiceRequest> for RateLimitMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        let max_per_minute = self.max_per_minute;
        let key_prefix = self.key_prefix;

        Box::pin(async move {
            let cache_key = limit_key(key_prefix, &req);

            let current = RATE_LIMIT_CACHE.get(&cache_key).await.unwrap_or(0);
            if current >= max_per_minute {
                warn!(
                    "Rate limit exceeded for {} ({}/{})",
                    cache_key, current, max_per_minute
                );
                return Ok(req.into_response(too_many_requests().map_into_right_body()));
            }

            RATE_LIMIT_CACHE.insert(cache_key, current + 1).await;

            let res = srv.call(req).await?.map_into_left_body();
            Ok(res)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limit_presets() {
        let login = RateLimit::login();
        assert_eq!(login.max_per_minute, 5);
        assert_eq!(login.key_prefix, "login");

        let register = RateLimit::register();
        assert_eq!(register.max_per_minute, 3);

        let enroll = RateLimit::enroll();
        assert_eq!(enroll.max_per_minute, 10);
        assert_eq!(enroll.key_prefix, "enroll");

        let upload = RateLimit::file_upload();
        assert_eq!(upload.max_per_minute, 10);
    }

    #[test]
    fn test_ip_validation() {
        assert!(is_valid_ip("127.0.0.1"));
        assert!(is_valid_ip("::1"));
        assert!(!is_valid_ip("not-an-ip"));
        assert!(!is_valid_ip("999.1.1.1"));
    }
}
