use actix_web::{FromRequest, HttpRequest, HttpResponse, dev::Payload, error::InternalError};
use futures_util::future::{Ready, ready};

use crate::models::{ApiResponse, ErrorCode};

fn bad_request(message: &str) -> actix_web::Error {
    let response =
        HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::BadRequest, message));
    InternalError::from_response("invalid path parameter", response).into()
}

/// 生成安全的 i64 路径参数提取器
///
/// 解析失败或取值非正时直接以统一响应结构返回 400，
/// 处理函数拿到的 ID 一定是正整数。
macro_rules! safe_id_extractor {
    ($name:ident, $param:literal, $message:literal) => {
        #[derive(Debug, Clone, Copy)]
        pub struct $name(i64);

        impl $name {
            pub fn into_inner(self) -> i64 {
                self.0
            }
        }

        impl FromRequest for $name {
            type Error = actix_web::Error;
            type Future = Ready<Result<Self, Self::Error>>;

            fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
                let parsed = req
                    .match_info()
                    .get($param)
                    .and_then(|raw| raw.parse::<i64>().ok())
                    .filter(|id| *id > 0);

                ready(match parsed {
                    Some(id) => Ok($name(id)),
                    None => Err(bad_request($message)),
                })
            }
        }
    };
}

safe_id_extractor!(SafeCourseIdI64, "course_id", "无效的课程ID");
safe_id_extractor!(SafeAssignmentIdI64, "assignment_id", "无效的作业ID");
safe_id_extractor!(SafeSubmissionIdI64, "submission_id", "无效的提交ID");
safe_id_extractor!(SafeMaterialIdI64, "material_id", "无效的资料ID");

/// 文件令牌路径参数提取器，令牌必须是合法 UUID
#[derive(Debug, Clone)]
pub struct SafeFileToken(String);

impl SafeFileToken {
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl FromRequest for SafeFileToken {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let parsed = req
            .match_info()
            .get("file_token")
            .filter(|raw| uuid::Uuid::parse_str(raw).is_ok())
            .map(|raw| raw.to_string());

        ready(match parsed {
            Some(token) => Ok(SafeFileToken(token)),
            None => Err(bad_request("无效的文件令牌")),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[actix_web::test]
    async fn test_safe_course_id_accepts_positive() {
        let req = TestRequest::default()
            .param("course_id", "42")
            .to_http_request();
        let result = SafeCourseIdI64::from_request(&req, &mut Payload::None).await;
        assert_eq!(result.unwrap().into_inner(), 42);
    }

    #[actix_web::test]
    async fn test_safe_course_id_rejects_garbage() {
        for raw in ["abc", "0", "-3", "9999999999999999999999"] {
            let req = TestRequest::default()
                .param("course_id", raw.to_string())
                .to_http_request();
            let result = SafeCourseIdI64::from_request(&req, &mut Payload::None).await;
            assert!(result.is_err(), "{raw} should be rejected");
        }
    }

    #[actix_web::test]
    async fn test_safe_file_token_requires_uuid() {
        let req = TestRequest::default()
            .param("file_token", "550e8400-e29b-41d4-a716-446655440000")
            .to_http_request();
        assert!(
            SafeFileToken::from_request(&req, &mut Payload::None)
                .await
                .is_ok()
        );

        let req = TestRequest::default()
            .param("file_token", "../../etc/passwd")
            .to_http_request();
        assert!(
            SafeFileToken::from_request(&req, &mut Payload::None)
                .await
                .is_err()
        );
    }
}
