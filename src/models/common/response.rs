use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::ErrorCode;

// 统一的API响应结构
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/api.ts")]
pub struct ApiResponse<T: TS> {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl<T: TS> ApiResponse<T> {
    fn assemble(code: ErrorCode, message: impl Into<String>, data: Option<T>) -> Self {
        Self {
            code: code as i32,
            message: message.into(),
            data,
            timestamp: chrono::Utc::now(),
        }
    }

    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self::assemble(ErrorCode::Success, message, Some(data))
    }
}

impl ApiResponse<()> {
    pub fn success_empty(message: impl Into<String>) -> Self {
        Self::assemble(ErrorCode::Success, message, None)
    }

    pub fn error_empty(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::assemble(code, message, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_carries_data_and_zero_code() {
        let response = ApiResponse::success(vec![1, 2, 3], "ok");
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["code"], 0);
        assert_eq!(json["data"], serde_json::json!([1, 2, 3]));
    }

    #[test]
    fn test_empty_responses_omit_data_field() {
        let response = ApiResponse::error_empty(ErrorCode::CourseNotFound, "课程不存在");
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["code"], ErrorCode::CourseNotFound as i32);
        assert!(json.get("data").is_none());
        assert!(json.get("timestamp").is_some());
    }
}
