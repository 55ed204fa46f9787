use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/material.ts")]
pub struct Material {
    pub id: i64,
    pub course_id: i64,
    pub title: String,
    pub description: Option<String>,
    /// 指向 files 表的下载令牌
    pub file_token: String,
    pub file_name: String,
    pub file_type: String,
    pub tags: Vec<String>,
    pub uploaded_by: i64,
    pub uploaded_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
