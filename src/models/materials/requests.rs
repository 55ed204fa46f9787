use serde::Deserialize;
use ts_rs::TS;

// 上传资料请求，文件需先经文件接口上传换取 file_token
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/material.ts")]
pub struct CreateMaterialRequest {
    pub course_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub file_token: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

// 更新资料请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/material.ts")]
pub struct UpdateMaterialRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub tags: Option<Vec<String>>,
}
