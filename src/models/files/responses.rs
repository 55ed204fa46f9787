use serde::Serialize;
use ts_rs::TS;

/// 上传成功后返回给前端的文件摘要，
/// download_token 随后用于资料、提交等处的文件引用
#[derive(Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/file.ts")]
pub struct FileUploadResponse {
    pub download_token: String,
    pub file_name: String,
    pub size: i64,
    pub content_type: String,
    pub uploaded_at: chrono::DateTime<chrono::Utc>,
}
