use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 已上传文件的业务视图
#[derive(Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/file.ts")]
pub struct File {
    /// 既是下载凭据也是磁盘文件名
    pub download_token: String,
    pub file_name: String,
    /// 字节数
    pub file_size: i64,
    /// 上传时客户端报的 MIME 类型，仅存档展示用
    pub file_type: String,
    pub uploaded_at: chrono::DateTime<chrono::Utc>,
    pub user_id: i64,
}
