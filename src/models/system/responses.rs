use serde::Serialize;
use ts_rs::TS;

/// 系统运行状态响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/system.ts")]
pub struct SystemStatusResponse {
    pub status: String,
    pub version: String,
    // 距离进程启动的秒数
    pub uptime_seconds: i64,
}
