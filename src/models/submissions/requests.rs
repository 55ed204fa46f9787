use serde::Deserialize;
use ts_rs::TS;

// 创建提交请求，文件需先经文件接口上传换取 file_token
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct CreateSubmissionRequest {
    pub assignment_id: i64,
    pub file_token: String,
}

// 评分请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct GradeSubmissionRequest {
    pub score: f64,
    pub feedback: Option<String>,
}

// 用于存储层：服务层已算好迟交标记，提交时间与判定基准必须一致
#[derive(Debug, Clone)]
pub struct NewSubmission {
    pub assignment_id: i64,
    pub student_id: i64,
    pub file_token: String,
    pub file_name: String,
    pub submitted_at: chrono::DateTime<chrono::Utc>,
    pub is_late: bool,
}
