use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 提交记录，(assignment_id, student_id) 全局唯一
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct Submission {
    pub id: i64,
    pub assignment_id: i64,
    pub student_id: i64,
    /// 指向 files 表的下载令牌
    pub file_token: String,
    pub file_name: String,
    pub submitted_at: chrono::DateTime<chrono::Utc>,
    /// 迟交标记，提交时与截止时间比较后冻结
    pub is_late: bool,
    /// None 即未评分
    pub grade: Option<SubmissionGrade>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct SubmissionGrade {
    /// 0 <= score <= 作业满分
    pub score: f64,
    pub feedback: String,
    pub graded_at: chrono::DateTime<chrono::Utc>,
    pub graded_by: i64,
}

impl Submission {
    pub fn is_graded(&self) -> bool {
        self.grade.is_some()
    }
}
