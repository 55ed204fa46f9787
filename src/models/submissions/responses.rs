use serde::Serialize;
use ts_rs::TS;

use super::entities::Submission;

/// 提交学生信息
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct SubmissionStudent {
    pub id: i64,
    pub username: String,
    pub display_name: String,
    pub email: String,
}

/// 提交关联的课程信息
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct SubmissionCourseInfo {
    pub id: i64,
    pub name: String,
    pub code: String,
}

/// 提交关联的作业信息
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct SubmissionAssignmentInfo {
    pub id: i64,
    pub title: String,
    pub due_date: chrono::DateTime<chrono::Utc>,
    pub max_points: f64,
    pub course: Option<SubmissionCourseInfo>,
}

/// 提交详情，按路由按需携带学生或作业信息
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct SubmissionDetail {
    #[serde(flatten)]
    #[ts(flatten)]
    pub submission: Submission,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student: Option<SubmissionStudent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignment: Option<SubmissionAssignmentInfo>,
}

/// 提交列表响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct SubmissionListResponse {
    pub items: Vec<SubmissionDetail>,
}
