use super::entities::Assignment;
use crate::models::submissions::entities::Submission;
use serde::Serialize;
use ts_rs::TS;

// 作业创建者信息
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct AssignmentCreator {
    pub id: i64,
    pub username: String,
    pub display_name: String,
}

// 作业所属课程信息
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct AssignmentCourseInfo {
    pub id: i64,
    pub name: String,
    pub code: String,
}

// 作业列表条目（教师视角）
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct AssignmentListItem {
    #[serde(flatten)]
    #[ts(flatten)]
    pub assignment: Assignment,
    pub creator: Option<AssignmentCreator>,
}

// 作业列表条目（学生视角，附带本人提交状态）
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct AssignmentWithStatus {
    #[serde(flatten)]
    #[ts(flatten)]
    pub assignment: Assignment,
    pub creator: Option<AssignmentCreator>,
    pub has_submitted: bool,
    pub submission: Option<Submission>,
}

// 作业详情响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct AssignmentDetail {
    #[serde(flatten)]
    #[ts(flatten)]
    pub assignment: Assignment,
    pub creator: Option<AssignmentCreator>,
    pub course: Option<AssignmentCourseInfo>,
}
