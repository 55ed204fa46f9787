use super::entities::GradeSummary;
use crate::models::submissions::entities::SubmissionGrade;
use serde::Serialize;
use ts_rs::TS;

// 成绩视图中的课程信息
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct GradeCourseInfo {
    pub id: i64,
    pub name: String,
    pub code: String,
}

// 成绩视图中的作业信息
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct GradeAssignmentInfo {
    pub id: i64,
    pub title: String,
    pub due_date: chrono::DateTime<chrono::Utc>,
    pub max_points: f64,
}

// 成绩视图中的提交信息
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct GradeSubmissionInfo {
    pub id: i64,
    pub submitted_at: chrono::DateTime<chrono::Utc>,
    pub is_late: bool,
    pub grade: Option<SubmissionGrade>,
}

// 单个作业的成绩明细（学生视角），submission 为 None 即未提交
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct AssignmentGradeDetail {
    pub assignment: GradeAssignmentInfo,
    pub submission: Option<GradeSubmissionInfo>,
}

// 我的单课程成绩响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct MyCourseGradesResponse {
    pub course: GradeCourseInfo,
    pub summary: GradeSummary,
    pub grades: Vec<AssignmentGradeDetail>,
}

// 成绩册中的学生信息
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct GradeBookStudent {
    pub id: i64,
    pub username: String,
    pub display_name: String,
    pub email: String,
}

// 成绩册单元格，每个学生对每个作业一格
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct GradeBookCell {
    pub assignment_id: i64,
    pub assignment_title: String,
    pub max_points: f64,
    pub score: Option<f64>,
    pub submitted: bool,
    pub is_late: bool,
}

// 成绩册学生行
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct GradeBookRow {
    pub student: GradeBookStudent,
    pub grades: Vec<GradeBookCell>,
    pub summary: GradeSummary,
}

// 课程成绩册响应（教师视角）
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct GradeBookResponse {
    pub course: GradeCourseInfo,
    pub assignments: Vec<GradeAssignmentInfo>,
    pub grade_book: Vec<GradeBookRow>,
}

// 单课程成绩概览
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct CourseGradeOverview {
    pub course: GradeCourseInfo,
    pub summary: GradeSummary,
}

// 全部课程成绩概览响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct GradesOverviewResponse {
    pub items: Vec<CourseGradeOverview>,
}
