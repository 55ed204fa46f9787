use super::entities::Course;
use crate::models::common::PaginationInfo;
use serde::Serialize;
use ts_rs::TS;

// 授课教师信息
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct CourseInstructor {
    pub id: i64,
    pub username: String,
    pub display_name: String,
}

// 花名册条目
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct RosterEntry {
    pub id: i64,
    pub username: String,
    pub display_name: String,
    pub email: String,
    pub enrolled_at: chrono::DateTime<chrono::Utc>,
}

// 课程条目，学生视角不携带花名册
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct CourseItem {
    #[serde(flatten)]
    #[ts(flatten)]
    pub course: Course,
    pub instructor: Option<CourseInstructor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub students: Option<Vec<RosterEntry>>,
}

// 课程列表响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct CourseListResponse {
    pub items: Vec<CourseItem>,
    pub pagination: PaginationInfo,
}

// 已选课程列表响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct EnrolledCoursesResponse {
    pub items: Vec<CourseItem>,
}
