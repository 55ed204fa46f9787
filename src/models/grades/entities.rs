use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 等级制成绩，未产生任何评分时为 N/A
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub enum LetterGrade {
    A,
    B,
    C,
    D,
    F,
    #[serde(rename = "N/A")]
    NotApplicable,
}

impl std::fmt::Display for LetterGrade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            LetterGrade::A => "A",
            LetterGrade::B => "B",
            LetterGrade::C => "C",
            LetterGrade::D => "D",
            LetterGrade::F => "F",
            LetterGrade::NotApplicable => "N/A",
        };
        write!(f, "{s}")
    }
}

// 成绩汇总，由纯折叠计算得出
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct GradeSummary {
    // 课程作业满分合计
    pub total_points: f64,
    // 已评分提交得分合计
    pub earned_points: f64,
    // 百分比，保留两位小数
    pub percentage: f64,
    // 等级制成绩
    pub letter_grade: LetterGrade,
    // 作业总数
    pub total_assignments: i64,
    // 已提交数
    pub submitted_assignments: i64,
    // 已评分数
    pub graded_assignments: i64,
}
