use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct Assignment {
    pub id: i64,
    pub course_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub due_date: chrono::DateTime<chrono::Utc>,
    /// 满分分值，评分时的上限
    pub max_points: f64,
    pub created_by: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Assignment {
    /// 严格晚于截止时间才算迟交，踩点提交不算
    pub fn is_past_due(&self, at: chrono::DateTime<chrono::Utc>) -> bool {
        at > self.due_date
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn assignment_due(due_date: chrono::DateTime<chrono::Utc>) -> Assignment {
        Assignment {
            id: 1,
            course_id: 1,
            title: "作业".to_string(),
            description: None,
            due_date,
            max_points: 100.0,
            created_by: 10,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_submission_at_deadline_is_not_late() {
        let due = Utc::now();
        let assignment = assignment_due(due);
        assert!(!assignment.is_past_due(due));
    }

    #[test]
    fn test_submission_after_deadline_is_late() {
        let due = Utc::now();
        let assignment = assignment_due(due);
        assert!(assignment.is_past_due(due + Duration::seconds(1)));
        assert!(!assignment.is_past_due(due - Duration::seconds(1)));
    }
}
