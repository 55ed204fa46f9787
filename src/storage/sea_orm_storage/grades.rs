//! 评分存储操作

use super::SeaOrmStorage;
use crate::entity::grades::{ActiveModel, Column, Entity as Grades};
use crate::errors::{CourseHubError, Result};
use crate::models::submissions::entities::SubmissionGrade;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};

impl SeaOrmStorage {
    /// 写入或覆盖评分，submission_id 唯一约束保证每个提交至多一条
    pub async fn upsert_grade_impl(
        &self,
        submission_id: i64,
        grader_id: i64,
        score: f64,
        feedback: String,
    ) -> Result<SubmissionGrade> {
        let now = chrono::Utc::now().timestamp();

        let existing = Grades::find()
            .filter(Column::SubmissionId.eq(submission_id))
            .one(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("查询评分失败: {e}")))?;

        let result = match existing {
            Some(record) => {
                // 重复评分覆盖旧记录
                let model = ActiveModel {
                    id: Set(record.id),
                    grader_id: Set(grader_id),
                    score: Set(score),
                    feedback: Set(Some(feedback)),
                    graded_at: Set(now),
                    ..Default::default()
                };

                model
                    .update(&self.db)
                    .await
                    .map_err(|e| CourseHubError::database_operation(format!("更新评分失败: {e}")))?
            }
            None => {
                let model = ActiveModel {
                    submission_id: Set(submission_id),
                    grader_id: Set(grader_id),
                    score: Set(score),
                    feedback: Set(Some(feedback)),
                    graded_at: Set(now),
                    ..Default::default()
                };

                model
                    .insert(&self.db)
                    .await
                    .map_err(|e| CourseHubError::database_operation(format!("创建评分失败: {e}")))?
            }
        };

        Ok(result.into_submission_grade())
    }
}
