//! 提交存储操作

use super::SeaOrmStorage;
use crate::entity::grades::Entity as Grades;
use crate::entity::submissions::{ActiveModel, Column, Entity as Submissions};
use crate::errors::{CourseHubError, Result};
use crate::models::submissions::{entities::Submission, requests::NewSubmission};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 创建提交，重复提交由唯一索引拒绝
    pub async fn create_submission_impl(&self, submission: NewSubmission) -> Result<Submission> {
        let model = ActiveModel {
            assignment_id: Set(submission.assignment_id),
            student_id: Set(submission.student_id),
            file_token: Set(submission.file_token),
            file_name: Set(submission.file_name),
            submitted_at: Set(submission.submitted_at.timestamp()),
            is_late: Set(submission.is_late),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("创建提交失败: {e}")))?;

        // 新提交必然未评分
        Ok(result.into_submission(None))
    }

    /// 通过 ID 获取提交（连带评分）
    pub async fn get_submission_by_id_impl(
        &self,
        submission_id: i64,
    ) -> Result<Option<Submission>> {
        let result = Submissions::find_by_id(submission_id)
            .find_also_related(Grades)
            .one(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("查询提交失败: {e}")))?;

        Ok(result.map(|(m, grade)| m.into_submission(grade)))
    }

    /// 获取学生在某作业下的提交
    pub async fn get_submission_by_assignment_and_student_impl(
        &self,
        assignment_id: i64,
        student_id: i64,
    ) -> Result<Option<Submission>> {
        let result = Submissions::find()
            .filter(Column::AssignmentId.eq(assignment_id))
            .filter(Column::StudentId.eq(student_id))
            .find_also_related(Grades)
            .one(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("查询提交失败: {e}")))?;

        Ok(result.map(|(m, grade)| m.into_submission(grade)))
    }

    /// 列出作业下全部提交，按提交时间降序
    pub async fn list_submissions_by_assignment_impl(
        &self,
        assignment_id: i64,
    ) -> Result<Vec<Submission>> {
        let result = Submissions::find()
            .filter(Column::AssignmentId.eq(assignment_id))
            .find_also_related(Grades)
            .order_by_desc(Column::SubmittedAt)
            .all(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("查询提交列表失败: {e}")))?;

        Ok(result
            .into_iter()
            .map(|(m, grade)| m.into_submission(grade))
            .collect())
    }

    /// 列出学生的全部提交，按提交时间降序
    pub async fn list_submissions_by_student_impl(
        &self,
        student_id: i64,
    ) -> Result<Vec<Submission>> {
        let result = Submissions::find()
            .filter(Column::StudentId.eq(student_id))
            .find_also_related(Grades)
            .order_by_desc(Column::SubmittedAt)
            .all(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("查询提交列表失败: {e}")))?;

        Ok(result
            .into_iter()
            .map(|(m, grade)| m.into_submission(grade))
            .collect())
    }

    /// 批量列出多个作业下的提交，可按学生过滤
    pub async fn list_submissions_by_assignments_impl(
        &self,
        assignment_ids: &[i64],
        student_id: Option<i64>,
    ) -> Result<Vec<Submission>> {
        if assignment_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut select =
            Submissions::find().filter(Column::AssignmentId.is_in(assignment_ids.to_vec()));

        if let Some(student_id) = student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }

        let result = select
            .find_also_related(Grades)
            .all(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("批量查询提交失败: {e}")))?;

        Ok(result
            .into_iter()
            .map(|(m, grade)| m.into_submission(grade))
            .collect())
    }

    /// 删除提交，评分记录级联删除
    pub async fn delete_submission_impl(&self, submission_id: i64) -> Result<bool> {
        let result = Submissions::delete_by_id(submission_id)
            .exec(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("删除提交失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
