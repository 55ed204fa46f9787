//! 选课存储操作

use std::collections::HashMap;

use super::SeaOrmStorage;
use crate::entity::courses::{Column as CourseColumn, Entity as Courses};
use crate::entity::enrollments::{ActiveModel, Column, Entity as Enrollments};
use crate::entity::users::{Column as UserColumn, Entity as Users};
use crate::errors::{CourseHubError, Result};
use crate::models::{
    courses::{entities::Course, responses::RosterEntry},
    enrollments::entities::Enrollment,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    /// 学生选课，重复选课由唯一索引拒绝
    pub async fn enroll_student_impl(&self, course_id: i64, student_id: i64) -> Result<Enrollment> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            course_id: Set(course_id),
            student_id: Set(student_id),
            enrolled_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("选课失败: {e}")))?;

        Ok(result.into_enrollment())
    }

    /// 学生退课
    pub async fn unenroll_student_impl(&self, course_id: i64, student_id: i64) -> Result<bool> {
        let result = Enrollments::delete_many()
            .filter(Column::CourseId.eq(course_id))
            .filter(Column::StudentId.eq(student_id))
            .exec(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("退课失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 查询学生是否已选课
    pub async fn is_enrolled_impl(&self, course_id: i64, student_id: i64) -> Result<bool> {
        let count = Enrollments::find()
            .filter(Column::CourseId.eq(course_id))
            .filter(Column::StudentId.eq(student_id))
            .count(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("查询选课记录失败: {e}")))?;

        Ok(count > 0)
    }

    /// 课程名册，按选课时间升序
    pub async fn list_course_roster_impl(&self, course_id: i64) -> Result<Vec<RosterEntry>> {
        let enrollments = Enrollments::find()
            .filter(Column::CourseId.eq(course_id))
            .order_by_asc(Column::EnrolledAt)
            .all(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("查询课程名册失败: {e}")))?;

        if enrollments.is_empty() {
            return Ok(Vec::new());
        }

        let student_ids: Vec<i64> = enrollments.iter().map(|e| e.student_id).collect();

        let users = Users::find()
            .filter(UserColumn::Id.is_in(student_ids))
            .all(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("查询名册用户失败: {e}")))?;

        let user_map: HashMap<i64, _> =
            users.into_iter().map(|m| (m.id, m.into_user())).collect();

        // 保持选课时间顺序组装名册
        Ok(enrollments
            .into_iter()
            .filter_map(|e| {
                let enrollment = e.into_enrollment();
                user_map.get(&enrollment.student_id).map(|user| RosterEntry {
                    id: user.id,
                    username: user.username.clone(),
                    display_name: user.display_name.clone(),
                    email: user.email.clone(),
                    enrolled_at: enrollment.enrolled_at,
                })
            })
            .collect())
    }

    /// 学生已选的全部课程
    pub async fn list_courses_by_student_impl(&self, student_id: i64) -> Result<Vec<Course>> {
        // 先查选课关联，再查课程
        let enrollments = Enrollments::find()
            .filter(Column::StudentId.eq(student_id))
            .all(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("查询选课关联失败: {e}")))?;

        let course_ids: Vec<i64> = enrollments.iter().map(|e| e.course_id).collect();

        if course_ids.is_empty() {
            return Ok(Vec::new());
        }

        let courses = Courses::find()
            .filter(CourseColumn::Id.is_in(course_ids))
            .order_by_desc(CourseColumn::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("查询已选课程失败: {e}")))?;

        Ok(courses.into_iter().map(|m| m.into_course()).collect())
    }
}
