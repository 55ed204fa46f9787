//! 课程存储操作

use super::SeaOrmStorage;
use crate::entity::courses::{ActiveModel, Column, Entity as Courses};
use crate::errors::{CourseHubError, Result};
use crate::models::{
    PaginationInfo,
    courses::{
        entities::Course,
        requests::{CourseListQuery, CreateCourseRequest, UpdateCourseRequest},
    },
};
use crate::utils::escape_like_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set,
};

impl SeaOrmStorage {
    /// 创建课程，选课码唯一约束冲突由调用方识别处理
    pub async fn create_course_impl(
        &self,
        instructor_id: i64,
        req: CreateCourseRequest,
    ) -> Result<Course> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            instructor_id: Set(instructor_id),
            name: Set(req.name),
            description: Set(req.description),
            code: Set(req.code),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("创建课程失败: {e}")))?;

        Ok(result.into_course())
    }

    /// 通过 ID 获取课程
    pub async fn get_course_by_id_impl(&self, course_id: i64) -> Result<Option<Course>> {
        let result = Courses::find_by_id(course_id)
            .one(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("查询课程失败: {e}")))?;

        Ok(result.map(|m| m.into_course()))
    }

    /// 通过选课码获取课程
    pub async fn get_course_by_code_impl(&self, code: &str) -> Result<Option<Course>> {
        let result = Courses::find()
            .filter(Column::Code.eq(code))
            .one(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("查询课程失败: {e}")))?;

        Ok(result.map(|m| m.into_course()))
    }

    /// 批量获取课程
    pub async fn get_courses_by_ids_impl(&self, ids: &[i64]) -> Result<Vec<Course>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let result = Courses::find()
            .filter(Column::Id.is_in(ids.to_vec()))
            .all(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("批量查询课程失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_course()).collect())
    }

    /// 分页列出课程
    pub async fn list_courses_with_pagination_impl(
        &self,
        query: CourseListQuery,
    ) -> Result<(Vec<Course>, PaginationInfo)> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query
            .size
            .unwrap_or(crate::models::common::DEFAULT_PAGE_SIZE)
            .clamp(1, crate::models::common::MAX_PAGE_SIZE) as u64;

        let mut select = Courses::find();

        // 教师只看自己开设的课程
        if let Some(instructor_id) = query.instructor_id {
            select = select.filter(Column::InstructorId.eq(instructor_id));
        }

        // 搜索条件
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(
                Condition::any()
                    .add(Column::Name.contains(&escaped))
                    .add(Column::Code.contains(&escaped)),
            );
        }

        // 排序
        select = select.order_by_desc(Column::CreatedAt);

        // 分页查询
        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| CourseHubError::database_operation(format!("查询课程总数失败: {e}")))?;

        let courses = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("查询课程列表失败: {e}")))?;

        Ok((
            courses.into_iter().map(|m| m.into_course()).collect(),
            PaginationInfo::new(page as i64, size as i64, total as i64),
        ))
    }

    /// 更新课程信息
    pub async fn update_course_impl(
        &self,
        course_id: i64,
        update: UpdateCourseRequest,
    ) -> Result<Option<Course>> {
        // 先检查课程是否存在
        let existing = self.get_course_by_id_impl(course_id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        let mut model = ActiveModel {
            id: Set(course_id),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(name) = update.name {
            model.name = Set(name);
        }

        if let Some(description) = update.description {
            model.description = Set(Some(description));
        }

        if let Some(code) = update.code {
            model.code = Set(code);
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("更新课程失败: {e}")))?;

        self.get_course_by_id_impl(course_id).await
    }

    /// 删除课程，选课、作业、提交、资料记录级联删除
    pub async fn delete_course_impl(&self, course_id: i64) -> Result<bool> {
        let result = Courses::delete_by_id(course_id)
            .exec(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("删除课程失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
