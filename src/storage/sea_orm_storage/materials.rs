//! 课程资料存储操作

use super::SeaOrmStorage;
use crate::entity::materials::{ActiveModel, Column, Entity as Materials};
use crate::errors::{CourseHubError, Result};
use crate::models::materials::{
    entities::Material,
    requests::{CreateMaterialRequest, UpdateMaterialRequest},
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 上传课程资料，tags 列存 JSON 数组字符串
    pub async fn create_material_impl(
        &self,
        uploaded_by: i64,
        req: CreateMaterialRequest,
        file_name: String,
        file_type: String,
    ) -> Result<Material> {
        let now = chrono::Utc::now().timestamp();
        let tags = serde_json::to_string(&req.tags)
            .map_err(|e| CourseHubError::serialization(format!("序列化资料标签失败: {e}")))?;

        let model = ActiveModel {
            course_id: Set(req.course_id),
            uploaded_by: Set(uploaded_by),
            title: Set(req.title),
            description: Set(req.description),
            file_token: Set(req.file_token),
            file_name: Set(file_name),
            file_type: Set(file_type),
            tags: Set(Some(tags)),
            uploaded_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("创建资料失败: {e}")))?;

        Ok(result.into_material())
    }

    /// 通过 ID 获取资料
    pub async fn get_material_by_id_impl(&self, material_id: i64) -> Result<Option<Material>> {
        let result = Materials::find_by_id(material_id)
            .one(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("查询资料失败: {e}")))?;

        Ok(result.map(|m| m.into_material()))
    }

    /// 列出课程内全部资料，按上传时间降序
    pub async fn list_materials_by_course_impl(&self, course_id: i64) -> Result<Vec<Material>> {
        let result = Materials::find()
            .filter(Column::CourseId.eq(course_id))
            .order_by_desc(Column::UploadedAt)
            .all(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("查询资料列表失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_material()).collect())
    }

    /// 更新资料信息
    pub async fn update_material_impl(
        &self,
        material_id: i64,
        update: UpdateMaterialRequest,
    ) -> Result<Option<Material>> {
        // 先检查资料是否存在
        let existing = self.get_material_by_id_impl(material_id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        let mut model = ActiveModel {
            id: Set(material_id),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(title) = update.title {
            model.title = Set(title);
        }

        if let Some(description) = update.description {
            model.description = Set(Some(description));
        }

        if let Some(tags) = update.tags {
            let raw = serde_json::to_string(&tags)
                .map_err(|e| CourseHubError::serialization(format!("序列化资料标签失败: {e}")))?;
            model.tags = Set(Some(raw));
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("更新资料失败: {e}")))?;

        self.get_material_by_id_impl(material_id).await
    }

    /// 删除资料记录
    pub async fn delete_material_impl(&self, material_id: i64) -> Result<bool> {
        let result = Materials::delete_by_id(material_id)
            .exec(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("删除资料失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
