//! 文件存储操作

use super::SeaOrmStorage;
use crate::entity::files::{ActiveModel, Entity as Files};
use crate::errors::{CourseHubError, Result};
use crate::models::files::entities::File;
use sea_orm::{ActiveModelTrait, EntityTrait, Set};

impl SeaOrmStorage {
    /// 落一条文件记录，download_token 即主键
    pub async fn upload_file_impl(
        &self,
        download_token: &str,
        file_name: &str,
        file_size: i64,
        file_type: &str,
        user_id: i64,
    ) -> Result<File> {
        let model = ActiveModel {
            download_token: Set(download_token.to_string()),
            file_name: Set(file_name.to_string()),
            file_size: Set(file_size),
            file_type: Set(file_type.to_string()),
            uploaded_at: Set(chrono::Utc::now().timestamp()),
            user_id: Set(user_id),
        };

        let stored = model
            .insert(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("上传文件记录失败: {e}")))?;

        Ok(stored.into_file())
    }

    pub async fn get_file_by_token_impl(&self, token: &str) -> Result<Option<File>> {
        let found = Files::find_by_id(token)
            .one(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("查询文件失败: {e}")))?;

        Ok(found.map(|m| m.into_file()))
    }

    /// 只删数据库记录，磁盘清理由调用方负责
    pub async fn delete_file_by_token_impl(&self, token: &str) -> Result<bool> {
        let result = Files::delete_by_id(token)
            .exec(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("删除文件记录失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
