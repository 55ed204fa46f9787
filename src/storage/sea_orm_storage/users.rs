//! 用户存储操作

use super::SeaOrmStorage;
use crate::entity::users::{ActiveModel, Column, Entity as Users};
use crate::errors::{CourseHubError, Result};
use crate::models::users::{
    entities::{User, UserStatus},
    requests::RegisterRequest,
};
use sea_orm::sea_query::IntoCondition;
use sea_orm::{ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, Set};

impl SeaOrmStorage {
    /// 创建用户，req.password 此时已是 Argon2 哈希
    pub async fn create_user_impl(&self, req: RegisterRequest) -> Result<User> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            username: Set(req.username),
            email: Set(req.email),
            password_hash: Set(req.password),
            role: Set(req.role.to_string()),
            status: Set(UserStatus::Active.to_string()),
            display_name: Set(req.display_name),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("创建用户失败: {e}")))?;

        Ok(result.into_user())
    }

    // 单行查询共用，调用方只差过滤条件
    async fn find_user(&self, condition: impl IntoCondition) -> Result<Option<User>> {
        let result = Users::find()
            .filter(condition)
            .one(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("查询用户失败: {e}")))?;

        Ok(result.map(|m| m.into_user()))
    }

    pub async fn get_user_by_id_impl(&self, id: i64) -> Result<Option<User>> {
        self.find_user(Column::Id.eq(id)).await
    }

    pub async fn get_user_by_username_impl(&self, username: &str) -> Result<Option<User>> {
        self.find_user(Column::Username.eq(username)).await
    }

    pub async fn get_user_by_email_impl(&self, email: &str) -> Result<Option<User>> {
        self.find_user(Column::Email.eq(email)).await
    }

    /// 登录标识同时匹配用户名与邮箱
    pub async fn get_user_by_username_or_email_impl(
        &self,
        identifier: &str,
    ) -> Result<Option<User>> {
        self.find_user(
            Condition::any()
                .add(Column::Username.eq(identifier))
                .add(Column::Email.eq(identifier)),
        )
        .await
    }

    /// 批量获取用户，响应组装时一次取齐关联用户
    pub async fn get_users_by_ids_impl(&self, ids: &[i64]) -> Result<Vec<User>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let result = Users::find()
            .filter(Column::Id.is_in(ids.to_vec()))
            .all(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("批量查询用户失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_user()).collect())
    }

    /// 更新用户最后登录时间
    pub async fn update_last_login_impl(&self, id: i64) -> Result<bool> {
        let now = chrono::Utc::now().timestamp();

        let result = Users::update_many()
            .col_expr(Column::LastLogin, sea_orm::sea_query::Expr::value(now))
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| {
                CourseHubError::database_operation(format!("更新最后登录时间失败: {e}"))
            })?;

        Ok(result.rows_affected > 0)
    }
}
