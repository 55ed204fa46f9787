//! 文件实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "files")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub download_token: String,
    pub file_name: String,
    pub file_size: i64,
    pub file_type: String,
    pub uploaded_at: i64,
    pub user_id: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    User,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_file(self) -> crate::models::files::entities::File {
        use crate::models::files::entities::File;

        File {
            download_token: self.download_token,
            file_name: self.file_name,
            file_size: self.file_size,
            file_type: self.file_type,
            uploaded_at: super::datetime_from_epoch(self.uploaded_at),
            user_id: self.user_id,
        }
    }
}
