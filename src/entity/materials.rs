//! 课程资料实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "materials")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub course_id: i64,
    pub uploaded_by: i64,
    pub title: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub file_token: String,
    pub file_name: String,
    pub file_type: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub tags: Option<String>,
    pub uploaded_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::courses::Entity",
        from = "Column::CourseId",
        to = "super::courses::Column::Id"
    )]
    Course,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UploadedBy",
        to = "super::users::Column::Id"
    )]
    Uploader,
}

impl Related<super::courses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Uploader.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// tags 列存 JSON 数组字符串
impl Model {
    pub fn into_material(self) -> crate::models::materials::entities::Material {
        use crate::models::materials::entities::Material;

        Material {
            id: self.id,
            course_id: self.course_id,
            title: self.title,
            description: self.description,
            file_token: self.file_token,
            file_name: self.file_name,
            file_type: self.file_type,
            tags: self
                .tags
                .as_deref()
                .and_then(|raw| serde_json::from_str::<Vec<String>>(raw).ok())
                .unwrap_or_default(),
            uploaded_by: self.uploaded_by,
            uploaded_at: super::datetime_from_epoch(self.uploaded_at),
            updated_at: super::datetime_from_epoch(self.updated_at),
        }
    }
}
