use super::entities::Material;
use serde::Serialize;
use ts_rs::TS;

// 资料上传者信息
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/material.ts")]
pub struct MaterialUploader {
    pub id: i64,
    pub username: String,
    pub display_name: String,
}

// 资料列表条目
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/material.ts")]
pub struct MaterialListItem {
    #[serde(flatten)]
    #[ts(flatten)]
    pub material: Material,
    pub uploader: Option<MaterialUploader>,
}

// 资料列表响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/material.ts")]
pub struct MaterialListResponse {
    pub items: Vec<MaterialListItem>,
}
