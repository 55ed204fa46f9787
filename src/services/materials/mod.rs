pub mod create;
pub mod delete;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::materials::requests::{CreateMaterialRequest, UpdateMaterialRequest};
use crate::models::materials::responses::MaterialUploader;
use crate::models::users::entities::User;
use crate::storage::Storage;

/// 课程资料服务：资料条目的增删改查，文件本体走文件服务
pub struct MaterialService;

impl MaterialService {
    pub fn new_lazy() -> Self {
        Self
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        super::storage_from_request(request)
    }

    // 上传课程资料
    pub async fn create_material(
        &self,
        request: &HttpRequest,
        material_data: CreateMaterialRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_material(self, request, material_data).await
    }

    // 列出课程内资料
    pub async fn list_materials(
        &self,
        request: &HttpRequest,
        course_id: i64,
    ) -> ActixResult<HttpResponse> {
        list::list_materials(self, request, course_id).await
    }

    // 更新资料信息
    pub async fn update_material(
        &self,
        request: &HttpRequest,
        material_id: i64,
        update_data: UpdateMaterialRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_material(self, request, material_id, update_data).await
    }

    // 删除资料及其文件
    pub async fn delete_material(
        &self,
        request: &HttpRequest,
        material_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_material(self, request, material_id).await
    }
}

// 资料响应中的上传者摘要
pub(crate) fn uploader_info(user: &User) -> MaterialUploader {
    MaterialUploader {
        id: user.id,
        username: user.username.clone(),
        display_name: user.display_name.clone(),
    }
}
