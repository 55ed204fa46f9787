pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::assignments::requests::{CreateAssignmentRequest, UpdateAssignmentRequest};
use crate::models::assignments::responses::AssignmentCreator;
use crate::models::users::entities::User;
use crate::storage::Storage;

/// 作业服务：作业的发布、查询与维护
pub struct AssignmentService;

impl AssignmentService {
    pub fn new_lazy() -> Self {
        Self
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        super::storage_from_request(request)
    }

    // 发布作业
    pub async fn create_assignment(
        &self,
        request: &HttpRequest,
        assignment_data: CreateAssignmentRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_assignment(self, request, assignment_data).await
    }

    // 列出课程内作业，学生视角附带本人提交状态
    pub async fn list_assignments(
        &self,
        request: &HttpRequest,
        course_id: i64,
    ) -> ActixResult<HttpResponse> {
        list::list_assignments(self, request, course_id).await
    }

    // 根据作业 ID 获取作业详情
    pub async fn get_assignment(
        &self,
        request: &HttpRequest,
        assignment_id: i64,
    ) -> ActixResult<HttpResponse> {
        get::get_assignment(self, request, assignment_id).await
    }

    // 更新作业信息
    pub async fn update_assignment(
        &self,
        request: &HttpRequest,
        assignment_id: i64,
        update_data: UpdateAssignmentRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_assignment(self, request, assignment_id, update_data).await
    }

    // 删除作业及其提交
    pub async fn delete_assignment(
        &self,
        request: &HttpRequest,
        assignment_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_assignment(self, request, assignment_id).await
    }
}

// 作业响应中的创建者摘要
pub(crate) fn creator_info(user: &User) -> AssignmentCreator {
    AssignmentCreator {
        id: user.id,
        username: user.username.clone(),
        display_name: user.display_name.clone(),
    }
}
