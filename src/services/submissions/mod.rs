pub mod create;
pub mod delete;
pub mod detail;
pub mod grade;
pub mod list;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::submissions::requests::{CreateSubmissionRequest, GradeSubmissionRequest};
use crate::models::submissions::responses::SubmissionStudent;
use crate::models::users::entities::User;
use crate::storage::Storage;

/// 提交服务：学生提交作业、教师批改评分
pub struct SubmissionService;

impl SubmissionService {
    pub fn new_lazy() -> Self {
        Self
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        super::storage_from_request(request)
    }

    /// 创建提交
    pub async fn create_submission(
        &self,
        request: &HttpRequest,
        submission_data: CreateSubmissionRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_submission(self, request, submission_data).await
    }

    /// 获取提交详情
    pub async fn get_submission(
        &self,
        request: &HttpRequest,
        submission_id: i64,
    ) -> ActixResult<HttpResponse> {
        detail::get_submission(self, request, submission_id).await
    }

    /// 列出作业下的全部提交（教师视角）
    pub async fn list_by_assignment(
        &self,
        request: &HttpRequest,
        assignment_id: i64,
    ) -> ActixResult<HttpResponse> {
        list::list_by_assignment(self, request, assignment_id).await
    }

    /// 列出当前学生的全部提交
    pub async fn my_submissions(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::my_submissions(self, request).await
    }

    /// 评分，重复评分覆盖旧记录
    pub async fn grade_submission(
        &self,
        request: &HttpRequest,
        submission_id: i64,
        grade_data: GradeSubmissionRequest,
    ) -> ActixResult<HttpResponse> {
        grade::grade_submission(self, request, submission_id, grade_data).await
    }

    /// 撤回提交
    pub async fn delete_submission(
        &self,
        request: &HttpRequest,
        submission_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_submission(self, request, submission_id).await
    }
}

pub(crate) fn student_info(user: &User) -> SubmissionStudent {
    SubmissionStudent {
        id: user.id,
        username: user.username.clone(),
        display_name: user.display_name.clone(),
        email: user.email.clone(),
    }
}
