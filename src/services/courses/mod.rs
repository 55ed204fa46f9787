pub mod create;
pub mod delete;
pub mod enroll;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::courses::requests::{
    CourseQueryParams, CreateCourseRequest, EnrollCourseRequest, UpdateCourseRequest,
};
use crate::models::courses::responses::CourseInstructor;
use crate::models::users::entities::User;
use crate::storage::Storage;

/// 课程服务：课程生命周期与选课、退课
pub struct CourseService;

impl CourseService {
    pub fn new_lazy() -> Self {
        Self
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        super::storage_from_request(request)
    }

    // 按角色列出课程
    pub async fn list_courses(
        &self,
        request: &HttpRequest,
        query: CourseQueryParams,
    ) -> ActixResult<HttpResponse> {
        list::list_courses(self, request, query).await
    }

    // 学生已选课程
    pub async fn enrolled_courses(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::enrolled_courses(self, request).await
    }

    // 创建课程
    pub async fn create_course(
        &self,
        request: &HttpRequest,
        course_data: CreateCourseRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_course(self, request, course_data).await
    }

    // 根据课程 ID 获取课程信息
    pub async fn get_course(
        &self,
        request: &HttpRequest,
        course_id: i64,
    ) -> ActixResult<HttpResponse> {
        get::get_course(self, request, course_id).await
    }

    // 更新课程信息
    pub async fn update_course(
        &self,
        request: &HttpRequest,
        course_id: i64,
        update_data: UpdateCourseRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_course(self, request, course_id, update_data).await
    }

    // 删除课程及其级联数据
    pub async fn delete_course(
        &self,
        request: &HttpRequest,
        course_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_course(self, request, course_id).await
    }

    // 学生凭选课码选课
    pub async fn enroll_course(
        &self,
        request: &HttpRequest,
        enroll_data: EnrollCourseRequest,
    ) -> ActixResult<HttpResponse> {
        enroll::enroll_course(self, request, enroll_data).await
    }

    // 学生退课
    pub async fn unenroll_course(
        &self,
        request: &HttpRequest,
        course_id: i64,
    ) -> ActixResult<HttpResponse> {
        enroll::unenroll_course(self, request, course_id).await
    }
}

// 课程响应中的教师摘要
pub(crate) fn instructor_info(user: &User) -> CourseInstructor {
    CourseInstructor {
        id: user.id,
        username: user.username.clone(),
        display_name: user.display_name.clone(),
    }
}
