pub mod aggregate;
pub mod grade_book;
pub mod my_grades;
pub mod overview;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::storage::Storage;

/// 成绩服务：学生成绩视图与教师成绩册，均为已评分提交的聚合
pub struct GradeService;

impl GradeService {
    pub fn new_lazy() -> Self {
        Self
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        super::storage_from_request(request)
    }

    /// 当前学生的全课程成绩概览
    pub async fn my_overview(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        overview::my_overview(self, request).await
    }

    /// 当前学生在某课程的成绩明细
    pub async fn my_course_grades(
        &self,
        request: &HttpRequest,
        course_id: i64,
    ) -> ActixResult<HttpResponse> {
        my_grades::my_course_grades(self, request, course_id).await
    }

    /// 课程成绩册（教师视角）
    pub async fn course_grade_book(
        &self,
        request: &HttpRequest,
        course_id: i64,
    ) -> ActixResult<HttpResponse> {
        grade_book::course_grade_book(self, request, course_id).await
    }
}
