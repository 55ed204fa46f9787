use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::users::entities::UserRole;
use crate::services::GradeService;
use crate::utils::SafeCourseIdI64;

static GRADE_SERVICE: Lazy<GradeService> = Lazy::new(GradeService::new_lazy);

// HTTP处理程序
pub async fn my_overview(req: HttpRequest) -> ActixResult<HttpResponse> {
    GRADE_SERVICE.my_overview(&req).await
}

pub async fn my_course_grades(
    req: HttpRequest,
    course_id: SafeCourseIdI64,
) -> ActixResult<HttpResponse> {
    GRADE_SERVICE
        .my_course_grades(&req, course_id.into_inner())
        .await
}

pub async fn course_grade_book(
    req: HttpRequest,
    course_id: SafeCourseIdI64,
) -> ActixResult<HttpResponse> {
    GRADE_SERVICE
        .course_grade_book(&req, course_id.into_inner())
        .await
}

pub fn configure_grades_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/grades")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("/my").route(
                    web::get()
                        .to(my_overview)
                        .wrap(middlewares::RequireRole::new(&UserRole::Student)),
                ),
            )
            .service(
                web::resource("/my/{course_id}").route(
                    web::get()
                        .to(my_course_grades)
                        .wrap(middlewares::RequireRole::new(&UserRole::Student)),
                ),
            )
            .service(
                // 成绩册，所有权在服务层校验
                web::resource("/course/{course_id}").route(
                    web::get()
                        .to(course_grade_book)
                        .wrap(middlewares::RequireRole::new(&UserRole::Instructor)),
                ),
            ),
    );
}
