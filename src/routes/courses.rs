use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::courses::requests::{
    CourseQueryParams, CreateCourseRequest, EnrollCourseRequest, UpdateCourseRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::CourseService;
use crate::utils::SafeCourseIdI64;

static COURSE_SERVICE: Lazy<CourseService> = Lazy::new(CourseService::new_lazy);

// HTTP处理程序
pub async fn list_courses(
    req: HttpRequest,
    query: web::Query<CourseQueryParams>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.list_courses(&req, query.into_inner()).await
}

pub async fn create_course(
    req: HttpRequest,
    course_data: web::Json<CreateCourseRequest>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE
        .create_course(&req, course_data.into_inner())
        .await
}

pub async fn enrolled_courses(req: HttpRequest) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.enrolled_courses(&req).await
}

pub async fn enroll_course(
    req: HttpRequest,
    enroll_data: web::Json<EnrollCourseRequest>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE
        .enroll_course(&req, enroll_data.into_inner())
        .await
}

pub async fn unenroll_course(
    req: HttpRequest,
    course_id: SafeCourseIdI64,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE
        .unenroll_course(&req, course_id.into_inner())
        .await
}

pub async fn get_course(req: HttpRequest, course_id: SafeCourseIdI64) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.get_course(&req, course_id.into_inner()).await
}

pub async fn update_course(
    req: HttpRequest,
    course_id: SafeCourseIdI64,
    update_data: web::Json<UpdateCourseRequest>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE
        .update_course(&req, course_id.into_inner(), update_data.into_inner())
        .await
}

pub async fn delete_course(
    req: HttpRequest,
    course_id: SafeCourseIdI64,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE
        .delete_course(&req, course_id.into_inner())
        .await
}

pub fn configure_courses_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/courses")
            .wrap(middlewares::RequireJWT)
            .service(
                // 教师看自己开设的课程，学生看课程目录
                web::resource("").route(web::get().to(list_courses)).route(
                    web::post()
                        .to(create_course)
                        // 仅教师可开课
                        .wrap(middlewares::RequireRole::new(&UserRole::Instructor)),
                ),
            )
            .service(
                web::resource("/enrolled").route(
                    web::get()
                        .to(enrolled_courses)
                        .wrap(middlewares::RequireRole::new(&UserRole::Student)),
                ),
            )
            .service(
                // 选课码暴力枚举由限流拦截
                web::resource("/enroll").route(
                    web::post()
                        .to(enroll_course)
                        .wrap(middlewares::RateLimit::enroll())
                        .wrap(middlewares::RequireRole::new(&UserRole::Student)),
                ),
            )
            .service(
                web::resource("/{course_id}/unenroll").route(
                    web::post()
                        .to(unenroll_course)
                        .wrap(middlewares::RequireRole::new(&UserRole::Student)),
                ),
            )
            .service(
                web::resource("/{course_id}")
                    .route(web::get().to(get_course))
                    .route(
                        web::put()
                            .to(update_course)
                            // 所有权在服务层校验
                            .wrap(middlewares::RequireRole::new(&UserRole::Instructor)),
                    )
                    .route(
                        web::delete()
                            .to(delete_course)
                            .wrap(middlewares::RequireRole::new(&UserRole::Instructor)),
                    ),
            ),
    );
}
