use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::assignments::requests::{CreateAssignmentRequest, UpdateAssignmentRequest};
use crate::models::users::entities::UserRole;
use crate::services::AssignmentService;
use crate::utils::{SafeAssignmentIdI64, SafeCourseIdI64};

static ASSIGNMENT_SERVICE: Lazy<AssignmentService> = Lazy::new(AssignmentService::new_lazy);

// HTTP处理程序
pub async fn create_assignment(
    req: HttpRequest,
    assignment_data: web::Json<CreateAssignmentRequest>,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .create_assignment(&req, assignment_data.into_inner())
        .await
}

pub async fn list_assignments(
    req: HttpRequest,
    course_id: SafeCourseIdI64,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .list_assignments(&req, course_id.into_inner())
        .await
}

pub async fn get_assignment(
    req: HttpRequest,
    assignment_id: SafeAssignmentIdI64,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .get_assignment(&req, assignment_id.into_inner())
        .await
}

pub async fn update_assignment(
    req: HttpRequest,
    assignment_id: SafeAssignmentIdI64,
    update_data: web::Json<UpdateAssignmentRequest>,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .update_assignment(&req, assignment_id.into_inner(), update_data.into_inner())
        .await
}

pub async fn delete_assignment(
    req: HttpRequest,
    assignment_id: SafeAssignmentIdI64,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .delete_assignment(&req, assignment_id.into_inner())
        .await
}

pub fn configure_assignments_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/assignments")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("").route(
                    web::post()
                        .to(create_assignment)
                        // 仅教师可发布作业
                        .wrap(middlewares::RequireRole::new(&UserRole::Instructor)),
                ),
            )
            .service(
                // 课程内作业列表，学生视角附带提交状态
                web::resource("/course/{course_id}").route(web::get().to(list_assignments)),
            )
            .service(
                web::resource("/{assignment_id}")
                    .route(web::get().to(get_assignment))
                    .route(
                        web::put()
                            .to(update_assignment)
                            .wrap(middlewares::RequireRole::new(&UserRole::Instructor)),
                    )
                    .route(
                        web::delete()
                            .to(delete_assignment)
                            .wrap(middlewares::RequireRole::new(&UserRole::Instructor)),
                    ),
            ),
    );
}
