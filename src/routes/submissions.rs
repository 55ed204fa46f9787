use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::submissions::requests::{CreateSubmissionRequest, GradeSubmissionRequest};
use crate::models::users::entities::UserRole;
use crate::services::SubmissionService;
use crate::utils::{SafeAssignmentIdI64, SafeSubmissionIdI64};

static SUBMISSION_SERVICE: Lazy<SubmissionService> = Lazy::new(SubmissionService::new_lazy);

// HTTP处理程序
pub async fn create_submission(
    req: HttpRequest,
    submission_data: web::Json<CreateSubmissionRequest>,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .create_submission(&req, submission_data.into_inner())
        .await
}

pub async fn my_submissions(req: HttpRequest) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE.my_submissions(&req).await
}

pub async fn list_by_assignment(
    req: HttpRequest,
    assignment_id: SafeAssignmentIdI64,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .list_by_assignment(&req, assignment_id.into_inner())
        .await
}

pub async fn get_submission(
    req: HttpRequest,
    submission_id: SafeSubmissionIdI64,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .get_submission(&req, submission_id.into_inner())
        .await
}

pub async fn grade_submission(
    req: HttpRequest,
    submission_id: SafeSubmissionIdI64,
    grade_data: web::Json<GradeSubmissionRequest>,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .grade_submission(&req, submission_id.into_inner(), grade_data.into_inner())
        .await
}

pub async fn delete_submission(
    req: HttpRequest,
    submission_id: SafeSubmissionIdI64,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .delete_submission(&req, submission_id.into_inner())
        .await
}

pub fn configure_submissions_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/submissions")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("").route(
                    web::post()
                        .to(create_submission)
                        // 仅学生可交作业
                        .wrap(middlewares::RequireRole::new(&UserRole::Student)),
                ),
            )
            .service(
                web::resource("/my").route(
                    web::get()
                        .to(my_submissions)
                        .wrap(middlewares::RequireRole::new(&UserRole::Student)),
                ),
            )
            .service(
                // 作业下全部提交，所有权在服务层校验
                web::resource("/assignment/{assignment_id}").route(
                    web::get()
                        .to(list_by_assignment)
                        .wrap(middlewares::RequireRole::new(&UserRole::Instructor)),
                ),
            )
            .service(
                web::resource("/{submission_id}/grade").route(
                    web::put()
                        .to(grade_submission)
                        .wrap(middlewares::RequireRole::new(&UserRole::Instructor)),
                ),
            )
            .service(
                web::resource("/{submission_id}")
                    .route(web::get().to(get_submission))
                    .route(
                        web::delete()
                            .to(delete_submission)
                            // 撤回仅限提交者本人
                            .wrap(middlewares::RequireRole::new(&UserRole::Student)),
                    ),
            ),
    );
}
