use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::materials::requests::{CreateMaterialRequest, UpdateMaterialRequest};
use crate::models::users::entities::UserRole;
use crate::services::MaterialService;
use crate::utils::{SafeCourseIdI64, SafeMaterialIdI64};

static MATERIAL_SERVICE: Lazy<MaterialService> = Lazy::new(MaterialService::new_lazy);

// HTTP处理程序
pub async fn create_material(
    req: HttpRequest,
    material_data: web::Json<CreateMaterialRequest>,
) -> ActixResult<HttpResponse> {
    MATERIAL_SERVICE
        .create_material(&req, material_data.into_inner())
        .await
}

pub async fn list_materials(
    req: HttpRequest,
    course_id: SafeCourseIdI64,
) -> ActixResult<HttpResponse> {
    MATERIAL_SERVICE
        .list_materials(&req, course_id.into_inner())
        .await
}

pub async fn update_material(
    req: HttpRequest,
    material_id: SafeMaterialIdI64,
    update_data: web::Json<UpdateMaterialRequest>,
) -> ActixResult<HttpResponse> {
    MATERIAL_SERVICE
        .update_material(&req, material_id.into_inner(), update_data.into_inner())
        .await
}

pub async fn delete_material(
    req: HttpRequest,
    material_id: SafeMaterialIdI64,
) -> ActixResult<HttpResponse> {
    MATERIAL_SERVICE
        .delete_material(&req, material_id.into_inner())
        .await
}

pub fn configure_materials_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/materials")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("").route(
                    web::post()
                        .to(create_material)
                        // 仅教师可上传课程资料
                        .wrap(middlewares::RequireRole::new(&UserRole::Instructor)),
                ),
            )
            .service(web::resource("/course/{course_id}").route(web::get().to(list_materials)))
            .service(
                web::resource("/{material_id}")
                    .route(
                        web::put()
                            .to(update_material)
                            .wrap(middlewares::RequireRole::new(&UserRole::Instructor)),
                    )
                    .route(
                        web::delete()
                            .to(delete_material)
                            .wrap(middlewares::RequireRole::new(&UserRole::Instructor)),
                    ),
            ),
    );
}
