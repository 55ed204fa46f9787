use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, middleware, web};

use crate::models::system::responses::SystemStatusResponse;
use crate::models::{ApiResponse, AppStartTime};

// 运行状态探针，不鉴权，供部署侧健康检查
pub async fn get_status(request: HttpRequest) -> ActixResult<HttpResponse> {
    let uptime_seconds = request
        .app_data::<web::Data<AppStartTime>>()
        .map(|start| (chrono::Utc::now() - start.start_datetime).num_seconds())
        .unwrap_or(0);

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        SystemStatusResponse {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            uptime_seconds,
        },
        "System status retrieved successfully",
    )))
}

pub fn configure_system_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/system")
            .wrap(middleware::Compress::default())
            .route("/status", web::get().to(get_status)),
    );
}
