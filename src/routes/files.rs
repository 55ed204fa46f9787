use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, middleware, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::services::FileService;
use crate::utils::SafeFileToken;

static FILE_SERVICE: Lazy<FileService> = Lazy::new(FileService::new_lazy);

pub async fn handle_upload(
    request: HttpRequest,
    payload: actix_multipart::Multipart,
) -> ActixResult<HttpResponse> {
    FILE_SERVICE.handle_upload(&request, payload).await
}

pub async fn handle_download(
    request: HttpRequest,
    file_token: SafeFileToken,
) -> ActixResult<HttpResponse> {
    FILE_SERVICE
        .handle_download(&request, file_token.into_inner())
        .await
}

// 上传与下载都要求登录，下载令牌在路径里由 SafeFileToken 先行校验
pub fn configure_file_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/files")
            .wrap(middlewares::RequireJWT)
            .wrap(middleware::Compress::default())
            .service(
                web::resource("/upload").route(
                    web::post()
                        .to(handle_upload)
                        .wrap(middlewares::RateLimit::file_upload()),
                ),
            )
            .route("/download/{file_token}", web::get().to(handle_download)),
    );
}
