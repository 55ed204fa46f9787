pub mod download;
pub mod upload;

use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::config::AppConfig;
use crate::storage::Storage;

/// 文件服务：上传落盘与按令牌下载
pub struct FileService;

impl FileService {
    pub fn new_lazy() -> Self {
        Self
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        super::storage_from_request(request)
    }

    pub async fn handle_upload(
        &self,
        request: &HttpRequest,
        payload: Multipart,
    ) -> ActixResult<HttpResponse> {
        upload::handle_upload(self, request, payload).await
    }

    pub async fn handle_download(
        &self,
        request: &HttpRequest,
        file_token: String,
    ) -> ActixResult<HttpResponse> {
        download::handle_download(self, request, file_token).await
    }
}

/// 上传文件在磁盘上的存放路径，文件名就是下载令牌
pub(crate) fn stored_path(token: &str) -> String {
    format!("{}/{}.bin", AppConfig::get().upload.dir, token)
}

/// 删除文件记录与磁盘文件，两步都尽力而为
///
/// 课程、作业、提交、资料的删除路径共用此函数。数据库行删除失败或
/// 磁盘文件缺失只记录告警，不影响调用方已经完成的业务删除。
pub(crate) async fn remove_stored_file(storage: &Arc<dyn Storage>, token: &str) {
    if let Err(e) = storage.delete_file_by_token(token).await {
        tracing::warn!("文件记录删除失败 token={token}: {e}");
    }

    let path = stored_path(token);
    if std::path::Path::new(&path).exists()
        && let Err(e) = std::fs::remove_file(&path)
    {
        tracing::warn!("磁盘文件删除失败 {path}: {e}");
    }
}
