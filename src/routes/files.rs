use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{self, RateLimit};
use crate::services::FileService;
use crate::utils::SafeToken;

// 懒加载的全局 FileService 实例
static FILE_SERVICE: Lazy<FileService> = Lazy::new(FileService::new_lazy);

pub async fn handle_upload(
    request: HttpRequest,
    payload: actix_multipart::Multipart,
) -> ActixResult<HttpResponse> {
    FILE_SERVICE.handle_upload(&request, payload).await
}

pub async fn handle_download(request: HttpRequest, token: SafeToken) -> ActixResult<HttpResponse> {
    FILE_SERVICE.handle_download(&request, token.0).await
}

// 配置路由
pub fn configure_file_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/files")
            .wrap(middlewares::RequireJWT)
            // 上传按用户计数，需位于认证之后
            .route("/upload", web::post().to(handle_upload).wrap(RateLimit::file_upload()))
            .route("/download/{token}", web::get().to(handle_download)),
    );
}
