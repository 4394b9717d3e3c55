pub mod download;
pub mod upload;

use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{declare_service, finish};

declare_service!(FileService);

impl FileService {
    pub async fn handle_upload(
        &self,
        request: &HttpRequest,
        payload: Multipart,
    ) -> ActixResult<HttpResponse> {
        finish(upload::handle_upload(self, request, payload).await)
    }

    pub async fn handle_download(
        &self,
        request: &HttpRequest,
        token: String,
    ) -> ActixResult<HttpResponse> {
        finish(download::handle_download(self, request, token).await)
    }
}
