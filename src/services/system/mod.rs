pub mod settings;
pub mod settings_cache;

pub use settings_cache::DynamicConfig;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{declare_service, finish};
use crate::models::system::requests::{
    BatchUpdateSettingsRequest, SettingAuditQuery, UpdateSettingRequest,
};

declare_service!(SystemService);

impl SystemService {
    pub async fn get_settings(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        finish(settings::get_settings(self, request).await)
    }

    pub async fn get_admin_settings(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        finish(settings::get_admin_settings(self, request).await)
    }

    pub async fn update_setting(
        &self,
        request: &HttpRequest,
        key: String,
        update: UpdateSettingRequest,
    ) -> ActixResult<HttpResponse> {
        finish(settings::update_setting(self, request, key, update).await)
    }

    pub async fn batch_update_settings(
        &self,
        request: &HttpRequest,
        batch: BatchUpdateSettingsRequest,
    ) -> ActixResult<HttpResponse> {
        finish(settings::batch_update_settings(self, request, batch).await)
    }

    pub async fn get_setting_audits(
        &self,
        request: &HttpRequest,
        query: SettingAuditQuery,
    ) -> ActixResult<HttpResponse> {
        finish(settings::get_setting_audits(self, request, query).await)
    }
}
