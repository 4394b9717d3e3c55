//! 系统设置与审计日志

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

use crate::entity::system_settings::{self, Entity as SystemSettings};
use crate::entity::system_settings_audit::{self, Entity as SystemSettingsAudit};
use crate::errors::{ClassHubError, Result};
use crate::models::{
    PaginationQuery,
    common::PaginationInfo,
    system::{
        entities::SystemSetting, requests::SettingAuditQuery, responses::SettingAuditListResponse,
    },
};

use super::SeaOrmStorage;

const AUDIT_PAGE_SIZE: i64 = 20;

fn db_err(context: &'static str) -> impl Fn(sea_orm::DbErr) -> ClassHubError {
    move |e| ClassHubError::database_operation(format!("{context}: {e}"))
}

/// 写入一项设置并记录审计；值未变化时不写审计
async fn write_setting<C: ConnectionTrait>(
    conn: &C,
    key: &str,
    value: &str,
    user_id: i64,
    ip_address: Option<String>,
) -> Result<SystemSetting> {
    let existing = SystemSettings::find_by_id(key.to_string())
        .one(conn)
        .await
        .map_err(db_err("获取设置失败"))?
        .ok_or_else(|| ClassHubError::not_found(format!("配置项不存在: {key}")))?;

    if existing.value == value {
        return Ok(existing.into_setting());
    }

    let now = chrono::Utc::now().timestamp();
    let old_value = existing.value.clone();

    let mut model: system_settings::ActiveModel = existing.into();
    model.value = Set(value.to_string());
    model.updated_at = Set(now);
    model.updated_by = Set(Some(user_id));
    let updated = model.update(conn).await.map_err(db_err("更新设置失败"))?;

    system_settings_audit::ActiveModel {
        setting_key: Set(key.to_string()),
        old_value: Set(Some(old_value)),
        new_value: Set(value.to_string()),
        changed_by: Set(user_id),
        changed_at: Set(now),
        ip_address: Set(ip_address),
        ..Default::default()
    }
    .insert(conn)
    .await
    .map_err(db_err("创建审计日志失败"))?;

    Ok(updated.into_setting())
}

impl SeaOrmStorage {
    pub(crate) async fn list_all_settings_impl(&self) -> Result<Vec<SystemSetting>> {
        let settings = SystemSettings::find()
            .order_by_asc(system_settings::Column::Key)
            .all(&self.db)
            .await
            .map_err(db_err("获取设置列表失败"))?;

        Ok(settings.into_iter().map(|s| s.into_setting()).collect())
    }

    pub(crate) async fn get_setting_by_key_impl(&self, key: &str) -> Result<Option<SystemSetting>> {
        let setting = SystemSettings::find_by_id(key.to_string())
            .one(&self.db)
            .await
            .map_err(db_err("获取设置失败"))?;

        Ok(setting.map(|s| s.into_setting()))
    }

    pub(crate) async fn update_setting_impl(
        &self,
        key: &str,
        value: &str,
        user_id: i64,
        ip_address: Option<String>,
    ) -> Result<SystemSetting> {
        write_setting(&self.db, key, value, user_id, ip_address).await
    }

    /// 批量更新在同一事务中进行，任一项失败则全部回滚
    pub(crate) async fn batch_update_settings_impl(
        &self,
        updates: Vec<(String, String)>,
        user_id: i64,
        ip_address: Option<String>,
    ) -> Result<Vec<SystemSetting>> {
        let txn = self.db.begin().await.map_err(db_err("开启事务失败"))?;

        let mut results = Vec::with_capacity(updates.len());
        for (key, value) in updates {
            results.push(write_setting(&txn, &key, &value, user_id, ip_address.clone()).await?);
        }

        txn.commit().await.map_err(db_err("提交事务失败"))?;
        Ok(results)
    }

    pub(crate) async fn list_setting_audits_impl(
        &self,
        query: SettingAuditQuery,
    ) -> Result<SettingAuditListResponse> {
        let (page, size) =
            PaginationQuery::normalized(query.page, Some(query.size.unwrap_or(AUDIT_PAGE_SIZE)));

        let mut find = SystemSettingsAudit::find();
        if let Some(key) = query.key.as_deref().filter(|k| !k.is_empty()) {
            find = find.filter(system_settings_audit::Column::SettingKey.eq(key));
        }

        let paginator = find
            .order_by_desc(system_settings_audit::Column::ChangedAt)
            .order_by_desc(system_settings_audit::Column::Id)
            .paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(db_err("统计审计日志失败"))?;
        let audits = paginator
            .fetch_page(page - 1)
            .await
            .map_err(db_err("获取审计日志失败"))?;

        Ok(SettingAuditListResponse {
            audits: audits.into_iter().map(|a| a.into_audit()).collect(),
            pagination: PaginationInfo::new(page, size, total),
        })
    }
}
