use sea_orm_migration::prelude::*;

use super::m20261001_000001_create_accounts::Users;

/// 默认动态配置：(键, 值, 类型, 说明)
const DEFAULT_SETTINGS: &[(&str, &str, &str, &str)] = &[
    ("app.system_name", "ClassHub", "string", "系统名称，显示在页面与邮件中"),
    (
        "jwt.access_token_expiry",
        "900",
        "integer",
        "Access Token 有效期（秒）",
    ),
    (
        "jwt.refresh_token_expiry",
        "86400",
        "integer",
        "Refresh Token 有效期（秒）",
    ),
    (
        "jwt.refresh_token_remember_me_expiry",
        "2592000",
        "integer",
        "记住我时 Refresh Token 有效期（秒）",
    ),
    ("upload.max_size", "10485760", "integer", "单文件最大字节数"),
    (
        "upload.allowed_types",
        r#"[".png",".jpg",".jpeg",".gif",".pdf",".txt",".md",".zip",".docx",".pptx",".xlsx"]"#,
        "json_array",
        "允许上传的扩展名",
    ),
    ("auth.allow_registration", "true", "boolean", "是否开放公开注册"),
    (
        "mail.notify_class_members",
        "true",
        "boolean",
        "发布内容时是否邮件通知班级成员",
    ),
    ("backup.max_backups", "20", "integer", "保留的备份数量上限"),
];

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ==================== 系统设置表 ====================
        manager
            .create_table(
                Table::create()
                    .table(SystemSettings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SystemSettings::Key)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(SystemSettings::Value).text().not_null())
                    .col(ColumnDef::new(SystemSettings::ValueType).string().not_null())
                    .col(ColumnDef::new(SystemSettings::Description).text().null())
                    .col(
                        ColumnDef::new(SystemSettings::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(SystemSettings::UpdatedBy).big_integer().null())
                    .to_owned(),
            )
            .await?;

        // ==================== 系统设置审计日志表 ====================
        manager
            .create_table(
                Table::create()
                    .table(SystemSettingsAudit::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SystemSettingsAudit::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(SystemSettingsAudit::SettingKey)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(SystemSettingsAudit::OldValue).text().null())
                    .col(ColumnDef::new(SystemSettingsAudit::NewValue).text().not_null())
                    .col(
                        ColumnDef::new(SystemSettingsAudit::ChangedBy)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SystemSettingsAudit::ChangedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(SystemSettingsAudit::IpAddress).string().null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_system_settings_audit_setting_key")
                    .table(SystemSettingsAudit::Table)
                    .col(SystemSettingsAudit::SettingKey)
                    .to_owned(),
            )
            .await?;

        // ==================== 备份记录表 ====================
        manager
            .create_table(
                Table::create()
                    .table(Backups::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Backups::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Backups::FileName)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Backups::FileSize).big_integer().not_null())
                    .col(ColumnDef::new(Backups::Note).text().null())
                    .col(ColumnDef::new(Backups::CreatedBy).big_integer().not_null())
                    .col(ColumnDef::new(Backups::CreatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Backups::Table, Backups::CreatedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // ==================== 崩溃日志表 ====================
        manager
            .create_table(
                Table::create()
                    .table(CrashLogs::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CrashLogs::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CrashLogs::UserId).big_integer().null())
                    .col(ColumnDef::new(CrashLogs::Message).text().not_null())
                    .col(ColumnDef::new(CrashLogs::Stack).text().null())
                    .col(ColumnDef::new(CrashLogs::Url).string().null())
                    .col(ColumnDef::new(CrashLogs::UserAgent).string().null())
                    .col(ColumnDef::new(CrashLogs::AppVersion).string().null())
                    .col(
                        ColumnDef::new(CrashLogs::Resolved)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(CrashLogs::ResolvedBy).big_integer().null())
                    .col(ColumnDef::new(CrashLogs::ResolvedAt).big_integer().null())
                    .col(ColumnDef::new(CrashLogs::CreatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_crash_logs_resolved")
                    .table(CrashLogs::Table)
                    .col(CrashLogs::Resolved)
                    .to_owned(),
            )
            .await?;

        // ==================== 插入默认配置 ====================
        let now = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs() as i64)
            .unwrap_or_default();

        for (key, value, value_type, description) in DEFAULT_SETTINGS {
            let insert = Query::insert()
                .into_table(SystemSettings::Table)
                .columns([
                    SystemSettings::Key,
                    SystemSettings::Value,
                    SystemSettings::ValueType,
                    SystemSettings::Description,
                    SystemSettings::UpdatedAt,
                ])
                .values_panic([
                    (*key).into(),
                    (*value).into(),
                    (*value_type).into(),
                    (*description).into(),
                    now.into(),
                ])
                .to_owned();

            manager.exec_stmt(insert).await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CrashLogs::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Backups::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(SystemSettingsAudit::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(SystemSettings::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum SystemSettings {
    #[sea_orm(iden = "system_settings")]
    Table,
    Key,
    Value,
    ValueType,
    Description,
    UpdatedAt,
    UpdatedBy,
}

#[derive(DeriveIden)]
enum SystemSettingsAudit {
    #[sea_orm(iden = "system_settings_audit")]
    Table,
    Id,
    SettingKey,
    OldValue,
    NewValue,
    ChangedBy,
    ChangedAt,
    IpAddress,
}

#[derive(DeriveIden)]
enum Backups {
    #[sea_orm(iden = "backups")]
    Table,
    Id,
    FileName,
    FileSize,
    Note,
    CreatedBy,
    CreatedAt,
}

#[derive(DeriveIden)]
enum CrashLogs {
    #[sea_orm(iden = "crash_logs")]
    Table,
    Id,
    UserId,
    Message,
    Stack,
    Url,
    UserAgent,
    AppVersion,
    Resolved,
    ResolvedBy,
    ResolvedAt,
    CreatedAt,
}
