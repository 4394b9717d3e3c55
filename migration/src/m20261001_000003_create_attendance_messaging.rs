use sea_orm_migration::prelude::*;

use super::m20261001_000001_create_accounts::{Classes, Users};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 考勤场次
        manager
            .create_table(
                Table::create()
                    .table(AttendanceSessions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AttendanceSessions::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(AttendanceSessions::ClassId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AttendanceSessions::CreatedBy)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(AttendanceSessions::Title).string().not_null())
                    .col(ColumnDef::new(AttendanceSessions::Code).string().not_null())
                    .col(
                        ColumnDef::new(AttendanceSessions::OpensAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AttendanceSessions::ClosesAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AttendanceSessions::LateAfterMinutes)
                            .integer()
                            .not_null()
                            .default(10),
                    )
                    .col(
                        ColumnDef::new(AttendanceSessions::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(AttendanceSessions::Table, AttendanceSessions::ClassId)
                            .to(Classes::Table, Classes::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(AttendanceSessions::Table, AttendanceSessions::CreatedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 考勤记录
        manager
            .create_table(
                Table::create()
                    .table(AttendanceRecords::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AttendanceRecords::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(AttendanceRecords::SessionId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AttendanceRecords::StudentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(AttendanceRecords::Status).string().not_null())
                    .col(
                        ColumnDef::new(AttendanceRecords::CheckedInAt)
                            .big_integer()
                            .null(),
                    )
                    .col(ColumnDef::new(AttendanceRecords::Note).text().null())
                    .col(
                        ColumnDef::new(AttendanceRecords::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(AttendanceRecords::Table, AttendanceRecords::SessionId)
                            .to(AttendanceSessions::Table, AttendanceSessions::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(AttendanceRecords::Table, AttendanceRecords::StudentId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_attendance_records_session_student")
                    .table(AttendanceRecords::Table)
                    .col(AttendanceRecords::SessionId)
                    .col(AttendanceRecords::StudentId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // 私信
        manager
            .create_table(
                Table::create()
                    .table(Messages::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Messages::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Messages::SenderId).big_integer().not_null())
                    .col(ColumnDef::new(Messages::RecipientId).big_integer().not_null())
                    .col(ColumnDef::new(Messages::Subject).string().not_null())
                    .col(ColumnDef::new(Messages::Body).text().not_null())
                    .col(ColumnDef::new(Messages::ReadAt).big_integer().null())
                    .col(
                        ColumnDef::new(Messages::SenderDeleted)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Messages::RecipientDeleted)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Messages::CreatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Messages::Table, Messages::SenderId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Messages::Table, Messages::RecipientId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_messages_recipient_read")
                    .table(Messages::Table)
                    .col(Messages::RecipientId)
                    .col(Messages::ReadAt)
                    .to_owned(),
            )
            .await?;

        // 联系表单留言
        manager
            .create_table(
                Table::create()
                    .table(ContactMessages::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ContactMessages::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ContactMessages::Name).string().not_null())
                    .col(ColumnDef::new(ContactMessages::Email).string().not_null())
                    .col(ColumnDef::new(ContactMessages::Subject).string().not_null())
                    .col(ColumnDef::new(ContactMessages::Message).text().not_null())
                    .col(ColumnDef::new(ContactMessages::Status).string().not_null())
                    .col(ColumnDef::new(ContactMessages::Reply).text().null())
                    .col(ColumnDef::new(ContactMessages::RepliedBy).big_integer().null())
                    .col(ColumnDef::new(ContactMessages::RepliedAt).big_integer().null())
                    .col(
                        ColumnDef::new(ContactMessages::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ContactMessages::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Messages::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AttendanceRecords::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AttendanceSessions::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum AttendanceSessions {
    #[sea_orm(iden = "attendance_sessions")]
    Table,
    Id,
    ClassId,
    CreatedBy,
    Title,
    Code,
    OpensAt,
    ClosesAt,
    LateAfterMinutes,
    CreatedAt,
}

#[derive(DeriveIden)]
enum AttendanceRecords {
    #[sea_orm(iden = "attendance_records")]
    Table,
    Id,
    SessionId,
    StudentId,
    Status,
    CheckedInAt,
    Note,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Messages {
    #[sea_orm(iden = "messages")]
    Table,
    Id,
    SenderId,
    RecipientId,
    Subject,
    Body,
    ReadAt,
    SenderDeleted,
    RecipientDeleted,
    CreatedAt,
}

#[derive(DeriveIden)]
enum ContactMessages {
    #[sea_orm(iden = "contact_messages")]
    Table,
    Id,
    Name,
    Email,
    Subject,
    Message,
    Status,
    Reply,
    RepliedBy,
    RepliedAt,
    CreatedAt,
}
