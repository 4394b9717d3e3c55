use sea_orm_migration::prelude::*;

use super::m20261001_000001_create_accounts::{Classes, Users};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 笔记表
        manager
            .create_table(
                Table::create()
                    .table(Notes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Notes::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Notes::ClassId).big_integer().not_null())
                    .col(ColumnDef::new(Notes::AuthorId).big_integer().not_null())
                    .col(ColumnDef::new(Notes::Title).string().not_null())
                    .col(ColumnDef::new(Notes::Content).text().not_null())
                    .col(ColumnDef::new(Notes::Attachments).text().not_null())
                    .col(
                        ColumnDef::new(Notes::Pinned)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Notes::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Notes::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Notes::Table, Notes::ClassId)
                            .to(Classes::Table, Classes::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Notes::Table, Notes::AuthorId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 作业表
        manager
            .create_table(
                Table::create()
                    .table(Assignments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Assignments::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Assignments::ClassId).big_integer().not_null())
                    .col(ColumnDef::new(Assignments::CreatedBy).big_integer().not_null())
                    .col(ColumnDef::new(Assignments::Title).string().not_null())
                    .col(ColumnDef::new(Assignments::Description).text().null())
                    .col(ColumnDef::new(Assignments::MaxScore).double().not_null())
                    .col(ColumnDef::new(Assignments::DueAt).big_integer().null())
                    .col(
                        ColumnDef::new(Assignments::AllowLate)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Assignments::Attachments).text().not_null())
                    .col(
                        ColumnDef::new(Assignments::Published)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Assignments::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Assignments::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Assignments::Table, Assignments::ClassId)
                            .to(Classes::Table, Classes::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Assignments::Table, Assignments::CreatedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 提交表，每个学生每份作业一条
        manager
            .create_table(
                Table::create()
                    .table(Submissions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Submissions::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Submissions::AssignmentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Submissions::StudentId).big_integer().not_null())
                    .col(ColumnDef::new(Submissions::Content).text().not_null())
                    .col(ColumnDef::new(Submissions::Attachments).text().not_null())
                    .col(
                        ColumnDef::new(Submissions::IsLate)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Submissions::Score).double().null())
                    .col(ColumnDef::new(Submissions::Feedback).text().null())
                    .col(ColumnDef::new(Submissions::GradedBy).big_integer().null())
                    .col(ColumnDef::new(Submissions::GradedAt).big_integer().null())
                    .col(
                        ColumnDef::new(Submissions::SubmittedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Submissions::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Submissions::Table, Submissions::AssignmentId)
                            .to(Assignments::Table, Assignments::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Submissions::Table, Submissions::StudentId)
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
                    .name("idx_submissions_assignment_student")
                    .table(Submissions::Table)
                    .col(Submissions::AssignmentId)
                    .col(Submissions::StudentId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // 测验表，题目以 JSON 存储
        manager
            .create_table(
                Table::create()
                    .table(Quizzes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Quizzes::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Quizzes::ClassId).big_integer().not_null())
                    .col(ColumnDef::new(Quizzes::CreatedBy).big_integer().not_null())
                    .col(ColumnDef::new(Quizzes::Title).string().not_null())
                    .col(ColumnDef::new(Quizzes::Description).text().null())
                    .col(ColumnDef::new(Quizzes::TimeLimitMinutes).integer().null())
                    .col(
                        ColumnDef::new(Quizzes::MaxAttempts)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .col(ColumnDef::new(Quizzes::AvailableFrom).big_integer().null())
                    .col(ColumnDef::new(Quizzes::AvailableUntil).big_integer().null())
                    .col(
                        ColumnDef::new(Quizzes::ShuffleQuestions)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Quizzes::Published)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Quizzes::Questions).text().not_null())
                    .col(ColumnDef::new(Quizzes::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Quizzes::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Quizzes::Table, Quizzes::ClassId)
                            .to(Classes::Table, Classes::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Quizzes::Table, Quizzes::CreatedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 测验作答表
        manager
            .create_table(
                Table::create()
                    .table(QuizAttempts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(QuizAttempts::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(QuizAttempts::QuizId).big_integer().not_null())
                    .col(ColumnDef::new(QuizAttempts::StudentId).big_integer().not_null())
                    .col(ColumnDef::new(QuizAttempts::AttemptNumber).integer().not_null())
                    .col(ColumnDef::new(QuizAttempts::Status).string().not_null())
                    .col(ColumnDef::new(QuizAttempts::Answers).text().not_null())
                    .col(ColumnDef::new(QuizAttempts::Score).double().null())
                    .col(ColumnDef::new(QuizAttempts::MaxScore).double().not_null())
                    .col(ColumnDef::new(QuizAttempts::Results).text().null())
                    .col(ColumnDef::new(QuizAttempts::StartedAt).big_integer().not_null())
                    .col(ColumnDef::new(QuizAttempts::ExpiresAt).big_integer().null())
                    .col(ColumnDef::new(QuizAttempts::SubmittedAt).big_integer().null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(QuizAttempts::Table, QuizAttempts::QuizId)
                            .to(Quizzes::Table, Quizzes::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(QuizAttempts::Table, QuizAttempts::StudentId)
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
                    .name("idx_quiz_attempts_quiz_student_number")
                    .table(QuizAttempts::Table)
                    .col(QuizAttempts::QuizId)
                    .col(QuizAttempts::StudentId)
                    .col(QuizAttempts::AttemptNumber)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // 练习题库
        manager
            .create_table(
                Table::create()
                    .table(PracticeQuestions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PracticeQuestions::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(PracticeQuestions::ClassId).big_integer().null())
                    .col(
                        ColumnDef::new(PracticeQuestions::CreatedBy)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(PracticeQuestions::Topic).string().not_null())
                    .col(ColumnDef::new(PracticeQuestions::Difficulty).string().not_null())
                    .col(ColumnDef::new(PracticeQuestions::Prompt).text().not_null())
                    .col(ColumnDef::new(PracticeQuestions::Body).text().not_null())
                    .col(ColumnDef::new(PracticeQuestions::Explanation).text().null())
                    .col(
                        ColumnDef::new(PracticeQuestions::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PracticeQuestions::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(PracticeQuestions::Table, PracticeQuestions::ClassId)
                            .to(Classes::Table, Classes::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(PracticeQuestions::Table, PracticeQuestions::CreatedBy)
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
                    .name("idx_practice_questions_topic")
                    .table(PracticeQuestions::Table)
                    .col(PracticeQuestions::Topic)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PracticeQuestions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(QuizAttempts::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Quizzes::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Submissions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Assignments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Notes::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Notes {
    #[sea_orm(iden = "notes")]
    Table,
    Id,
    ClassId,
    AuthorId,
    Title,
    Content,
    Attachments,
    Pinned,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Assignments {
    #[sea_orm(iden = "assignments")]
    Table,
    Id,
    ClassId,
    CreatedBy,
    Title,
    Description,
    MaxScore,
    DueAt,
    AllowLate,
    Attachments,
    Published,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Submissions {
    #[sea_orm(iden = "submissions")]
    Table,
    Id,
    AssignmentId,
    StudentId,
    Content,
    Attachments,
    IsLate,
    Score,
    Feedback,
    GradedBy,
    GradedAt,
    SubmittedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Quizzes {
    #[sea_orm(iden = "quizzes")]
    Table,
    Id,
    ClassId,
    CreatedBy,
    Title,
    Description,
    TimeLimitMinutes,
    MaxAttempts,
    AvailableFrom,
    AvailableUntil,
    ShuffleQuestions,
    Published,
    Questions,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum QuizAttempts {
    #[sea_orm(iden = "quiz_attempts")]
    Table,
    Id,
    QuizId,
    StudentId,
    AttemptNumber,
    Status,
    Answers,
    Score,
    MaxScore,
    Results,
    StartedAt,
    ExpiresAt,
    SubmittedAt,
}

#[derive(DeriveIden)]
enum PracticeQuestions {
    #[sea_orm(iden = "practice_questions")]
    Table,
    Id,
    ClassId,
    CreatedBy,
    Topic,
    Difficulty,
    Prompt,
    Body,
    Explanation,
    CreatedAt,
    UpdatedAt,
}
