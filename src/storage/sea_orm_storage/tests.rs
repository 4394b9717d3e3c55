use chrono::{Duration, Utc};
use sea_orm::{ConnectOptions, Database};

use super::SeaOrmStorage;
use crate::models::{
    assignments::requests::{CreateAssignmentRequest, UpsertSubmission},
    attendance::{entities::AttendanceStatus, requests::{NewSession, UpsertRecord}},
    backups::requests::NewBackup,
    class_members::entities::ClassMemberRole,
    classes::requests::ClassListQuery,
    crash_logs::requests::{CrashLogListQuery, NewCrashLog},
    messages::requests::{Mailbox, MessageListQuery, SendMessageRequest},
    notes::requests::{CreateNoteRequest, NoteListQuery},
    notifications::{
        entities::{NotificationType, ReferenceType},
        requests::{NewNotification, NotificationListQuery},
    },
    quizzes::{
        entities::{AnswerValue, AttemptStatus, QuestionBody, QuizQuestion},
        requests::{CreateQuizRequest, FinalizeAttempt, NewAttempt},
    },
    system::requests::SettingAuditQuery,
    users::{
        entities::{User, UserRole},
        requests::CreateUserRequest,
    },
};
use crate::storage::Storage;

async fn storage() -> SeaOrmStorage {
    let mut opt = ConnectOptions::new("sqlite::memory:");
    opt.max_connections(1).min_connections(1).sqlx_logging(false);
    let db = Database::connect(opt).await.unwrap();
    SeaOrmStorage::from_connection(db).await.unwrap()
}

async fn user(s: &SeaOrmStorage, name: &str, role: UserRole) -> User {
    s.create_user(CreateUserRequest {
        username: name.to_string(),
        email: format!("{name}@example.com"),
        password: "hashed".to_string(),
        role,
        display_name: None,
        avatar_url: None,
    })
    .await
    .unwrap()
}

fn note(title: &str, pinned: bool) -> CreateNoteRequest {
    CreateNoteRequest {
        title: title.to_string(),
        content: "body".to_string(),
        attachments: vec![],
        pinned,
    }
}

#[tokio::test]
async fn test_user_lookup_by_username_or_email() {
    let s = storage().await;
    let alice = user(&s, "alice", UserRole::Student).await;

    let by_name = s.get_user_by_username_or_email("alice").await.unwrap();
    let by_mail = s
        .get_user_by_username_or_email("alice@example.com")
        .await
        .unwrap();
    assert_eq!(by_name.map(|u| u.id), Some(alice.id));
    assert_eq!(by_mail.map(|u| u.id), Some(alice.id));
    assert_eq!(s.count_users().await.unwrap(), 1);
}

#[tokio::test]
async fn test_class_owner_becomes_professor_member() {
    let s = storage().await;
    let prof = user(&s, "prof", UserRole::Professor).await;
    let class = s
        .create_class(prof.id, "Algebra", None, "ABCD2345")
        .await
        .unwrap();

    let member = s.get_class_member(class.id, prof.id).await.unwrap().unwrap();
    assert_eq!(member.role, ClassMemberRole::Professor);
    assert_eq!(s.count_class_members(class.id).await.unwrap(), 1);

    let found = s.get_class_by_invite_code("ABCD2345").await.unwrap();
    assert_eq!(found.map(|c| c.id), Some(class.id));

    let mine = s
        .list_classes_with_pagination(ClassListQuery {
            member_id: Some(prof.id),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(mine.pagination.total, 1);
}

#[tokio::test]
async fn test_pinned_notes_come_first() {
    let s = storage().await;
    let prof = user(&s, "prof", UserRole::Professor).await;
    let class = s.create_class(prof.id, "Bio", None, "CODE0001").await.unwrap();

    s.create_note(class.id, prof.id, note("old pinned", true))
        .await
        .unwrap();
    s.create_note(class.id, prof.id, note("newer", false))
        .await
        .unwrap();

    let list = s
        .list_notes_with_pagination(NoteListQuery {
            class_id: class.id,
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(list.items[0].title, "old pinned");
    assert_eq!(list.pagination.total, 2);
}

#[tokio::test]
async fn test_resubmission_overwrites_and_clears_grade() {
    let s = storage().await;
    let prof = user(&s, "prof", UserRole::Professor).await;
    let stu = user(&s, "stu", UserRole::Student).await;
    let class = s.create_class(prof.id, "Art", None, "CODE0002").await.unwrap();
    s.add_class_member(class.id, stu.id, ClassMemberRole::Student)
        .await
        .unwrap();

    let assignment = s
        .create_assignment(
            class.id,
            prof.id,
            CreateAssignmentRequest {
                title: "Sketch".to_string(),
                description: None,
                max_score: 10.0,
                due_at: None,
                allow_late: false,
                attachments: vec![],
                published: true,
            },
        )
        .await
        .unwrap();

    assert_eq!(
        s.count_pending_assignments(stu.id, Utc::now()).await.unwrap(),
        1
    );

    let upsert = |content: &str| UpsertSubmission {
        assignment_id: assignment.id,
        student_id: stu.id,
        content: content.to_string(),
        attachments: vec![],
        is_late: false,
    };

    let first = s.upsert_submission(upsert("v1")).await.unwrap();
    s.grade_submission(first.id, 8.0, Some("ok".into()), prof.id)
        .await
        .unwrap();
    let second = s.upsert_submission(upsert("v2")).await.unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(second.content, "v2");
    assert_eq!(
        s.count_pending_assignments(stu.id, Utc::now()).await.unwrap(),
        0
    );
}

#[tokio::test]
async fn test_attempt_finalizes_once() {
    let s = storage().await;
    let prof = user(&s, "prof", UserRole::Professor).await;
    let stu = user(&s, "stu", UserRole::Student).await;
    let class = s.create_class(prof.id, "Geo", None, "CODE0003").await.unwrap();

    let quiz = s
        .create_quiz(
            class.id,
            prof.id,
            CreateQuizRequest {
                title: "Capitals".to_string(),
                description: None,
                time_limit_minutes: None,
                max_attempts: 1,
                available_from: None,
                available_until: None,
                shuffle_questions: false,
                published: true,
                questions: vec![QuizQuestion {
                    id: "q1".to_string(),
                    prompt: "Capital of France?".to_string(),
                    points: 2.0,
                    body: QuestionBody::ShortAnswer {
                        accepted: vec!["Paris".to_string()],
                        case_sensitive: false,
                    },
                }],
            },
        )
        .await
        .unwrap();
    assert_eq!(quiz.questions.len(), 1);

    let attempt = s
        .create_attempt(NewAttempt {
            quiz_id: quiz.id,
            student_id: stu.id,
            attempt_number: 1,
            max_score: 2.0,
            started_at: Utc::now(),
            expires_at: None,
        })
        .await
        .unwrap();

    let answers = [("q1".to_string(), AnswerValue::Text("paris".into()))]
        .into_iter()
        .collect();
    let finalize = FinalizeAttempt {
        status: AttemptStatus::Submitted,
        answers,
        score: 2.0,
        results: vec![],
        submitted_at: Utc::now(),
    };

    let done = s.finalize_attempt(attempt.id, finalize.clone()).await.unwrap();
    assert_eq!(done.map(|a| a.status), Some(AttemptStatus::Submitted));
    assert!(s.finalize_attempt(attempt.id, finalize).await.unwrap().is_none());
    assert!(
        s.get_in_progress_attempt(quiz.id, stu.id)
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn test_attendance_record_is_unique_per_student() {
    let s = storage().await;
    let prof = user(&s, "prof", UserRole::Professor).await;
    let stu = user(&s, "stu", UserRole::Student).await;
    let class = s.create_class(prof.id, "Chem", None, "CODE0004").await.unwrap();

    let now = Utc::now();
    let session = s
        .create_attendance_session(NewSession {
            class_id: class.id,
            created_by: prof.id,
            title: "Week 1".to_string(),
            code: "XYZ789".to_string(),
            opens_at: now,
            closes_at: now + Duration::hours(1),
            late_after_minutes: 10,
        })
        .await
        .unwrap();

    s.upsert_attendance_record(UpsertRecord {
        session_id: session.id,
        student_id: stu.id,
        status: AttendanceStatus::Present,
        checked_in_at: Some(now),
        note: None,
    })
    .await
    .unwrap();
    let updated = s
        .upsert_attendance_record(UpsertRecord {
            session_id: session.id,
            student_id: stu.id,
            status: AttendanceStatus::Excused,
            checked_in_at: None,
            note: Some("doctor".into()),
        })
        .await
        .unwrap();

    assert_eq!(updated.status, AttendanceStatus::Excused);
    assert!(updated.checked_in_at.is_some());
    assert_eq!(
        s.list_attendance_records(&[session.id]).await.unwrap().len(),
        1
    );

    let closed = s
        .close_attendance_session(session.id, now + Duration::minutes(5))
        .await
        .unwrap()
        .unwrap();
    assert!(closed.closes_at < session.closes_at);
}

#[tokio::test]
async fn test_message_deleted_by_both_sides_is_removed() {
    let s = storage().await;
    let a = user(&s, "a", UserRole::Student).await;
    let b = user(&s, "b", UserRole::Student).await;

    let msg = s
        .create_message(
            a.id,
            SendMessageRequest {
                recipient_id: b.id,
                subject: "hi".to_string(),
                body: "hello".to_string(),
            },
        )
        .await
        .unwrap();
    assert_eq!(s.count_unread_messages(b.id).await.unwrap(), 1);

    assert!(s.delete_message_for(msg.id, b.id).await.unwrap());
    let inbox = s
        .list_messages_with_pagination(MessageListQuery {
            page: None,
            size: None,
            user_id: b.id,
            mailbox: Mailbox::Inbox,
            unread_only: false,
        })
        .await
        .unwrap();
    assert!(inbox.items.is_empty());
    assert!(s.get_message_by_id(msg.id).await.unwrap().is_some());

    assert!(s.delete_message_for(msg.id, a.id).await.unwrap());
    assert!(s.get_message_by_id(msg.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_notifications_are_scoped_to_owner() {
    let s = storage().await;
    let a = user(&s, "a", UserRole::Student).await;
    let b = user(&s, "b", UserRole::Student).await;

    let written = s
        .create_notifications(
            &[a.id, b.id],
            NewNotification {
                notification_type: NotificationType::NotePublished,
                title: "New note".to_string(),
                content: None,
                reference_type: Some(ReferenceType::Note),
                reference_id: Some(1),
            },
        )
        .await
        .unwrap();
    assert_eq!(written, 2);

    let list = s
        .list_notifications_with_pagination(NotificationListQuery {
            user_id: a.id,
            ..Default::default()
        })
        .await
        .unwrap();
    let id = list.items[0].id;

    assert!(!s.mark_notification_read(id, b.id).await.unwrap());
    assert!(s.mark_notification_read(id, a.id).await.unwrap());
    assert_eq!(s.count_unread_notifications(a.id).await.unwrap(), 0);
    assert_eq!(s.mark_all_notifications_read(b.id).await.unwrap(), 1);
}

#[tokio::test]
async fn test_default_settings_and_audit() {
    let s = storage().await;
    let admin = user(&s, "root", UserRole::Admin).await;

    let all = s.list_all_settings().await.unwrap();
    assert!(all.iter().any(|x| x.key == "jwt.access_token_expiry"));

    s.update_setting("backup.max_backups", "5", admin.id, Some("127.0.0.1".into()))
        .await
        .unwrap();
    assert!(s.update_setting("nope", "1", admin.id, None).await.is_err());

    let audits = s
        .list_setting_audits(SettingAuditQuery {
            key: Some("backup.max_backups".into()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(audits.audits.len(), 1);
    assert_eq!(audits.audits[0].old_value.as_deref(), Some("20"));
}

#[tokio::test]
async fn test_batch_settings_roll_back_on_unknown_key() {
    let s = storage().await;
    let admin = user(&s, "root", UserRole::Admin).await;

    let result = s
        .batch_update_settings(
            vec![
                ("backup.max_backups".into(), "3".into()),
                ("missing.key".into(), "1".into()),
            ],
            admin.id,
            None,
        )
        .await;
    assert!(result.is_err());

    let kept = s.get_setting_by_key("backup.max_backups").await.unwrap().unwrap();
    assert_eq!(kept.value, "20");

    // 值未变化时不写审计
    s.update_setting("backup.max_backups", "20", admin.id, None)
        .await
        .unwrap();
    let audits = s
        .list_setting_audits(SettingAuditQuery::default())
        .await
        .unwrap();
    assert!(audits.audits.is_empty());
}

#[tokio::test]
async fn test_snapshot_redacts_secrets_and_retention() {
    let s = storage().await;
    let admin = user(&s, "root", UserRole::Admin).await;
    s.create_password_reset(admin.id, "reset-token", Utc::now() + Duration::hours(1))
        .await
        .unwrap();

    let snapshot = s.export_snapshot().await.unwrap();
    let users = &snapshot["users"];
    assert_eq!(users.len(), 1);
    assert!(users[0].get("password_hash").is_none());
    assert!(!snapshot.contains_key("password_resets"));

    for i in 0..3 {
        s.create_backup_record(NewBackup {
            file_name: format!("backup-{i}.json"),
            file_size: 10,
            note: None,
            created_by: admin.id,
        })
        .await
        .unwrap();
    }
    assert_eq!(s.list_backups_beyond(2).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_backups_beyond_keep_are_oldest() {
    let s = storage().await;
    let admin = user(&s, "root", UserRole::Admin).await;

    let mut ids = Vec::new();
    for i in 0..4 {
        let record = s
            .create_backup_record(NewBackup {
                file_name: format!("backup-retain-{i}.json"),
                file_size: 10,
                note: None,
                created_by: admin.id,
            })
            .await
            .unwrap();
        ids.push(record.id);
    }

    let stale: Vec<i64> = s
        .list_backups_beyond(2)
        .await
        .unwrap()
        .into_iter()
        .map(|b| b.id)
        .collect();
    assert_eq!(stale, vec![ids[1], ids[0]]);
    assert!(s.list_backups_beyond(4).await.unwrap().is_empty());
    assert_eq!(s.list_backups_beyond(0).await.unwrap().len(), 4);

    for id in stale {
        assert!(s.delete_backup_record(id).await.unwrap());
    }
    assert!(s.list_backups_beyond(2).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_password_reset_consumed_once() {
    let s = storage().await;
    let stu = user(&s, "stu", UserRole::Student).await;
    let reset = s
        .create_password_reset(stu.id, "tok-1", Utc::now() + Duration::hours(1))
        .await
        .unwrap();

    assert!(s.consume_password_reset(reset.id, stu.id).await.unwrap());
    assert!(!s.consume_password_reset(reset.id, stu.id).await.unwrap());
    let stored = s.get_password_reset_by_token("tok-1").await.unwrap().unwrap();
    assert!(!stored.is_usable(Utc::now()));
}

#[tokio::test]
async fn test_purge_only_resolved_crash_logs() {
    let s = storage().await;
    let admin = user(&s, "root", UserRole::Admin).await;

    let mut ids = Vec::new();
    for msg in ["TypeError", "ReferenceError"] {
        let log = s
            .create_crash_log(NewCrashLog {
                user_id: None,
                message: msg.to_string(),
                stack: None,
                url: Some("/classes".into()),
                user_agent: None,
                app_version: None,
            })
            .await
            .unwrap();
        ids.push(log.id);
    }

    let resolved = s
        .set_crash_log_resolved(ids[0], true, admin.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(resolved.resolved_by, Some(admin.id));

    assert_eq!(s.purge_resolved_crash_logs().await.unwrap(), 1);
    let left = s
        .list_crash_logs_with_pagination(CrashLogListQuery::default())
        .await
        .unwrap();
    assert_eq!(left.items.len(), 1);
    assert_eq!(left.items[0].message, "ReferenceError");
}
