//! 邮件模板
//!
//! 模板源文件位于 `templates/email/`，编译期嵌入。每种邮件对应
//! `<kind>.html` 与 `<kind>.txt` 两个模板，HTML 模板继承 `layout.html`。

use once_cell::sync::OnceCell;
use rust_embed::Embed;
use serde::Serialize;
use tera::{Context, Tera};

use crate::errors::{ClassHubError, Result};

#[derive(Embed)]
#[folder = "templates/email/"]
struct EmailAssets;

static ENGINE: OnceCell<Tera> = OnceCell::new();

fn engine() -> Result<&'static Tera> {
    ENGINE.get_or_try_init(|| {
        let mut sources = Vec::new();
        for name in EmailAssets::iter() {
            let file = EmailAssets::get(&name)
                .ok_or_else(|| ClassHubError::template(format!("模板丢失: {name}")))?;
            let source = String::from_utf8(file.data.into_owned())
                .map_err(|e| ClassHubError::template(format!("模板 {name} 不是 UTF-8: {e}")))?;
            sources.push((name.to_string(), source));
        }

        let mut tera = Tera::default();
        tera.add_raw_templates(sources)?;
        Ok(tera)
    })
}

/// 渲染结果
#[derive(Debug, Clone)]
pub struct RenderedEmail {
    pub subject: String,
    pub html: String,
    pub text: String,
}

/// 系统发送的各类邮件
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum EmailTemplate {
    ContactReply {
        name: String,
        subject: String,
        original_message: String,
        reply: String,
    },
    AssignmentPublished {
        class_name: String,
        title: String,
        due_at: Option<String>,
        link: String,
    },
    QuizPublished {
        class_name: String,
        title: String,
        available_until: Option<String>,
        time_limit_minutes: Option<i32>,
        link: String,
    },
    NotePublished {
        class_name: String,
        title: String,
        link: String,
    },
    BackupCompleted {
        file_name: String,
        size_bytes: i64,
        created_at: String,
        note: Option<String>,
    },
    PasswordReset {
        username: String,
        link: String,
        ttl_minutes: i64,
    },
    Invitation {
        role: String,
        class_name: Option<String>,
        inviter: String,
        link: String,
        expires_at: String,
    },
}

impl EmailTemplate {
    /// 模板文件名（不含扩展名）
    pub fn kind(&self) -> &'static str {
        match self {
            EmailTemplate::ContactReply { .. } => "contact_reply",
            EmailTemplate::AssignmentPublished { .. } => "assignment_published",
            EmailTemplate::QuizPublished { .. } => "quiz_published",
            EmailTemplate::NotePublished { .. } => "note_published",
            EmailTemplate::BackupCompleted { .. } => "backup_completed",
            EmailTemplate::PasswordReset { .. } => "password_reset",
            EmailTemplate::Invitation { .. } => "invitation",
        }
    }

    fn subject(&self, system_name: &str) -> String {
        match self {
            EmailTemplate::ContactReply { subject, .. } => format!("Re: {subject}"),
            EmailTemplate::AssignmentPublished {
                class_name, title, ..
            } => format!("[{system_name}] {class_name}: 新作业「{title}」"),
            EmailTemplate::QuizPublished {
                class_name, title, ..
            } => format!("[{system_name}] {class_name}: 新测验「{title}」"),
            EmailTemplate::NotePublished {
                class_name, title, ..
            } => format!("[{system_name}] {class_name}: 新笔记「{title}」"),
            EmailTemplate::BackupCompleted { file_name, .. } => {
                format!("[{system_name}] 数据备份 {file_name}")
            }
            EmailTemplate::PasswordReset { .. } => format!("[{system_name}] 重置密码"),
            EmailTemplate::Invitation { .. } => format!("邀请您加入 {system_name}"),
        }
    }

    pub fn render(&self, system_name: &str) -> Result<RenderedEmail> {
        let tera = engine()?;
        let subject = self.subject(system_name);

        let mut context = Context::from_serialize(self)?;
        context.insert("system_name", system_name);
        context.insert("email_subject", &subject);

        let kind = self.kind();
        let html = tera.render(&format!("{kind}.html"), &context)?;
        let text = tera.render(&format!("{kind}.txt"), &context)?;

        Ok(RenderedEmail {
            subject,
            html,
            text,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn samples() -> Vec<EmailTemplate> {
        vec![
            EmailTemplate::ContactReply {
                name: "Ann".into(),
                subject: "Login issue".into(),
                original_message: "I can't log in".into(),
                reply: "Please reset your password.\nThanks".into(),
            },
            EmailTemplate::AssignmentPublished {
                class_name: "Algebra".into(),
                title: "Homework 1".into(),
                due_at: Some("2026-10-20 23:59 UTC".into()),
                link: "https://classhub.test/assignments/1".into(),
            },
            EmailTemplate::QuizPublished {
                class_name: "Algebra".into(),
                title: "Quiz 1".into(),
                available_until: None,
                time_limit_minutes: Some(20),
                link: "https://classhub.test/quizzes/1".into(),
            },
            EmailTemplate::NotePublished {
                class_name: "Algebra".into(),
                title: "Week 1".into(),
                link: "https://classhub.test/classes/1/notes".into(),
            },
            EmailTemplate::BackupCompleted {
                file_name: "backup-1.json".into(),
                size_bytes: 2048,
                created_at: "2026-10-14 08:00 UTC".into(),
                note: None,
            },
            EmailTemplate::PasswordReset {
                username: "ann".into(),
                link: "https://classhub.test/reset-password?token=abc".into(),
                ttl_minutes: 60,
            },
            EmailTemplate::Invitation {
                role: "student".into(),
                class_name: Some("Algebra".into()),
                inviter: "Prof. Smith".into(),
                link: "https://classhub.test/invite?token=abc".into(),
                expires_at: "2026-10-21".into(),
            },
        ]
    }

    #[test]
    fn test_every_template_renders() {
        for template in samples() {
            let rendered = template.render("ClassHub").unwrap();
            assert!(!rendered.subject.is_empty(), "{}", template.kind());
            assert!(rendered.html.contains("ClassHub"), "{}", template.kind());
            assert!(!rendered.text.trim().is_empty(), "{}", template.kind());
        }
    }

    #[test]
    fn test_links_present_in_both_parts() {
        let rendered = samples()[5].render("ClassHub").unwrap();
        assert!(rendered.text.contains("reset-password?token=abc"));
        assert!(rendered.html.contains("reset-password?token=abc"));
        assert!(rendered.text.contains("60"));
    }

    #[test]
    fn test_html_is_escaped() {
        let template = EmailTemplate::NotePublished {
            class_name: "<script>alert(1)</script>".into(),
            title: "t".into(),
            link: "https://classhub.test".into(),
        };
        let rendered = template.render("ClassHub").unwrap();
        assert!(!rendered.html.contains("<script>"));
        assert!(rendered.text.contains("<script>"));
    }

    #[test]
    fn test_contact_reply_subject() {
        let rendered = samples()[0].render("ClassHub").unwrap();
        assert_eq!(rendered.subject, "Re: Login issue");
        assert!(rendered.html.contains("<br>"));
    }
}
