use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::time::Duration;
use tracing::debug;

use super::{Mailer, OutgoingEmail};
use crate::config::MailConfig;
use crate::errors::{ClassHubError, Result};

/// 基于 lettre 的 SMTP 发信器
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    pub fn new(config: &MailConfig) -> Result<Self> {
        if config.smtp_host.trim().is_empty() {
            return Err(ClassHubError::config("mail.smtp_host 不能为空"));
        }

        let mut builder = match config.tls.to_ascii_lowercase().as_str() {
            "tls" => AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)?,
            "starttls" => AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?,
            "none" => AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.smtp_host),
            other => {
                return Err(ClassHubError::config(format!(
                    "未知的 mail.tls 模式: {other}（可选 tls / starttls / none）"
                )));
            }
        };

        builder = builder
            .port(config.smtp_port)
            .timeout(Some(Duration::from_secs(config.timeout.max(1))));

        if !config.username.is_empty() {
            builder = builder.credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ));
        }

        Ok(Self {
            transport: builder.build(),
            from: sender_mailbox(config)?,
        })
    }
}

fn sender_mailbox(config: &MailConfig) -> Result<Mailbox> {
    let name = Some(config.from_name.clone()).filter(|n| !n.trim().is_empty());
    Ok(Mailbox::new(name, config.from_address.parse()?))
}

/// 组装 MIME 邮件：text + html 备选，附件时外层为 mixed
pub(crate) fn build_message(from: &Mailbox, email: &OutgoingEmail) -> Result<Message> {
    let to = Mailbox::new(email.to_name.clone(), email.to.parse()?);
    let mut builder = Message::builder()
        .from(from.clone())
        .to(to)
        .subject(email.subject.clone());

    if let Some(reply_to) = &email.reply_to {
        builder = builder.reply_to(Mailbox::new(None, reply_to.parse()?));
    }

    let body = MultiPart::alternative()
        .singlepart(SinglePart::plain(email.text.clone()))
        .singlepart(SinglePart::html(email.html.clone()));

    if email.attachments.is_empty() {
        return Ok(builder.multipart(body)?);
    }

    let mut mixed = MultiPart::mixed().multipart(body);
    for attachment in &email.attachments {
        let content_type = ContentType::parse(&attachment.content_type)
            .or_else(|_| ContentType::parse("application/octet-stream"))
            .map_err(|e| ClassHubError::mail(format!("附件类型无效: {e}")))?;
        mixed = mixed.singlepart(
            Attachment::new(attachment.file_name.clone())
                .body(attachment.content.clone(), content_type),
        );
    }
    Ok(builder.multipart(mixed)?)
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, email: OutgoingEmail) -> Result<()> {
        let message = build_message(&self.from, &email)?;
        let response = self.transport.send(message).await?;
        debug!(
            "SMTP accepted email to {}: {}",
            email.to,
            response.code()
        );
        Ok(())
    }

    fn name(&self) -> &'static str {
        "smtp"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mail::EmailAttachment;

    fn config() -> MailConfig {
        MailConfig {
            enabled: true,
            smtp_host: "smtp.example.com".into(),
            smtp_port: 587,
            username: String::new(),
            password: String::new(),
            from_address: "noreply@example.com".into(),
            from_name: "ClassHub".into(),
            tls: "starttls".into(),
            timeout: 10,
            notify_class_members: true,
        }
    }

    fn email() -> OutgoingEmail {
        OutgoingEmail {
            to: "student@example.com".into(),
            to_name: Some("Student".into()),
            reply_to: Some("prof@example.com".into()),
            subject: "Hello".into(),
            html: "<p>Hello</p>".into(),
            text: "Hello".into(),
            attachments: Vec::new(),
        }
    }

    #[test]
    fn test_build_message_alternative() {
        let from = sender_mailbox(&config()).unwrap();
        let raw = String::from_utf8(build_message(&from, &email()).unwrap().formatted()).unwrap();
        assert!(raw.contains("Subject: Hello"));
        assert!(raw.contains("multipart/alternative"));
        assert!(raw.contains("Reply-To: prof@example.com"));
        assert!(!raw.contains("multipart/mixed"));
    }

    #[test]
    fn test_build_message_with_attachment() {
        let from = sender_mailbox(&config()).unwrap();
        let email = email().with_attachment(EmailAttachment {
            file_name: "backup-1.json".into(),
            content_type: "application/json".into(),
            content: b"{}".to_vec(),
        });
        let raw = String::from_utf8(build_message(&from, &email).unwrap().formatted()).unwrap();
        assert!(raw.contains("multipart/mixed"));
        assert!(raw.contains("backup-1.json"));
    }

    #[test]
    fn test_invalid_recipient_rejected() {
        let from = sender_mailbox(&config()).unwrap();
        let mut email = email();
        email.to = "not an address".into();
        assert!(build_message(&from, &email).is_err());
    }

    #[test]
    fn test_unknown_tls_mode() {
        let mut config = config();
        config.tls = "ssl3".into();
        assert!(SmtpMailer::new(&config).is_err());
    }
}
