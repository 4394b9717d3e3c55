//! 邮件发送
//!
//! 业务代码通过 [`Mailer`] trait 发信：`mail.enabled = true` 时使用 SMTP，
//! 否则使用 [`LogMailer`] 只写日志。模板见 [`templates`]。

mod log_mailer;
mod smtp;
pub mod templates;

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::config::MailConfig;
use crate::errors::Result;
use crate::services::system::DynamicConfig;

pub use log_mailer::LogMailer;
pub use smtp::SmtpMailer;
pub use templates::{EmailTemplate, RenderedEmail};

/// 邮件附件
#[derive(Debug, Clone)]
pub struct EmailAttachment {
    pub file_name: String,
    pub content_type: String,
    pub content: Vec<u8>,
}

/// 待发送的邮件
#[derive(Debug, Clone)]
pub struct OutgoingEmail {
    pub to: String,
    pub to_name: Option<String>,
    pub reply_to: Option<String>,
    pub subject: String,
    pub html: String,
    pub text: String,
    pub attachments: Vec<EmailAttachment>,
}

impl OutgoingEmail {
    pub fn from_rendered(to: impl Into<String>, rendered: RenderedEmail) -> Self {
        Self {
            to: to.into(),
            to_name: None,
            reply_to: None,
            subject: rendered.subject,
            html: rendered.html,
            text: rendered.text,
            attachments: Vec::new(),
        }
    }

    pub fn with_attachment(mut self, attachment: EmailAttachment) -> Self {
        self.attachments.push(attachment);
        self
    }
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: OutgoingEmail) -> Result<()>;

    fn name(&self) -> &'static str;
}

/// 按配置创建发信器，SMTP 初始化失败时退回日志发信器
pub fn create_mailer(config: &MailConfig) -> Arc<dyn Mailer> {
    if !config.enabled {
        info!("Mail delivery disabled, emails will only be logged");
        return Arc::new(LogMailer::default());
    }

    match SmtpMailer::new(config) {
        Ok(mailer) => {
            info!(
                "SMTP mailer ready: {}:{} ({})",
                config.smtp_host, config.smtp_port, config.tls
            );
            Arc::new(mailer)
        }
        Err(e) => {
            warn!("Failed to create SMTP mailer, falling back to log mailer: {e}");
            Arc::new(LogMailer::default())
        }
    }
}

/// 使用当前系统名称渲染模板
pub async fn compose(template: &EmailTemplate, to: impl Into<String>) -> Result<OutgoingEmail> {
    let system_name = DynamicConfig::system_name().await;
    let rendered = template.render(&system_name)?;
    Ok(OutgoingEmail::from_rendered(to, rendered))
}

/// 后台发送，失败只记录日志
pub fn dispatch(mailer: Arc<dyn Mailer>, email: OutgoingEmail) {
    actix_web::rt::spawn(async move {
        let to = email.to.clone();
        let subject = email.subject.clone();
        if let Err(e) = mailer.send(email).await {
            error!("Failed to send email '{subject}' to {to} via {}: {e}", mailer.name());
        }
    });
}

/// 渲染并后台发送一批收件人
pub async fn dispatch_template(
    mailer: Arc<dyn Mailer>,
    template: EmailTemplate,
    recipients: Vec<String>,
) {
    if recipients.is_empty() {
        return;
    }
    let system_name = DynamicConfig::system_name().await;
    let rendered = match template.render(&system_name) {
        Ok(r) => r,
        Err(e) => {
            error!("Failed to render email template {}: {e}", template.kind());
            return;
        }
    };
    for to in recipients {
        dispatch(
            mailer.clone(),
            OutgoingEmail::from_rendered(to, rendered.clone()),
        );
    }
}
