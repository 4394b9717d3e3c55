use async_trait::async_trait;
use std::sync::Mutex;
use tracing::info;

use super::{Mailer, OutgoingEmail};
use crate::errors::Result;

/// 只记录日志的发信器，同时保留最近发送的邮件
#[derive(Default)]
pub struct LogMailer {
    sent: Mutex<Vec<OutgoingEmail>>,
}

const KEEP_LAST: usize = 50;

impl LogMailer {
    pub fn sent(&self) -> Vec<OutgoingEmail> {
        self.sent
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, email: OutgoingEmail) -> Result<()> {
        info!(
            to = %email.to,
            subject = %email.subject,
            attachments = email.attachments.len(),
            "Mail delivery disabled, email logged only"
        );
        if let Ok(mut guard) = self.sent.lock() {
            if guard.len() >= KEEP_LAST {
                guard.remove(0);
            }
            guard.push(email);
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "log"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn email(n: usize) -> OutgoingEmail {
        OutgoingEmail {
            to: format!("user{n}@example.com"),
            to_name: None,
            reply_to: None,
            subject: format!("subject {n}"),
            html: "<p>hi</p>".into(),
            text: "hi".into(),
            attachments: Vec::new(),
        }
    }

    #[tokio::test]
    async fn test_log_mailer_keeps_recent() {
        let mailer = LogMailer::default();
        for n in 0..(KEEP_LAST + 3) {
            mailer.send(email(n)).await.unwrap();
        }
        let sent = mailer.sent();
        assert_eq!(sent.len(), KEEP_LAST);
        assert_eq!(sent[0].to, "user3@example.com");
    }
}
