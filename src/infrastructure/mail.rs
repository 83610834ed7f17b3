// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::sync::Arc;
use tracing::info;

use crate::config::settings::MailSettings;
use crate::domain::services::email_service::{
    verification_email_html, EmailError, EmailSender, VERIFICATION_SUBJECT,
};

/// 通过 SMTP 发送邮件
pub struct SmtpEmailSender {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpEmailSender {
    /// 根据配置创建 SMTP 发送器，使用 STARTTLS
    pub fn new(settings: &MailSettings) -> Result<Self, EmailError> {
        let host = settings
            .smtp_host
            .as_deref()
            .ok_or_else(|| EmailError("SMTP host is not configured".to_string()))?;

        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)
            .map_err(|e| EmailError(e.to_string()))?
            .port(settings.smtp_port);

        if let (Some(username), Some(password)) =
            (settings.smtp_username.clone(), settings.smtp_password.clone())
        {
            builder = builder.credentials(Credentials::new(username, password));
        }

        let from = settings
            .from
            .parse::<Mailbox>()
            .map_err(|e| EmailError(format!("Invalid sender address: {}", e)))?;

        Ok(Self {
            transport: builder.build(),
            from,
        })
    }
}

#[async_trait]
impl EmailSender for SmtpEmailSender {
    async fn send_verification_email(
        &self,
        to: &str,
        username: &str,
        link: &str,
    ) -> Result<(), EmailError> {
        let to = to
            .parse::<Mailbox>()
            .map_err(|e| EmailError(format!("Invalid recipient address: {}", e)))?;

        let message = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(VERIFICATION_SUBJECT)
            .header(ContentType::TEXT_HTML)
            .body(verification_email_html(username, link))
            .map_err(|e| EmailError(e.to_string()))?;

        self.transport
            .send(message)
            .await
            .map_err(|e| EmailError(e.to_string()))?;

        info!("Verification email sent to {}", username);
        Ok(())
    }
}

/// 只记录日志的邮件发送器，用于未配置 SMTP 的环境
#[derive(Default)]
pub struct LogEmailSender;

#[async_trait]
impl EmailSender for LogEmailSender {
    async fn send_verification_email(
        &self,
        to: &str,
        username: &str,
        link: &str,
    ) -> Result<(), EmailError> {
        info!(
            "SMTP not configured; verification email for {} <{}>: {}",
            username, to, link
        );
        Ok(())
    }
}

/// 根据配置选择邮件发送器
pub fn create_email_sender(settings: &MailSettings) -> Result<Arc<dyn EmailSender>, EmailError> {
    if settings.smtp_host.is_some() {
        Ok(Arc::new(SmtpEmailSender::new(settings)?))
    } else {
        Ok(Arc::new(LogEmailSender))
    }
}
