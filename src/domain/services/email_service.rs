// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use thiserror::Error;

/// 验证邮件主题
pub const VERIFICATION_SUBJECT: &str = "Verify Your Email - Proxima Share";

/// 邮件发送错误
#[derive(Error, Debug)]
#[error("Failed to send verification email: {0}")]
pub struct EmailError(pub String);

/// 邮件发送特质
#[async_trait]
pub trait EmailSender: Send + Sync {
    /// 发送邮箱验证邮件
    ///
    /// # 参数
    ///
    /// * `to` - 收件地址
    /// * `username` - 用于问候语的用户名
    /// * `link` - 完整的验证链接
    async fn send_verification_email(
        &self,
        to: &str,
        username: &str,
        link: &str,
    ) -> Result<(), EmailError>;
}

/// 生成验证链接
pub fn verification_link(frontend_url: &str, token: &str) -> String {
    format!(
        "{}/verify-email?token={}",
        frontend_url.trim_end_matches('/'),
        token
    )
}

/// 生成验证邮件的 HTML 正文
pub fn verification_email_html(username: &str, link: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <style>
        body {{ font-family: Arial, sans-serif; line-height: 1.6; color: #333; }}
        .container {{ max-width: 600px; margin: 0 auto; padding: 20px; }}
        .header {{ background-color: #4CAF50; color: white; padding: 20px; text-align: center; }}
        .content {{ background-color: #f9f9f9; padding: 30px; border-radius: 5px; }}
        .button {{ display: inline-block; padding: 12px 30px; background-color: #4CAF50; color: white;
                  text-decoration: none; border-radius: 5px; margin: 20px 0; }}
        .footer {{ text-align: center; margin-top: 20px; font-size: 12px; color: #666; }}
    </style>
</head>
<body>
    <div class="container">
        <div class="header">
            <h1>Welcome to Proxima Share!</h1>
        </div>
        <div class="content">
            <h2>Hello {username},</h2>
            <p>Thank you for registering with Proxima Share. To complete your registration and activate your account,
            please verify your email address by clicking the button below:</p>

            <a href="{link}" class="button">Verify Email Address</a>

            <p>Or copy and paste this link into your browser:</p>
            <p style="word-break: break-all; color: #4CAF50;">{link}</p>

            <p><strong>This verification link will expire in 24 hours.</strong></p>

            <p>If you didn't create an account with Proxima Share, please ignore this email.</p>
        </div>
        <div class="footer">
            <p>&copy; 2025 Proxima Share. All rights reserved.</p>
        </div>
    </div>
</body>
</html>
"#
    )
}
