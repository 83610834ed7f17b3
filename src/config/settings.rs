// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// 应用程序配置设置
///
/// 包含服务器、数据库、JWT、上传限制、存储、邮件、CORS 等所有配置项
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// 服务器配置
    pub server: ServerSettings,
    /// 数据库配置
    pub database: DatabaseSettings,
    /// JWT 配置
    pub jwt: JwtSettings,
    /// 上传限制配置
    pub upload: UploadSettings,
    /// 存储配置
    pub storage: StorageSettings,
    /// 初始管理员账号
    pub admin: AdminSettings,
    /// Google 登录配置
    pub google: GoogleSettings,
    /// 邮件配置
    pub mail: MailSettings,
    /// CORS 配置
    pub cors: CorsSettings,
    /// 过期文件清理配置
    pub cleanup: CleanupSettings,
    /// 错误响应配置
    pub errors: ErrorSettings,
}

/// 数据库配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    /// 数据库连接URL
    pub url: String,
    /// 最大连接数
    pub max_connections: Option<u32>,
    /// 最小连接数
    pub min_connections: Option<u32>,
    /// 连接超时时间（秒）
    pub connect_timeout: Option<u64>,
    /// 空闲连接超时时间（秒）
    pub idle_timeout: Option<u64>,
}

/// 服务器配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// 服务器监听主机地址
    pub host: String,
    /// 服务器监听端口
    pub port: u16,
}

/// JWT 配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct JwtSettings {
    /// HS256 签名密钥
    pub secret: String,
    /// 令牌有效期（毫秒）
    pub expiration_ms: i64,
}

/// 上传限制配置
///
/// 匿名上传与登录用户上传分别设置大小、保存天数和下载次数上限
#[derive(Debug, Clone, Deserialize)]
pub struct UploadSettings {
    pub public_max_size: u64,
    pub public_expiry_days: i64,
    pub public_max_downloads: i32,
    pub user_max_size: u64,
    pub user_expiry_days: i64,
    pub user_max_downloads: i32,
}

/// 存储配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    /// 上传文件存储目录
    pub path: String,
    /// 头像存储目录
    pub profile_pictures_path: String,
}

/// 启动时创建的管理员账号
#[derive(Debug, Clone, Deserialize)]
pub struct AdminSettings {
    pub username: String,
    pub password: String,
}

/// Google ID 令牌校验配置
#[derive(Debug, Clone, Deserialize)]
pub struct GoogleSettings {
    /// OAuth 客户端 ID，作为令牌的 audience
    pub client_id: String,
    /// tokeninfo 接口地址
    pub token_info_url: String,
}

/// 邮件配置设置
///
/// 未配置 `smtp_host` 时邮件只写入日志
#[derive(Debug, Clone, Deserialize)]
pub struct MailSettings {
    pub from: String,
    pub frontend_url: String,
    pub smtp_host: Option<String>,
    pub smtp_port: u16,
    pub smtp_username: Option<String>,
    pub smtp_password: Option<String>,
}

/// CORS 配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct CorsSettings {
    pub allowed_origins: Vec<String>,
}

/// 清理任务配置
#[derive(Debug, Clone, Deserialize)]
pub struct CleanupSettings {
    /// 两次清理之间的间隔（秒）
    pub interval_secs: u64,
}

/// 错误响应配置
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorSettings {
    /// 是否在错误响应中附带错误链
    pub include_stacktrace: bool,
    /// 生产模式下始终隐藏错误细节
    pub production: bool,
}

impl ErrorSettings {
    /// 是否向客户端暴露错误细节
    pub fn include_details(&self) -> bool {
        self.include_stacktrace && !self.production
    }
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 依次加载默认值、`config/default`、`config/{APP_ENVIRONMENT}` 和
    /// `PROXIMASHARE__` 前缀的环境变量
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载失败
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        let builder = Self::with_defaults(Config::builder())?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(
                Environment::with_prefix("PROXIMASHARE")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("cors.allowed_origins")
                    .try_parsing(true),
            );

        builder.build()?.try_deserialize::<Self>()?.validated()
    }

    /// 仅使用内置默认值构建配置，不读取文件和环境变量
    ///
    /// 数据库使用 `sqlite::memory:`，适合测试
    pub fn from_defaults() -> Result<Self, ConfigError> {
        Self::with_defaults(Config::builder())?
            .set_default("database.url", "sqlite::memory:")?
            .build()?
            .try_deserialize::<Self>()?
            .validated()
    }

    /// 检查反序列化后无法表达的取值约束
    fn validated(self) -> Result<Self, ConfigError> {
        if self.cleanup.interval_secs == 0 {
            return Err(ConfigError::Message(
                "cleanup.interval_secs must be greater than 0".to_string(),
            ));
        }
        Ok(self)
    }

    fn with_defaults(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        builder
            // Server
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            // Default DB pool settings
            .set_default("database.max_connections", 20)?
            .set_default("database.min_connections", 2)?
            .set_default("database.connect_timeout", 10)?
            .set_default("database.idle_timeout", 300)?
            // JWT
            .set_default(
                "jwt.secret",
                "proximashare-development-secret-change-me-0123456789",
            )?
            .set_default("jwt.expiration_ms", 3_600_000_i64)?
            // Upload limits
            .set_default("upload.public_max_size", 1_073_741_824_u64)?
            .set_default("upload.public_expiry_days", 7)?
            .set_default("upload.public_max_downloads", 3)?
            .set_default("upload.user_max_size", 5_368_709_120_u64)?
            .set_default("upload.user_expiry_days", 30)?
            .set_default("upload.user_max_downloads", 100)?
            // Storage
            .set_default("storage.path", "./storage")?
            .set_default("storage.profile_pictures_path", "./uploads/profile-pictures")?
            // Admin account
            .set_default("admin.username", "admin")?
            .set_default("admin.password", "admin123")?
            // Google
            .set_default("google.client_id", "")?
            .set_default(
                "google.token_info_url",
                "https://oauth2.googleapis.com/tokeninfo",
            )?
            // Mail
            .set_default("mail.from", "no-reply@proximashare.local")?
            .set_default("mail.frontend_url", "http://localhost:3000")?
            .set_default("mail.smtp_port", 587)?
            // CORS
            .set_default(
                "cors.allowed_origins",
                vec!["http://localhost:5173", "https://proximacloud.ddns.net"],
            )?
            // Cleanup runs once a day
            .set_default("cleanup.interval_secs", 86_400)?
            // Errors
            .set_default("errors.include_stacktrace", false)?
            .set_default("errors.production", false)
    }
}

#[cfg(test)]
#[path = "settings_test.rs"]
mod tests;
