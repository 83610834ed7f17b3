// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域服务模块
///
/// 该模块包含系统的核心业务逻辑服务，这些服务封装了复杂的
/// 业务规则和领域逻辑，协调多个领域对象来完成业务操作。
///
/// 包含的服务：
/// - 认证服务（auth_service）：注册、密码登录和 Google 登录
/// - 邮件（email_service）：验证邮件发送接口和邮件模板
/// - 文件服务（file_service）：上传、下载限制、所有权和过期清理
/// - Google 令牌校验（google_token_verifier）：ID 令牌校验接口
/// - JWT 服务（jwt_service）：访问令牌的签发和校验
/// - 密码服务（password_service）：Argon2 密码哈希
/// - 用户服务（user_service）：个人资料、头像、密码和邮箱验证
pub mod auth_service;
pub mod email_service;
pub mod errors;
pub mod file_service;
pub mod google_token_verifier;
pub mod jwt_service;
pub mod password_service;
pub mod user_service;
