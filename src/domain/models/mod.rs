// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模型模块
///
/// 该模块定义了系统的核心业务实体，包括：
/// - 角色（role）：授权使用的角色名
/// - 用户（user）：本地或 Google 账号，以及其角色集合
/// - 文件元数据（file_metadata）：上传文件的归属、有效期和下载计数
pub mod file_metadata;
pub mod role;
pub mod user;
