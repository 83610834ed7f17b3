// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 基础设施层模块
///
/// 领域层接口的具体实现：数据库、文件存储、Google 令牌校验、邮件发送和指标。
///
/// 包含的子模块：
/// - 初始化（bootstrap）：基础数据和存储目录
/// - 数据库（database）：数据库连接和实体映射
/// - 仓库实现（repositories）：领域仓库接口的 sea-orm 实现
/// - 存储（storage）：本地文件存储和内存存储
pub mod bootstrap;
pub mod database;
pub mod google;
pub mod mail;
pub mod metrics;
pub mod repositories;
pub mod storage;
