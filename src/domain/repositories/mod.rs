// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 仓库接口模块
///
/// 该模块定义了领域层的仓库接口，遵循依赖倒置原则。
/// 仓库接口定义了数据持久化的抽象契约，具体实现由基础设施层提供。
///
/// 包含的仓库接口：
/// - 文件元数据仓库（file_metadata_repository）：上传文件的元数据和下载计数
/// - 角色仓库（role_repository）：角色的查询与创建
/// - 存储仓库（storage_repository）：文件内容的读写
/// - 用户仓库（user_repository）：用户及其角色关联
pub mod file_metadata_repository;
pub mod role_repository;
pub mod storage_repository;
pub mod user_repository;
