// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// HTTP 处理器模块
pub mod actuator_handler;
pub mod auth_handler;
pub mod config_handler;
pub mod download;
pub mod file_handler;
pub mod user_file_handler;
pub mod user_handler;
