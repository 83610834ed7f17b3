// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 中间件模块
///
/// JWT 认证与角色检查，以及请求指标
pub mod auth_middleware;
pub mod metrics_middleware;
