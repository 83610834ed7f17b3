// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

pub mod actuator_api_test;
pub mod auth_api_test;
pub mod file_api_test;
pub mod helpers;
pub mod postgres_repository_test;
pub mod user_api_test;
