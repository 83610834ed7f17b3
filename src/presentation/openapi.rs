// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::presentation::errors::ErrorDetails;
use crate::presentation::handlers::{
    actuator_handler, auth_handler, config_handler, file_handler, user_file_handler,
    user_handler,
};

/// OpenAPI 文档
#[derive(OpenApi)]
#[openapi(
    info(
        title = "ProximaShare API",
        description = "File sharing with expiring downloads and JWT authentication"
    ),
    paths(
        auth_handler::register,
        auth_handler::login,
        auth_handler::login_with_google,
        config_handler::get_all_roles,
        file_handler::upload_file,
        file_handler::get_file_metadata,
        file_handler::download_file,
        user_file_handler::upload_file,
        user_file_handler::get_user_files,
        user_file_handler::get_file_metadata,
        user_file_handler::download_file,
        user_file_handler::delete_file,
        user_handler::get_profile,
        user_handler::upload_profile_picture,
        user_handler::delete_profile_picture,
        user_handler::change_password,
        user_handler::deactivate_account,
        user_handler::send_verification_email,
        user_handler::verify_email,
        user_handler::get_stats,
        actuator_handler::health,
        actuator_handler::metrics,
    ),
    components(schemas(ErrorDetails)),
    modifiers(&BearerAuth),
    tags(
        (name = "Auth", description = "Registration and login"),
        (name = "Config", description = "Static configuration data"),
        (name = "Files", description = "Anonymous uploads and downloads"),
        (name = "User Files", description = "Files owned by the signed-in user"),
        (name = "User", description = "Profile and account management"),
        (name = "Actuator", description = "Health and metrics")
    )
)]
pub struct ApiDoc;

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
            );
        }
    }
}
