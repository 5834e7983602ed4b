use actix_web::{HttpResponse, Result, web};

use crate::database::models::LoginInput;
use crate::error::AppError;
use crate::handlers::shared::ApiResponse;
use crate::services::AuthService;

pub async fn login(
    auth_service: web::Data<AuthService>,
    request: web::Json<LoginInput>,
) -> Result<HttpResponse> {
    let login_request = request.into_inner();

    if login_request.email.trim().is_empty() || login_request.password.is_empty() {
        return Err(AppError::BadRequest("Email and password are required".to_string()).into());
    }

    let email = login_request.email.clone();
    let response = auth_service.login(login_request).await.map_err(|e| {
        log::error!("Failed to login user {}: {}", email, e);
        AppError::internal_server_error_message("Login failed")
    })?;

    match response {
        Some(response) => {
            log::info!("User {} ({}) logged in", response.user.id, response.user.role);
            Ok(HttpResponse::Ok().json(ApiResponse::success(response)))
        }
        None => {
            log::debug!("Rejected login for {}", email);
            Err(AppError::Unauthorized("Invalid credentials".to_string()).into())
        }
    }
}
