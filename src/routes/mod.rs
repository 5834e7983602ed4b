use actix_web::web;

use crate::error::AppError;

pub mod auth;
pub mod reports;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        AppError::BadRequest(format!("Invalid request body: {}", err)).into()
    }))
    .service(
        web::scope("/api")
            .configure(auth::configure)
            .configure(reports::configure),
    );
}
