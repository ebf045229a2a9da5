// Route exports
pub mod matches;
pub mod skills;
pub mod users;

use actix_web::{error, web, HttpRequest};
use crate::models::ErrorResponse;

pub use matches::AppState;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .configure(matches::configure)
            .configure(users::configure)
            .configure(skills::configure),
    );
}

/// Turn malformed query strings into a JSON 400
pub fn handle_query_payload_error(err: error::QueryPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::info!("Query payload error on {}: {}", req.path(), err);
    let body = ErrorResponse::new(400, "invalid_query", format!("Invalid query: {}", err));
    error::InternalError::from_response(err, actix_web::HttpResponse::BadRequest().json(body)).into()
}

/// Turn malformed or oversized JSON bodies into a JSON 400
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    let body = ErrorResponse::new(400, "invalid_body", format!("Invalid body: {}", err));
    error::InternalError::from_response(err, actix_web::HttpResponse::BadRequest().json(body)).into()
}
