//! API endpoint modules.

pub mod contest;
pub mod designs;
pub mod generate;
pub mod health;
pub mod openapi;
pub mod share;
pub mod uploads;

use actix_web::web;

use crate::error::AppError;

pub use health::configure_health_routes;
pub use openapi::ApiDoc;

/// Maximum JSON request body size.
const JSON_LIMIT: usize = 64 * 1024;

/// JSON body extractor config: malformed bodies become `INVALID_INPUT`.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(JSON_LIMIT)
        .error_handler(|err, _req| AppError::InvalidInput(err.to_string()).into())
}

/// Query string extractor config: bad parameters become `INVALID_INPUT`.
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default()
        .error_handler(|err, _req| AppError::InvalidInput(err.to_string()).into())
}

/// Path extractor config: malformed ids become `INVALID_INPUT`.
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default()
        .error_handler(|err, _req| AppError::InvalidInput(err.to_string()).into())
}

/// Register every route of the `/api` scope.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .app_data(query_config())
        .app_data(path_config())
        .configure(configure_health_routes)
        .configure(uploads::configure_routes)
        .configure(generate::configure_routes)
        .configure(designs::configure_routes)
        .configure(contest::configure_routes)
        .configure(share::configure_routes);
}
