use crate::http;
use actix_web::web;

/// Mount every HTTP sub-module at the application root.
pub fn init_routes(cfg: &mut web::ServiceConfig) {
    http::auth::init_routes(cfg);
    http::stats::init_routes(cfg);
    http::health::init_routes(cfg);
}
