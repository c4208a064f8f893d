//! Token-protected query over the aggregated player data.

use actix_web::{get, web, HttpResponse, Responder};

use crate::auth::AuthUser;
use crate::stats;

/// HTML table of the current snapshot. The guard rejects missing, malformed
/// and expired tokens before the handler runs.
#[get("/consultar")]
pub async fn consultar(_auth: AuthUser) -> impl Responder {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(stats::current().to_html())
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(consultar);
}
