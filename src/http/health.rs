//! Simple liveness / readiness probe

use actix_web::{get, web, HttpResponse, Responder};
use sqlx::PgPool;

#[get("/health-check")]
pub async fn health_check(db: web::Data<PgPool>) -> impl Responder {
    // Check Postgres
    if sqlx::query("SELECT 1").execute(db.get_ref()).await.is_err() {
        return HttpResponse::ServiceUnavailable().body("db");
    }

    let hostname = gethostname::gethostname().to_string_lossy().into_owned();
    HttpResponse::Ok().json(serde_json::json!({ "server_hostname": hostname }))
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(health_check);
}
