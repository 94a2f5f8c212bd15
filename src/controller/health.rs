use actix_web::{get, web, HttpResponse, Responder};

use serde::Serialize;

use sqlx::SqlitePool;

use crate::client::EmailClient;

/// Reachability of the service and its dependencies
#[derive(Debug, Serialize)]
pub struct HealthReport {
    pub status: &'static str,
    pub database: bool,
    pub email_api: bool,
}

#[tracing::instrument(name = "Health check", skip(pool, email_client))]
#[get("/api/health")]
pub async fn check(
    pool: web::Data<SqlitePool>,
    email_client: web::Data<EmailClient>,
) -> impl Responder {
    let database = sqlx::query("select 1").execute(pool.get_ref()).await.is_ok();
    let email_api = email_client.ping().await.is_ok();

    let status = if database && email_api {
        "ok"
    } else {
        "degraded"
    };

    HttpResponse::Ok().json(HealthReport {
        status,
        database,
        email_api,
    })
}
