use actix_web::{delete, get, patch, web, HttpResponse, Responder};

use serde::Deserialize;

use sqlx::SqlitePool;

use crate::auth::Administrator;
use crate::domain::SubmissionStatus;
use crate::error::{RestError, RestResult};
use crate::model::SubmissionFilter;
use crate::repo::{SqliteSubmissionRepo, SubmissionRepo};

use super::ApiResponse;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    status: Option<String>,
    search: Option<String>,
}

impl TryFrom<ListQuery> for SubmissionFilter {
    type Error = String;

    fn try_from(query: ListQuery) -> Result<SubmissionFilter, String> {
        let status = query.status.as_deref().map(str::parse).transpose()?;
        let search = query
            .search
            .map(|term| term.trim().to_string())
            .filter(|term| !term.is_empty());

        Ok(SubmissionFilter { status, search })
    }
}

#[tracing::instrument(name = "List contact submissions", skip(pool))]
#[get("")]
pub(super) async fn list(
    _admin: Administrator,
    query: web::Query<ListQuery>,
    pool: web::Data<SqlitePool>,
) -> RestResult<impl Responder> {
    let filter: SubmissionFilter = query
        .into_inner()
        .try_into()
        .map_err(RestError::ParseError)?;

    let submissions = SqliteSubmissionRepo::fetch_all(pool.get_ref(), &filter).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success("Submissions fetched", submissions)))
}

#[tracing::instrument(name = "Fetch contact submission stats", skip(pool))]
#[get("/stats")]
pub(super) async fn stats(
    _admin: Administrator,
    pool: web::Data<SqlitePool>,
) -> RestResult<impl Responder> {
    let stats = SqliteSubmissionRepo::count_by_status(pool.get_ref()).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success("Submission stats fetched", stats)))
}

#[tracing::instrument(name = "Fetch a contact submission", skip(pool))]
#[get("/{id}")]
pub(super) async fn fetch(
    _admin: Administrator,
    id: web::Path<String>,
    pool: web::Data<SqlitePool>,
) -> RestResult<impl Responder> {
    let id = id.into_inner();

    let submission = SqliteSubmissionRepo::fetch_by_id(pool.get_ref(), &id)
        .await?
        .ok_or_else(|| RestError::NotFound(format!("No submission with id {}", id)))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success("Submission fetched", submission)))
}

#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    status: String,
}

#[tracing::instrument(name = "Update submission status", skip(pool))]
#[patch("/{id}/status")]
pub(super) async fn update_status(
    _admin: Administrator,
    id: web::Path<String>,
    body: web::Json<StatusUpdate>,
    pool: web::Data<SqlitePool>,
) -> RestResult<impl Responder> {
    let id = id.into_inner();
    let status: SubmissionStatus = body.status.parse().map_err(RestError::ParseError)?;

    let updated = SqliteSubmissionRepo::update_status(pool.get_ref(), &id, status).await?;
    if !updated {
        return Err(RestError::NotFound(format!("No submission with id {}", id)));
    }

    Ok(HttpResponse::Ok().json(ApiResponse::message("Submission status updated")))
}

#[tracing::instrument(name = "Delete a contact submission", skip(pool))]
#[delete("/{id}")]
pub(super) async fn delete(
    _admin: Administrator,
    id: web::Path<String>,
    pool: web::Data<SqlitePool>,
) -> RestResult<impl Responder> {
    let id = id.into_inner();

    let deleted = SqliteSubmissionRepo::delete_by_id(pool.get_ref(), &id).await?;
    if !deleted {
        return Err(RestError::NotFound(format!("No submission with id {}", id)));
    }

    Ok(HttpResponse::Ok().json(ApiResponse::message("Submission deleted")))
}
