use actix_web::dev::HttpServiceFactory;
use actix_web::http::header;
use actix_web::{post, web, HttpRequest, HttpResponse, Responder};

use chrono::{DateTime, Utc};

use serde::{Deserialize, Serialize};

use sqlx::SqlitePool;

use crate::client::EmailClient;
use crate::domain::{FieldViolation, ValidationError};
use crate::error::{RestError, RestResult};
use crate::model::{NewSubmission, RequestMetadata};
use crate::notify::NotificationDispatcher;
use crate::repo::{SqliteSubmissionRepo, SubmissionRepo};
use crate::settings::ContactSettings;

use super::{admin, ApiResponse};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactForm {
    first_name: String,
    last_name: String,
    email: String,
    subject: String,
    message: String,
}

impl TryFrom<ContactForm> for NewSubmission {
    type Error = ValidationError;

    /// Checks every field and collects all violations, never just the first
    fn try_from(form: ContactForm) -> Result<NewSubmission, ValidationError> {
        let mut violations = Vec::new();

        let first_name = check("firstName", &form.first_name, &mut violations);
        let last_name = check("lastName", &form.last_name, &mut violations);
        let email = check("email", &form.email, &mut violations);
        let subject = check("subject", &form.subject, &mut violations);
        let message = check("message", &form.message, &mut violations);

        match (first_name, last_name, email, subject, message) {
            (Some(first_name), Some(last_name), Some(email), Some(subject), Some(message))
                if violations.is_empty() =>
            {
                Ok(NewSubmission {
                    first_name,
                    last_name,
                    email,
                    subject,
                    message,
                })
            }
            _ => Err(ValidationError { violations }),
        }
    }
}

fn check<T: std::str::FromStr<Err = String>>(
    field: &'static str,
    value: &str,
    violations: &mut Vec<FieldViolation>,
) -> Option<T> {
    match value.parse() {
        Ok(parsed) => Some(parsed),
        Err(reason) => {
            violations.push(FieldViolation { field, reason });
            None
        }
    }
}

/// Receipt returned for an accepted submission.
/// `id` is absent when the record could not be stored but the
/// notifications still went out.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactReceipt {
    pub id: Option<String>,
    pub timestamp: DateTime<Utc>,
}

#[tracing::instrument(
    name = "Accept a contact submission",
    skip(req, pool, email_client, dispatcher, contact_settings)
)]
#[post("")]
async fn create(
    req: HttpRequest,
    body: web::Json<ContactForm>,
    pool: web::Data<SqlitePool>,
    email_client: web::Data<EmailClient>,
    dispatcher: web::Data<NotificationDispatcher>,
    contact_settings: web::Data<ContactSettings>,
) -> RestResult<impl Responder> {
    let new_submission: NewSubmission =
        body.into_inner().try_into().map_err(RestError::Validation)?;

    let metadata = request_metadata(&req);

    // Persistence is best-effort unless configured otherwise
    let id = match SqliteSubmissionRepo::insert(pool.get_ref(), &new_submission, &metadata).await {
        Ok(id) => Some(id),
        Err(error) if contact_settings.require_persistence => return Err(error.into()),
        Err(error) => {
            tracing::warn!(error.cause_chain = ?error, "Failed to persist submission, continuing");
            None
        }
    };

    let report = dispatcher
        .dispatch(email_client.get_ref(), &new_submission)
        .await;

    if id.is_none() && !report.any_successful() {
        return Err(RestError::InternalError(
            "Failed to accept contact submission".into(),
        ));
    }

    let receipt = ContactReceipt {
        id,
        timestamp: Utc::now(),
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        "Thanks for reaching out! I will get back to you as soon as possible.",
        receipt,
    )))
}

fn request_metadata(req: &HttpRequest) -> RequestMetadata {
    let requester_ip = req
        .connection_info()
        .realip_remote_addr()
        .map(str::to_string);
    let user_agent = req
        .headers()
        .get(header::USER_AGENT)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);

    RequestMetadata {
        requester_ip,
        user_agent,
    }
}

/// Contact API endpoints: the public submission route plus the
/// admin-guarded management routes over the same resource
pub fn scope() -> impl HttpServiceFactory {
    web::scope("/api/contact")
        .service(create)
        // `/stats` must be registered ahead of `/{id}`
        .service(admin::stats)
        .service(admin::list)
        .service(admin::fetch)
        .service(admin::update_status)
        .service(admin::delete)
}
