use chrono::{DateTime, Utc};

use serde::Serialize;

use crate::domain::{EmailAddress, MessageBody, PersonName, SubjectLine, SubmissionStatus};

/// Accepted contact submission, not yet stored
#[derive(Debug)]
pub struct NewSubmission {
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub email: EmailAddress,
    pub subject: SubjectLine,
    pub message: MessageBody,
}

impl NewSubmission {
    /// Display name used in email templates
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.as_ref(), self.last_name.as_ref())
    }
}

/// Audit metadata captured from the inbound request.
/// Stored for reference only, never used behaviorally.
#[derive(Debug, Default)]
pub struct RequestMetadata {
    pub requester_ip: Option<String>,
    pub user_agent: Option<String>,
}

/// Stored contact submission record
#[derive(Debug, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    /// ID of the submission, assigned at persistence time
    pub id: String,
    /// User supplied data, normalized at acceptance
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    /// Review state, mutated only through the admin API
    pub status: SubmissionStatus,
    /// Audit metadata
    pub requester_ip: Option<String>,
    pub user_agent: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Filter applied when listing submissions
#[derive(Debug, Default)]
pub struct SubmissionFilter {
    pub status: Option<SubmissionStatus>,
    /// Free-text search over name, email, subject and message
    pub search: Option<String>,
}

/// Counts of stored submissions grouped by status
#[derive(Debug, Default, Serialize)]
pub struct SubmissionStats {
    pub new: i64,
    pub read: i64,
    pub replied: i64,
    pub total: i64,
}
