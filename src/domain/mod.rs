mod email_address;
mod message_body;
mod person_name;
mod subject_line;
mod submission_status;

pub use email_address::EmailAddress;
pub use message_body::MessageBody;
pub use person_name::PersonName;
pub use subject_line::SubjectLine;
pub use submission_status::SubmissionStatus;

use serde::Serialize;

/// A single rejected field and the reason it was rejected
#[derive(Debug, Clone, Serialize)]
pub struct FieldViolation {
    pub field: &'static str,
    pub reason: String,
}

/// Rejection of a candidate submission, enumerating every violated field
#[derive(Debug, thiserror::Error)]
#[error("Validation failed for {} field(s)", .violations.len())]
pub struct ValidationError {
    pub violations: Vec<FieldViolation>,
}
