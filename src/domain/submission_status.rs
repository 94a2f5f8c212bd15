use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Review state of a stored submission.
/// Transitions happen only through the admin API, never automatically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum SubmissionStatus {
    New,
    Read,
    Replied,
}

impl Default for SubmissionStatus {
    fn default() -> Self {
        Self::New
    }
}

impl SubmissionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Read => "read",
            Self::Replied => "replied",
        }
    }
}

impl fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SubmissionStatus {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "new" => Ok(Self::New),
            "read" => Ok(Self::Read),
            "replied" => Ok(Self::Replied),
            other => Err(format!(
                "{} is not a valid status, expected one of: new, read, replied",
                other
            )),
        }
    }
}
