use std::str::FromStr;

use unicode_segmentation::UnicodeSegmentation;

const MIN_LEN: usize = 5;
const MAX_LEN: usize = 200;

/// The subject line of a contact submission
#[derive(Debug, Clone)]
pub struct SubjectLine(String);

impl AsRef<str> for SubjectLine {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for SubjectLine {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();

        if value.is_empty() {
            return Err("Subject cannot be empty".into());
        }

        let len = value.graphemes(true).count();
        if len < MIN_LEN {
            return Err(format!("Subject must be at least {} characters", MIN_LEN));
        }
        if len > MAX_LEN {
            return Err(format!("Subject must be at most {} characters", MAX_LEN));
        }

        Ok(Self(value.to_string()))
    }
}
