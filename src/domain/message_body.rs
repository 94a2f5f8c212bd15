use std::str::FromStr;

use unicode_segmentation::UnicodeSegmentation;

const MIN_LEN: usize = 10;
const MAX_LEN: usize = 2000;

/// The free-text body of a contact submission
#[derive(Debug, Clone)]
pub struct MessageBody(String);

impl AsRef<str> for MessageBody {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for MessageBody {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();

        if value.is_empty() {
            return Err("Message cannot be empty".into());
        }

        let len = value.graphemes(true).count();
        if len < MIN_LEN {
            return Err(format!("Message must be at least {} characters", MIN_LEN));
        }
        if len > MAX_LEN {
            return Err(format!("Message must be at most {} characters", MAX_LEN));
        }

        Ok(Self(value.to_string()))
    }
}
