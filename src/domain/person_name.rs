use std::str::FromStr;

use unicode_segmentation::UnicodeSegmentation;

const MIN_LEN: usize = 2;
const MAX_LEN: usize = 50;

/// A first or last name, restricted to letters and spaces
#[derive(Debug, Clone)]
pub struct PersonName(String);

impl AsRef<str> for PersonName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for PersonName {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();

        if value.is_empty() {
            return Err("Name cannot be empty".into());
        }

        let len = value.graphemes(true).count();
        if len < MIN_LEN {
            return Err(format!("Name must be at least {} characters", MIN_LEN));
        }
        if len > MAX_LEN {
            return Err(format!("Name must be at most {} characters", MAX_LEN));
        }
        if !value.chars().all(|c| c.is_alphabetic() || c == ' ') {
            return Err("Name may only contain letters and spaces".into());
        }

        Ok(Self(value.to_string()))
    }
}
