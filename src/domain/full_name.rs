use std::collections::HashSet;
use std::fmt;

use unicode_segmentation::UnicodeSegmentation;

const MAX_LEN: usize = 255;

/// A user's full name, composed from validated first/last name parts.
#[derive(Debug, Clone, PartialEq)]
pub struct FullName(String);

impl FullName {
    /// Compose "first last", trimmed, rejecting empty or hostile input in
    /// either part.
    pub fn compose(first_name: &str, last_name: &str) -> Result<Self, String> {
        validate_part(first_name, "first_name")?;
        validate_part(last_name, "last_name")?;

        let full_name = format!("{} {}", first_name.trim(), last_name.trim());
        if full_name.graphemes(true).count() > MAX_LEN {
            return Err("Name too long".into());
        }

        Ok(Self(full_name))
    }
}

fn validate_part(value: &str, part: &str) -> Result<(), String> {
    lazy_static::lazy_static! {
        static ref INVALID_CHARS: HashSet<char> = vec!['/', '(', ')', '"', '<', '>', '\\', '{', '}']
            .into_iter()
            .collect();
    }

    if value.trim().is_empty() {
        return Err(format!("{} cannot be empty", part));
    }
    if value.chars().any(|c| INVALID_CHARS.contains(&c)) {
        return Err(format!("{} contains invalid characters", part));
    }
    Ok(())
}

impl AsRef<str> for FullName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FullName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
