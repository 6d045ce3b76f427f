//! Book entity and request payload

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::ValidationError;

/// Maximum length for title and author (matches the VARCHAR(255) columns)
pub const MAX_TEXT_LEN: usize = 255;

/// Environment key that switches on the non-negative quantity rule
const NON_NEGATIVE_QUANTITY_ENV: &str = "BOOKS_REQUIRE_NON_NEGATIVE_QUANTITY";

/// Book record, as stored and as rendered
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub quantity: i32,
}

impl Book {
    pub fn from_draft(id: i64, draft: BookDraft) -> Self {
        Self {
            id,
            title: draft.title,
            author: draft.author,
            quantity: draft.quantity,
        }
    }
}

/// Validated values for create/update (everything except `id`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookDraft {
    pub title: String,
    pub author: String,
    pub quantity: i32,
}

impl BookDraft {
    /// Build a draft from trusted values (seed data, tests).
    pub fn new(title: impl Into<String>, author: impl Into<String>, quantity: i32) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            quantity,
        }
    }
}

/// Create/update request body.
///
/// Every field is optional at decode time so that presence is checked by
/// `validate`, not by serde. An `id` in the body is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookPayload {
    pub title: Option<String>,
    pub author: Option<String>,
    pub quantity: Option<i32>,
}

impl BookPayload {
    /// Check field presence and rules, producing a draft.
    ///
    /// # Rules
    /// - `title`, `author`: required, not blank, at most 255 characters
    /// - `quantity`: defaults to 0; negative only rejected under
    ///   `QuantityPolicy::RequireNonNegative`
    pub fn validate(self, policy: QuantityPolicy) -> Result<BookDraft, ValidationError> {
        let title = required_text("title", self.title)?;
        let author = required_text("author", self.author)?;
        let quantity = self.quantity.unwrap_or(0);

        if quantity < 0 && policy == QuantityPolicy::RequireNonNegative {
            return Err(ValidationError::Negative { field: "quantity" });
        }

        Ok(BookDraft {
            title,
            author,
            quantity,
        })
    }
}

fn required_text(field: &'static str, value: Option<String>) -> Result<String, ValidationError> {
    let value = value.ok_or(ValidationError::Missing { field })?;

    if value.trim().is_empty() {
        return Err(ValidationError::Empty { field });
    }

    if value.chars().count() > MAX_TEXT_LEN {
        return Err(ValidationError::TooLong {
            field,
            max: MAX_TEXT_LEN,
        });
    }

    Ok(value)
}

/// Whether a negative `quantity` is accepted.
///
/// Stores have historically accepted negative quantities, so the default
/// keeps that behaviour.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum QuantityPolicy {
    #[default]
    AllowNegative,
    RequireNonNegative,
}

impl QuantityPolicy {
    /// Read `BOOKS_REQUIRE_NON_NEGATIVE_QUANTITY` (`1`, `true`, `yes` enable it)
    pub fn from_env() -> Self {
        Self::from_flag(std::env::var(NON_NEGATIVE_QUANTITY_ENV).ok().as_deref())
    }

    fn from_flag(flag: Option<&str>) -> Self {
        match flag.map(|v| v.trim().to_ascii_lowercase()) {
            Some(v) if matches!(v.as_str(), "1" | "true" | "yes") => Self::RequireNonNegative,
            _ => Self::AllowNegative,
        }
    }
}
