//! Domain models with validation at construction
//!
//! Request bodies decode into `BookPayload`; `BookPayload::validate`
//! turns them into a `BookDraft` or a `ValidationError`. Stores only
//! ever accept drafts.

pub mod book;
pub mod validation;

pub use book::{Book, BookDraft, BookPayload, QuantityPolicy, MAX_TEXT_LEN};
pub use validation::ValidationError;
