//! Domain model types (pure).
//!
//! All types in this module are pure data with smart constructors.

pub mod error;
pub mod key_action;
pub mod query;
pub mod repository;

// Re-export for convenience
pub use error::{AppError, ClipboardError, FetchError, SelectionError};
pub use key_action::KeyAction;
pub use query::{PageIndex, PageRequest, Query, SearchMode};
pub use repository::RepositorySummary;
