//! UI state machine.
//!
//! All state transitions are testable without a terminal; fetching goes
//! through the injected [`RepositorySource`](crate::source::RepositorySource).

pub mod app_state;
pub mod detail;
pub mod dispatch;
pub mod listeners;
pub mod observable_list;
pub mod pagination;
pub mod query_input;
pub mod result_buffer;

// Re-export for convenience
pub use app_state::{AppState, FocusPane};
pub use detail::DetailView;
pub use dispatch::{dispatch, Control};
pub use listeners::{ListenerId, Listeners};
pub use observable_list::{navigate, ListOwner, Navigation, ObservableList};
pub use pagination::{FetchOutcome, FetchStatus, PaginationController};
pub use query_input::QueryInput;
pub use result_buffer::ResultBuffer;
