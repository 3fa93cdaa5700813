//! GitHub repository browser (ghscout)
//!
//! TUI application for paging through GitHub repository search results,
//! inspecting a repository's details, and copying its URL.
//!
//! Pure state machine in [`state`]; terminal, network and clipboard live at
//! the edges ([`view`], [`source`], [`clipboard`]).

pub mod clipboard;
pub mod config;
pub mod logging;
pub mod model;
pub mod source;
pub mod state;
pub mod view;
