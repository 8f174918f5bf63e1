//! TUI screen implementations.

pub mod edit;

pub use edit::{EditState, draw_edit};
