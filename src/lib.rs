//! Validated edit modals for event and lease records.

pub mod cli;
pub mod config;
pub mod form;
pub mod model;
pub mod storage;
pub mod submit;
pub mod tui;
