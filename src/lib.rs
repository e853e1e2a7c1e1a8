//! Personal activity and mood journal library
//!
//! This library provides the record types, date helpers, storage gateway and
//! aggregations behind a daily activity log and mood tracker, with a small
//! command-line front end.

mod activity;
mod cli;
mod config;
mod date_utils;
mod errors;
mod helper;
mod insights;
mod mood;
mod storage;
mod store;
mod types;

// Re-export key components
pub use activity::*;
pub use cli::*;
pub use config::*;
pub use date_utils::*;
pub use errors::*;
pub use helper::*;
pub use insights::*;
pub use mood::*;
pub use storage::*;
pub use store::*;
pub use types::*;
