//! Terminal commands that run against the persisted analysis history.

pub mod analyze;
pub mod history;
pub mod pattern;

pub use analyze::analyze;
pub use history::{history, history_clear};
pub use pattern::pattern;
