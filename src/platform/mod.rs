//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Time (wall clock, injectable for tests)
//! - Storage (LocalStorage on web)

pub mod storage;
pub mod time;

pub use time::{Clock, SystemClock, now_ms};
