//! Wall-clock time source
//!
//! The gesture recognizer and the save system both need "now". A trait
//! keeps classification deterministic in tests; the system impl reads
//! `Date.now()` in the browser and `SystemTime` natively.

/// A source of wall-clock time in seconds.
pub trait Clock {
    /// Current time in seconds. Expected (not guaranteed) to be monotonic
    /// over the lifetime of a gesture.
    fn now(&self) -> f64;
}

/// The real wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> f64 {
        now_ms() / 1000.0
    }
}

/// Current Unix time in milliseconds.
#[cfg(target_arch = "wasm32")]
pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

/// Current Unix time in milliseconds.
#[cfg(not(target_arch = "wasm32"))]
pub fn now_ms() -> f64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64() * 1000.0)
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_clock_advances() {
        let clock = SystemClock;
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
        assert!(a > 0.0);
    }
}
