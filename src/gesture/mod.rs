//! Swipe gesture recognition
//!
//! Converts a pointer-down/pointer-up pair from the host input layer into a
//! classified swipe event with derived kinematics. This module is pure and
//! engine-agnostic:
//! - No platform dependencies beyond an injectable clock
//! - Synchronous, single-threaded event dispatch
//! - State fully resets after every release

pub mod emitter;
pub mod recognizer;

pub use emitter::{Emitter, ListenerId};
pub use recognizer::{
    DEFAULT_MAX_DOWN_TIME, DEFAULT_MIN_LENGTH, SWIPE_EVENT, Sample, SwipeEvent, SwipeRecognizer,
};
