//! Swipe recognition state machine
//!
//! Pairs a pointer-down with its pointer-up, derives the kinematics of the
//! stroke (length, duration, rotation, delta, velocity) and emits a `"swipe"`
//! event when the stroke is long enough and fast enough.

use glam::Vec2;

use super::emitter::{Emitter, ListenerId};
use crate::platform::time::{Clock, SystemClock};

/// Minimum straight-line distance for a swipe (coordinate-space units)
pub const DEFAULT_MIN_LENGTH: f32 = 100.0;
/// Maximum time the pointer may be held down for a swipe (seconds)
pub const DEFAULT_MAX_DOWN_TIME: f64 = 0.5;

/// Event name swipes are emitted under.
pub const SWIPE_EVENT: &str = "swipe";

/// A captured pointer observation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Pointer position in the host's coordinate space
    pub pos: Vec2,
    /// Capture time in seconds (wall clock)
    pub t: f64,
}

/// A classified swipe with its derived kinematics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwipeEvent {
    /// Where the pointer went down
    pub start: Sample,
    /// Where the pointer came up
    pub end: Sample,
    /// Euclidean distance between start and end
    pub length: f32,
    /// `end.t - start.t` in seconds
    pub duration: f64,
    /// Angle from start to end (radians, atan2 convention)
    pub rotation: f32,
    /// Signed displacement, decomposed from length and rotation
    pub delta: Vec2,
    /// `delta / duration`, componentwise; zero when duration is zero
    pub velocity: Vec2,
}

/// Tracking state between a down and its resolving up.
#[derive(Debug, Clone, Copy, PartialEq)]
enum TrackState {
    Idle,
    Tracking(Sample),
}

/// Converts pointer-down/pointer-up pairs into classified swipe events.
///
/// The recognizer tracks at most one in-flight gesture: a second
/// pointer-down restarts tracking from the new position, and a pointer-up
/// with no matching down is ignored. State is reset after every pointer-up
/// whether or not a swipe was emitted, so a malformed release can never
/// leave the recognizer stuck mid-gesture.
///
/// Drive it from exactly one input-handling thread; the recognizer does no
/// locking of its own. Listeners run synchronously inside
/// [`on_pointer_up`](SwipeRecognizer::on_pointer_up), in registration
/// order, and a listener panic unwinds to that caller.
pub struct SwipeRecognizer {
    min_length: f32,
    max_down_time: f64,
    state: TrackState,
    clock: Box<dyn Clock>,
    events: Emitter<SwipeEvent>,
}

impl SwipeRecognizer {
    /// Recognizer with default thresholds, reading the system clock.
    pub fn new() -> Self {
        Self::with_clock(Box::new(SystemClock))
    }

    /// Recognizer with default thresholds and an injected time source.
    pub fn with_clock(clock: Box<dyn Clock>) -> Self {
        Self {
            min_length: DEFAULT_MIN_LENGTH,
            max_down_time: DEFAULT_MAX_DOWN_TIME,
            state: TrackState::Idle,
            clock,
            events: Emitter::new(),
        }
    }

    /// Override the minimum swipe length (builder style).
    pub fn min_length(mut self, length: f32) -> Self {
        self.min_length = length;
        self
    }

    /// Override the maximum down time (builder style).
    pub fn max_down_time(mut self, seconds: f64) -> Self {
        self.max_down_time = seconds;
        self
    }

    /// Change the maximum down time at runtime.
    ///
    /// Classification reads the live value at release time, so an in-flight
    /// gesture is judged against the new threshold, not the one that was
    /// set when it started.
    pub fn set_max_down_time(&mut self, seconds: f64) {
        self.max_down_time = seconds;
    }

    /// True strictly between a pointer-down and its resolving pointer-up.
    pub fn is_tracking(&self) -> bool {
        matches!(self.state, TrackState::Tracking(_))
    }

    /// Subscribe to swipe events. Returns an id for [`off`](SwipeRecognizer::off).
    pub fn on_swipe<F>(&mut self, handler: F) -> ListenerId
    where
        F: FnMut(&SwipeEvent) + 'static,
    {
        self.events.on(SWIPE_EVENT, handler)
    }

    /// Unsubscribe a swipe listener. Returns false if the id was unknown.
    pub fn off(&mut self, id: ListenerId) -> bool {
        self.events.off(SWIPE_EVENT, id)
    }

    /// Begin tracking a gesture at the pointer's press position.
    ///
    /// A down while already tracking discards the stale start and restarts
    /// from here; there is no multi-touch disambiguation.
    pub fn on_pointer_down(&mut self, x: f32, y: f32) {
        self.state = TrackState::Tracking(Sample {
            pos: Vec2::new(x, y),
            t: self.clock.now(),
        });
    }

    /// Resolve the in-flight gesture at the pointer's release position.
    ///
    /// Emits a swipe event iff `length >= min_length` (inclusive) and
    /// `duration < max_down_time` (strict). An up with no matching down is
    /// a no-op.
    pub fn on_pointer_up(&mut self, x: f32, y: f32) {
        let TrackState::Tracking(start) = self.state else {
            return;
        };
        let end = Sample {
            pos: Vec2::new(x, y),
            t: self.clock.now(),
        };
        // Reset before dispatch so listeners observe a settled recognizer.
        self.state = TrackState::Idle;

        let swipe = kinematics(start, end);
        if swipe.length >= self.min_length && swipe.duration < self.max_down_time {
            self.events.emit(SWIPE_EVENT, &swipe);
        }
    }

    /// Abandon the in-flight gesture, if any, without emitting.
    pub fn cancel(&mut self) {
        self.state = TrackState::Idle;
    }
}

impl Default for SwipeRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Derive the kinematics of a stroke from its endpoint samples.
///
/// `delta` is reconstructed from length and rotation rather than taken
/// directly from the endpoints, so it matches the displacement vector up to
/// floating-point error. Zero duration yields zero velocity instead of
/// non-finite components.
fn kinematics(start: Sample, end: Sample) -> SwipeEvent {
    let displacement = end.pos - start.pos;
    let length = displacement.length();
    let rotation = displacement.y.atan2(displacement.x);
    let duration = end.t - start.t;
    let delta = Vec2::new(length * rotation.cos(), length * rotation.sin());
    let velocity = if duration == 0.0 {
        Vec2::ZERO
    } else {
        delta / duration as f32
    };
    SwipeEvent {
        start,
        end,
        length,
        duration,
        rotation,
        delta,
        velocity,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    /// Manually advanced clock shared between test and recognizer.
    #[derive(Clone, Default)]
    struct TestClock(Rc<Cell<f64>>);

    impl TestClock {
        fn set(&self, t: f64) {
            self.0.set(t);
        }
    }

    impl Clock for TestClock {
        fn now(&self) -> f64 {
            self.0.get()
        }
    }

    /// Recognizer plus a capture buffer for everything it emits.
    fn recognizer_with_capture() -> (SwipeRecognizer, TestClock, Rc<RefCell<Vec<SwipeEvent>>>) {
        let clock = TestClock::default();
        let mut rec = SwipeRecognizer::with_clock(Box::new(clock.clone()));
        let captured = Rc::new(RefCell::new(Vec::new()));
        let sink = captured.clone();
        rec.on_swipe(move |swipe| sink.borrow_mut().push(*swipe));
        (rec, clock, captured)
    }

    #[test]
    fn fast_long_stroke_emits_swipe_with_kinematics() {
        let (mut rec, clock, captured) = recognizer_with_capture();

        clock.set(0.0);
        rec.on_pointer_down(0.0, 0.0);
        clock.set(0.2);
        rec.on_pointer_up(150.0, 0.0);

        let captured = captured.borrow();
        assert_eq!(captured.len(), 1);
        let swipe = &captured[0];
        assert!((swipe.length - 150.0).abs() < 1e-4);
        assert!((swipe.duration - 0.2).abs() < 1e-9);
        assert!(swipe.rotation.abs() < 1e-6);
        assert!((swipe.delta.x - 150.0).abs() < 1e-3);
        assert!(swipe.delta.y.abs() < 1e-3);
        assert!((swipe.velocity.x - 750.0).abs() < 1e-2);
        assert!(swipe.velocity.y.abs() < 1e-2);
    }

    #[test]
    fn short_stroke_is_not_a_swipe() {
        let (mut rec, clock, captured) = recognizer_with_capture();

        clock.set(0.0);
        rec.on_pointer_down(0.0, 0.0);
        clock.set(0.1);
        rec.on_pointer_up(50.0, 0.0);

        assert!(captured.borrow().is_empty());
    }

    #[test]
    fn slow_stroke_is_not_a_swipe() {
        let (mut rec, clock, captured) = recognizer_with_capture();

        clock.set(0.0);
        rec.on_pointer_down(0.0, 0.0);
        clock.set(0.6);
        rec.on_pointer_up(200.0, 0.0);

        assert!(captured.borrow().is_empty());
    }

    #[test]
    fn duration_exactly_at_limit_is_rejected() {
        let (mut rec, clock, captured) = recognizer_with_capture();

        clock.set(1.0);
        rec.on_pointer_down(0.0, 0.0);
        clock.set(1.0 + DEFAULT_MAX_DOWN_TIME);
        rec.on_pointer_up(500.0, 0.0);

        assert!(captured.borrow().is_empty());
    }

    #[test]
    fn length_exactly_at_limit_is_accepted() {
        let (mut rec, clock, captured) = recognizer_with_capture();

        clock.set(0.0);
        rec.on_pointer_down(0.0, 0.0);
        clock.set(0.1);
        rec.on_pointer_up(DEFAULT_MIN_LENGTH, 0.0);

        assert_eq!(captured.borrow().len(), 1);
    }

    #[test]
    fn orphan_release_is_a_noop() {
        let (mut rec, clock, captured) = recognizer_with_capture();

        clock.set(0.0);
        rec.on_pointer_up(300.0, 300.0);

        assert!(captured.borrow().is_empty());
        assert!(!rec.is_tracking());
    }

    #[test]
    fn state_resets_after_every_release() {
        let (mut rec, clock, captured) = recognizer_with_capture();

        // Rejected stroke still clears tracking.
        clock.set(0.0);
        rec.on_pointer_down(0.0, 0.0);
        clock.set(2.0);
        rec.on_pointer_up(500.0, 0.0);
        assert!(!rec.is_tracking());
        assert!(captured.borrow().is_empty());

        // The next gesture is independent of the prior one.
        clock.set(3.0);
        rec.on_pointer_down(0.0, 0.0);
        clock.set(3.1);
        rec.on_pointer_up(0.0, -120.0);
        assert!(!rec.is_tracking());

        let captured = captured.borrow();
        assert_eq!(captured.len(), 1);
        assert!((captured[0].duration - 0.1).abs() < 1e-9);
        assert!((captured[0].rotation + std::f32::consts::FRAC_PI_2).abs() < 1e-5);
    }

    #[test]
    fn second_down_restarts_tracking() {
        let (mut rec, clock, captured) = recognizer_with_capture();

        clock.set(0.0);
        rec.on_pointer_down(1000.0, 1000.0);
        // New down discards the stale start.
        clock.set(5.0);
        rec.on_pointer_down(0.0, 0.0);
        clock.set(5.2);
        rec.on_pointer_up(150.0, 0.0);

        let captured = captured.borrow();
        assert_eq!(captured.len(), 1);
        assert_eq!(captured[0].start.pos, Vec2::ZERO);
        assert!((captured[0].duration - 0.2).abs() < 1e-9);
    }

    #[test]
    fn zero_duration_release_has_zero_velocity() {
        let (mut rec, clock, captured) = recognizer_with_capture();

        clock.set(7.0);
        rec.on_pointer_down(0.0, 0.0);
        rec.on_pointer_up(200.0, 0.0);

        let captured = captured.borrow();
        assert_eq!(captured.len(), 1);
        assert_eq!(captured[0].duration, 0.0);
        assert_eq!(captured[0].velocity, Vec2::ZERO);
        assert!(captured[0].velocity.x.is_finite());
    }

    #[test]
    fn max_down_time_is_read_at_release_time() {
        let (mut rec, clock, captured) = recognizer_with_capture();

        clock.set(0.0);
        rec.on_pointer_down(0.0, 0.0);
        // Raising the limit mid-gesture affects this gesture's classification.
        rec.set_max_down_time(1.0);
        clock.set(0.7);
        rec.on_pointer_up(200.0, 0.0);

        assert_eq!(captured.borrow().len(), 1);
    }

    #[test]
    fn cancel_abandons_gesture_without_emitting() {
        let (mut rec, clock, captured) = recognizer_with_capture();

        clock.set(0.0);
        rec.on_pointer_down(0.0, 0.0);
        rec.cancel();
        assert!(!rec.is_tracking());

        clock.set(0.1);
        rec.on_pointer_up(500.0, 0.0);
        assert!(captured.borrow().is_empty());
    }

    #[test]
    fn listeners_run_in_registration_order_and_unsubscribe() {
        let clock = TestClock::default();
        let mut rec = SwipeRecognizer::with_clock(Box::new(clock.clone()));

        let order = Rc::new(RefCell::new(Vec::new()));
        let a = order.clone();
        let id_a = rec.on_swipe(move |_| a.borrow_mut().push("a"));
        let b = order.clone();
        rec.on_swipe(move |_| b.borrow_mut().push("b"));

        clock.set(0.0);
        rec.on_pointer_down(0.0, 0.0);
        clock.set(0.1);
        rec.on_pointer_up(200.0, 0.0);
        assert_eq!(*order.borrow(), vec!["a", "b"]);

        assert!(rec.off(id_a));
        clock.set(1.0);
        rec.on_pointer_down(0.0, 0.0);
        clock.set(1.1);
        rec.on_pointer_up(200.0, 0.0);
        assert_eq!(*order.borrow(), vec!["a", "b", "b"]);
    }

    #[test]
    fn custom_thresholds_apply() {
        let clock = TestClock::default();
        let mut rec = SwipeRecognizer::with_clock(Box::new(clock.clone()))
            .min_length(10.0)
            .max_down_time(2.0);
        let captured = Rc::new(RefCell::new(Vec::new()));
        let sink = captured.clone();
        rec.on_swipe(move |swipe| sink.borrow_mut().push(*swipe));

        clock.set(0.0);
        rec.on_pointer_down(0.0, 0.0);
        clock.set(1.5);
        rec.on_pointer_up(12.0, 0.0);

        assert_eq!(captured.borrow().len(), 1);
    }

    proptest! {
        /// A release is classified a swipe iff both thresholds pass, for
        /// arbitrary endpoints and timings.
        #[test]
        fn classification_matches_thresholds(
            x0 in -500.0f32..500.0, y0 in -500.0f32..500.0,
            x1 in -500.0f32..500.0, y1 in -500.0f32..500.0,
            duration in 0.0f64..1.0,
        ) {
            let (mut rec, clock, captured) = recognizer_with_capture();

            clock.set(0.0);
            rec.on_pointer_down(x0, y0);
            clock.set(duration);
            rec.on_pointer_up(x1, y1);

            let length = Vec2::new(x1 - x0, y1 - y0).length();
            let expected = length >= DEFAULT_MIN_LENGTH && duration < DEFAULT_MAX_DOWN_TIME;
            prop_assert_eq!(captured.borrow().len(), usize::from(expected));
            prop_assert!(!rec.is_tracking());
        }

        /// Delta reconstructs the true displacement vector and velocity is
        /// delta over duration, componentwise.
        #[test]
        fn kinematics_are_consistent(
            x0 in -500.0f32..500.0, y0 in -500.0f32..500.0,
            x1 in -500.0f32..500.0, y1 in -500.0f32..500.0,
            duration in 0.01f64..1.0,
        ) {
            let start = Sample { pos: Vec2::new(x0, y0), t: 3.0 };
            let end = Sample { pos: Vec2::new(x1, y1), t: 3.0 + duration };
            let swipe = kinematics(start, end);

            let displacement = end.pos - start.pos;
            prop_assert!((swipe.delta - displacement).length() < 1e-2);
            prop_assert!((swipe.length - displacement.length()).abs() < 1e-3);
            // Relative tolerance: velocities get large at small durations
            let expected_vel = swipe.delta / duration as f32;
            prop_assert!(
                (swipe.velocity - expected_vel).length() < 1e-3 * (1.0 + expected_vel.length())
            );
            prop_assert!((swipe.duration - duration).abs() < 1e-9);
        }
    }
}
