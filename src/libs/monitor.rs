//! Activity state machine.
//!
//! Classifies the stream of raw input events into a coarse activity state:
//! `Idle`, `Noise` (a sub-threshold burst in progress), `Active` (confirmed
//! sustained activity) or `Suspended` (monitoring disabled by policy).
//!
//! A single mutex protects all mutable monitor state. Every operation
//! releases that lock before any externally visible side effect (state
//! publication, listener callback), so callbacks may re-enter the monitor;
//! the value published is always the one computed under the lock.
//!
//! `Active` does not decay to `Idle` on a timer. Idleness is evaluated
//! lazily inside `get_current_state`, so callers that need timely idle
//! detection must poll at least as often as the idle threshold.

use crate::libs::clock::{Clock, SystemClock, USEC_PER_MSEC, USEC_PER_SEC};
use crate::libs::input::{Capability, InputEvents, InputSource, InputSourceFactory};
use crate::libs::publish::StatePublisher;
use parking_lot::Mutex;
use std::fmt;
use std::sync::{Arc, Weak};

/// Coarse classification of current user activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityState {
    /// No recent input.
    Idle,
    /// A burst of input too short to count as sustained activity.
    Noise,
    /// Confirmed sustained activity.
    Active,
    /// Monitoring disabled by policy; events are ignored.
    Suspended,
}

impl fmt::Display for ActivityState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            ActivityState::Idle => "idle",
            ActivityState::Noise => "noise",
            ActivityState::Active => "active",
            ActivityState::Suspended => "suspended",
        };
        write!(f, "{}", name)
    }
}

/// Receiver of activity notifications.
///
/// The callback runs without the monitor's lock held and returns a
/// continuation flag: `false` unsubscribes the listener immediately.
pub trait ActivityListener: Send + Sync {
    fn action_notify(&self) -> bool;
}

const DEFAULT_NOISE_THRESHOLD: i64 = USEC_PER_SEC;
const DEFAULT_ACTIVITY_THRESHOLD: i64 = 2 * USEC_PER_SEC;
const DEFAULT_IDLE_THRESHOLD: i64 = 5 * USEC_PER_SEC;
const DEFAULT_SENSITIVITY: i32 = 3;

/// All mutable monitor state, guarded by a single lock.
struct MonitorState {
    current: ActivityState,
    /// Start of the current burst, in µs; `0` means unset.
    first_action_time: i64,
    /// Time of the most recent counted action, in µs; `0` means unset.
    last_action_time: i64,
    prev_x: i32,
    prev_y: i32,
    button_is_pressed: bool,
    listener: Option<Weak<dyn ActivityListener>>,
    noise_threshold: i64,
    activity_threshold: i64,
    idle_threshold: i64,
    sensitivity: i32,
}

impl MonitorState {
    fn new() -> Self {
        Self {
            current: ActivityState::Idle,
            first_action_time: 0,
            last_action_time: 0,
            prev_x: 0,
            prev_y: 0,
            button_is_pressed: false,
            listener: None,
            noise_threshold: DEFAULT_NOISE_THRESHOLD,
            activity_threshold: DEFAULT_ACTIVITY_THRESHOLD,
            idle_threshold: DEFAULT_IDLE_THRESHOLD,
            sensitivity: DEFAULT_SENSITIVITY,
        }
    }

    /// Applies one counted action at `now` to the transition table.
    fn register_action(&mut self, now: i64) {
        match self.current {
            ActivityState::Idle => {
                self.first_action_time = now;
                self.current = if self.activity_threshold == 0 {
                    ActivityState::Active
                } else {
                    ActivityState::Noise
                };
            }
            ActivityState::Noise => {
                if now - self.last_action_time > self.noise_threshold {
                    // Gap too large: the burst restarts here.
                    self.first_action_time = now;
                } else if now - self.first_action_time >= self.activity_threshold {
                    self.current = ActivityState::Active;
                }
            }
            ActivityState::Active => {}
            // Suspended ignores the action entirely.
            ActivityState::Suspended => return,
        }
        self.last_action_time = now;
    }
}

/// Shared core behind the monitor handle; also the recipient of input
/// source callbacks.
struct MonitorCore {
    state: Mutex<MonitorState>,
    publisher: StatePublisher,
    clock: Arc<dyn Clock>,
}

impl MonitorCore {
    /// Publishes a transition computed under the lock, then dispatches the
    /// listener. Called with the lock already released.
    fn after_action(&self, previous: ActivityState, current: ActivityState) {
        if current != previous {
            self.publisher.publish(current);
        }
        self.call_listener();
    }

    fn call_listener(&self) {
        let listener = self.state.lock().listener.clone();
        if let Some(weak) = listener {
            if let Some(listener) = weak.upgrade() {
                if !listener.action_notify() {
                    let mut state = self.state.lock();
                    // Clear only if nobody replaced it in the meantime.
                    if state.listener.as_ref().is_some_and(|current| current.ptr_eq(&weak)) {
                        state.listener = None;
                    }
                }
            }
        }
    }

    fn get_current_state(&self) -> ActivityState {
        let current = {
            let mut state = self.state.lock();
            if state.current == ActivityState::Active {
                let now = self.clock.now_micros();
                if now - state.last_action_time > state.idle_threshold {
                    // No longer active.
                    state.current = ActivityState::Idle;
                }
            }
            state.current
        };
        self.publisher.publish(current);
        current
    }

    fn suspend(&self) {
        self.state.lock().current = ActivityState::Suspended;
        self.publisher.publish(ActivityState::Suspended);
    }

    fn resume(&self) {
        self.state.lock().current = ActivityState::Idle;
        self.publisher.publish(ActivityState::Idle);
    }

    fn force_idle(&self) {
        let current = {
            let mut state = self.state.lock();
            if state.current != ActivityState::Suspended {
                state.current = ActivityState::Idle;
                state.last_action_time = 0;
            }
            state.current
        };
        self.publisher.publish(current);
    }

    fn set_parameters(&self, noise_ms: u64, activity_ms: u64, idle_ms: u64, sensitivity: i32) {
        {
            let mut state = self.state.lock();
            state.noise_threshold = noise_ms as i64 * USEC_PER_MSEC;
            state.activity_threshold = activity_ms as i64 * USEC_PER_MSEC;
            state.idle_threshold = idle_ms as i64 * USEC_PER_MSEC;
            state.sensitivity = sensitivity;
            // New thresholds invalidate any in-progress burst accounting.
            state.current = ActivityState::Idle;
        }
        self.publisher.publish(ActivityState::Idle);
    }

    fn get_parameters(&self) -> (u64, u64, u64, i32) {
        let state = self.state.lock();
        (
            (state.noise_threshold / USEC_PER_MSEC) as u64,
            (state.activity_threshold / USEC_PER_MSEC) as u64,
            (state.idle_threshold / USEC_PER_MSEC) as u64,
            state.sensitivity,
        )
    }

    fn shift_time(&self, delta_seconds: i64) {
        let delta = delta_seconds * USEC_PER_SEC;
        let mut state = self.state.lock();
        if state.last_action_time != 0 {
            state.last_action_time += delta;
        }
        if state.first_action_time != 0 {
            state.first_action_time += delta;
        }
    }

    fn set_listener(&self, listener: Option<Weak<dyn ActivityListener>>) {
        self.state.lock().listener = listener;
    }
}

impl InputEvents for MonitorCore {
    fn action_notify(&self) {
        let (previous, current) = {
            let mut state = self.state.lock();
            let previous = state.current;
            state.register_action(self.clock.now_micros());
            (previous, state.current)
        };
        self.after_action(previous, current);
    }

    fn mouse_notify(&self, x: i32, y: i32, wheel_delta: i32) {
        let transition = {
            let mut state = self.state.lock();
            let delta_x = x - state.prev_x;
            let delta_y = y - state.prev_y;
            // The position cache is refreshed before the decision, so
            // sub-sensitivity motion leaves no trace beyond it.
            state.prev_x = x;
            state.prev_y = y;
            if delta_x.abs() >= state.sensitivity
                || delta_y.abs() >= state.sensitivity
                || wheel_delta != 0
                || state.button_is_pressed
            {
                let previous = state.current;
                state.register_action(self.clock.now_micros());
                Some((previous, state.current))
            } else {
                None
            }
        };
        if let Some((previous, current)) = transition {
            self.after_action(previous, current);
        }
    }

    fn button_notify(&self, is_press: bool) {
        let transition = {
            let mut state = self.state.lock();
            state.button_is_pressed = is_press;
            if is_press {
                let previous = state.current;
                state.register_action(self.clock.now_micros());
                Some((previous, state.current))
            } else {
                // A release alone is never an action.
                None
            }
        };
        if let Some((previous, current)) = transition {
            self.after_action(previous, current);
        }
    }

    fn keyboard_notify(&self, _repeat: bool) {
        self.action_notify();
    }
}

/// Handle to the activity monitor.
///
/// Owns the input source obtained from the injected factory for its whole
/// lifetime; dropping the monitor terminates the source. All methods are
/// safe to call from any thread.
pub struct ActivityMonitor {
    core: Arc<MonitorCore>,
    source: Option<Box<dyn InputSource>>,
}

impl ActivityMonitor {
    /// Creates a monitor with default thresholds, wired to whatever input
    /// source `factory` can provide. A factory that yields no source is
    /// valid; the monitor then stays `Idle` unless driven administratively.
    pub fn new(factory: &dyn InputSourceFactory) -> Self {
        Self::with_clock(factory, Arc::new(SystemClock))
    }

    /// Like [`ActivityMonitor::new`] with an injected clock.
    pub fn with_clock(factory: &dyn InputSourceFactory, clock: Arc<dyn Clock>) -> Self {
        let core = Arc::new(MonitorCore {
            state: Mutex::new(MonitorState::new()),
            publisher: StatePublisher::new(),
            clock,
        });
        let source = factory.create(Capability::Activity);
        if let Some(source) = &source {
            source.subscribe(core.clone());
        }
        Self { core, source }
    }

    /// Whether the factory yielded an input source at construction.
    pub fn has_input_source(&self) -> bool {
        self.source.is_some()
    }

    /// Signals the input source to stop delivering events.
    pub fn terminate(&self) {
        if let Some(source) = &self.source {
            source.terminate();
        }
    }

    /// Returns the current state, lapsing `Active` to `Idle` first when the
    /// idle threshold has passed since the last counted action.
    pub fn get_current_state(&self) -> ActivityState {
        self.core.get_current_state()
    }

    /// Forces the state to `Suspended`, regardless of the prior state.
    pub fn suspend(&self) {
        self.core.suspend();
    }

    /// Forces the state to `Idle`. Timestamps are left untouched.
    pub fn resume(&self) {
        self.core.resume();
    }

    /// Forces the state to `Idle` and clears the last action time.
    /// A no-op while `Suspended`.
    pub fn force_idle(&self) {
        self.core.force_idle();
    }

    /// Replaces all thresholds (given in milliseconds) and the pointer
    /// sensitivity (pixels per axis), resetting the state to `Idle`.
    pub fn set_parameters(&self, noise_ms: u64, activity_ms: u64, idle_ms: u64, sensitivity: i32) {
        self.core.set_parameters(noise_ms, activity_ms, idle_ms, sensitivity);
    }

    /// Reads back thresholds in milliseconds plus the pointer sensitivity.
    pub fn get_parameters(&self) -> (u64, u64, u64, i32) {
        self.core.get_parameters()
    }

    /// Shifts both action timestamps by `delta_seconds`, skipping unset
    /// ones. Used after discontinuous system-clock adjustments so idle
    /// accounting is not thrown off by the jump.
    pub fn shift_time(&self, delta_seconds: i64) {
        self.core.shift_time(delta_seconds);
    }

    /// Replaces the single activity listener; `None` detaches it. The
    /// reference is non-owning: the caller keeps the listener alive.
    pub fn set_listener(&self, listener: Option<Weak<dyn ActivityListener>>) {
        self.core.set_listener(listener);
    }

    /// Subscribes an observer to state publications. Observers run without
    /// the monitor's lock held and may re-enter the monitor.
    pub fn subscribe<F>(&self, observer: F)
    where
        F: Fn(ActivityState) + Send + Sync + 'static,
    {
        self.core.publisher.subscribe(observer);
    }

    /// Records a generic action.
    pub fn action_notify(&self) {
        self.core.action_notify();
    }

    /// Records pointer motion to `(x, y)` with an optional wheel tick.
    /// Motion below the sensitivity floor is suppressed unless a button is
    /// held or the wheel moved.
    pub fn mouse_notify(&self, x: i32, y: i32, wheel_delta: i32) {
        self.core.mouse_notify(x, y, wheel_delta);
    }

    /// Records a button press or release. Only a press counts as an action.
    pub fn button_notify(&self, is_press: bool) {
        self.core.button_notify(is_press);
    }

    /// Records a key press. The auto-repeat flag is accepted but does not
    /// change behavior.
    pub fn keyboard_notify(&self, repeat: bool) {
        self.core.keyboard_notify(repeat);
    }
}

impl Drop for ActivityMonitor {
    fn drop(&mut self) {
        self.terminate();
    }
}
