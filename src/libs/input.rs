//! Input source boundary for the activity monitor.
//!
//! The monitor never talks to a concrete input backend. It asks an injected
//! [`InputSourceFactory`] for a source with the `Activity` capability and
//! consumes normalized callbacks through the [`InputEvents`] trait. Absence
//! of a source is a valid outcome: the monitor then stays `Idle` unless
//! driven administratively.
//!
//! The real backend, [`RdevInputSource`], listens for OS input events on its
//! own thread via `rdev` and translates them into `InputEvents` calls.

use crate::libs::messages::Message;
use crate::msg_error;
use parking_lot::Mutex;
use rdev::{listen, Event, EventType};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Capabilities a factory can be asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// Raw user-activity events (pointer, buttons, wheel, keys).
    Activity,
}

/// Callbacks an input source drives into the core.
///
/// All of these may arrive concurrently from the source's own thread(s).
pub trait InputEvents: Send + Sync {
    /// A generic action with no further detail.
    fn action_notify(&self);
    /// Pointer moved to `(x, y)`, with an optional wheel tick.
    fn mouse_notify(&self, x: i32, y: i32, wheel_delta: i32);
    /// A mouse button went down (`is_press`) or up.
    fn button_notify(&self, is_press: bool);
    /// A key was pressed; `repeat` marks auto-repeat.
    fn keyboard_notify(&self, repeat: bool);
}

/// A producer of normalized input callbacks.
pub trait InputSource: Send + Sync {
    /// Registers `events` as the sole recipient of this source's callbacks.
    fn subscribe(&self, events: Arc<dyn InputEvents>);
    /// Stops producing callbacks. Does not interrupt an in-flight callback.
    fn terminate(&self);
}

/// Creates input sources by capability.
///
/// Injected into the monitor's constructor so the core never depends on a
/// concrete backend; a fake factory makes the monitor fully testable.
pub trait InputSourceFactory {
    /// Returns a source for `capability`, or `None` if the platform cannot
    /// provide one.
    fn create(&self, capability: Capability) -> Option<Box<dyn InputSource>>;
}

/// Factory for the real OS-level input backend.
#[derive(Debug, Default)]
pub struct SystemInputFactory;

impl InputSourceFactory for SystemInputFactory {
    fn create(&self, capability: Capability) -> Option<Box<dyn InputSource>> {
        match capability {
            Capability::Activity => Some(Box::new(RdevInputSource::new())),
        }
    }
}

/// Factory that never yields a source.
///
/// Stands in for platforms without input capture; the monitor built on top
/// of it is fully functional for administrative calls and stays `Idle`.
#[derive(Debug, Default)]
pub struct NullInputFactory;

impl InputSourceFactory for NullInputFactory {
    fn create(&self, _capability: Capability) -> Option<Box<dyn InputSource>> {
        None
    }
}

/// Input source backed by `rdev`'s global event hook.
pub struct RdevInputSource {
    events: Arc<Mutex<Option<Arc<dyn InputEvents>>>>,
    stopped: Arc<AtomicBool>,
    started: AtomicBool,
}

impl RdevInputSource {
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(None)),
            stopped: Arc::new(AtomicBool::new(false)),
            started: AtomicBool::new(false),
        }
    }
}

impl Default for RdevInputSource {
    fn default() -> Self {
        Self::new()
    }
}

impl InputSource for RdevInputSource {
    /// Stores the recipient and starts the listener thread on first call.
    ///
    /// `rdev::listen` blocks for the lifetime of the hook and is restarted
    /// after a short delay if it fails, so monitoring survives transient
    /// hook errors.
    fn subscribe(&self, events: Arc<dyn InputEvents>) {
        *self.events.lock() = Some(events);
        if self.started.swap(true, Ordering::SeqCst) {
            return;
        }

        let shared_events = self.events.clone();
        let stopped = self.stopped.clone();
        std::thread::spawn(move || {
            loop {
                if stopped.load(Ordering::SeqCst) {
                    break;
                }

                let events_for_listener = shared_events.clone();
                let stopped_for_listener = stopped.clone();
                // rdev reports wheel ticks without coordinates; remember the
                // last pointer position so wheel events carry a stable one.
                let mut last_x = 0i32;
                let mut last_y = 0i32;
                if let Err(e) = listen(move |event: Event| {
                    if stopped_for_listener.load(Ordering::SeqCst) {
                        return;
                    }
                    let Some(events) = events_for_listener.lock().clone() else {
                        return;
                    };
                    match event.event_type {
                        EventType::MouseMove { x, y } => {
                            last_x = x as i32;
                            last_y = y as i32;
                            events.mouse_notify(last_x, last_y, 0);
                        }
                        EventType::Wheel { delta_x, delta_y } => {
                            let delta = if delta_y != 0 { delta_y } else { delta_x };
                            events.mouse_notify(last_x, last_y, delta as i32);
                        }
                        EventType::ButtonPress(_) => events.button_notify(true),
                        EventType::ButtonRelease(_) => events.button_notify(false),
                        EventType::KeyPress(_) => events.keyboard_notify(false),
                        _ => {}
                    }
                }) {
                    msg_error!(Message::InputListenFailed(format!("{:?}", e)));
                    std::thread::sleep(Duration::from_secs(1));
                } else {
                    break;
                }
            }
        });
    }

    /// Mutes the hook. The listener thread cannot be unhooked portably, so
    /// it keeps running but drops every further event.
    fn terminate(&self) {
        self.stopped.store(true, Ordering::SeqCst);
    }
}
