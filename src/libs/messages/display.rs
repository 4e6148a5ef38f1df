//! Display implementation for vigil application messages.
//!
//! All user-facing text lives here, behind the `Message` enum, so wording
//! stays consistent and messages with parameters are type-checked at the
//! call site.

use super::types::Message;
use std::fmt;

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved => "Configuration saved successfully".to_string(),
            Message::ConfigDeleted => "Configuration removed".to_string(),
            Message::ConfigModuleMonitor => "Monitor settings".to_string(),
            Message::PromptSelectModules => "Select modules to configure".to_string(),
            Message::PromptNoiseThreshold => "Noise threshold: max gap between events in one burst (ms)".to_string(),
            Message::PromptActivityThreshold => "Activity threshold: burst duration before activity is confirmed (ms)".to_string(),
            Message::PromptIdleThreshold => "Idle threshold: gap after which activity lapses (ms)".to_string(),
            Message::PromptSensitivity => "Sensitivity: minimum pointer displacement per axis (px)".to_string(),
            Message::PromptPollInterval => "Poll interval for state queries (ms)".to_string(),

            // === MONITOR MESSAGES ===
            Message::MonitorStarted {
                noise_ms,
                activity_ms,
                idle_ms,
                sensitivity,
            } => {
                format!(
                    "Monitor is running with noise {}ms, activity {}ms, idle {}ms, sensitivity {}px",
                    noise_ms, activity_ms, idle_ms, sensitivity
                )
            }
            Message::MonitorShuttingDown => "Shutting down monitor...".to_string(),
            Message::MonitorStopped => "Monitor stopped".to_string(),
            Message::StateChanged(state) => format!("Activity state: {}", state),
            Message::ActivityResumed => "User activity resumed".to_string(),
            Message::InputSourceUnavailable => {
                "No input source available; monitor will stay idle unless driven administratively".to_string()
            }
            Message::InputListenFailed(error) => format!("Failed to listen for input events: {}. Retrying in 1 second...", error),

            // === WATCHER MESSAGES ===
            Message::WatcherStartingForeground => "Starting watcher in foreground... Press Ctrl+C to exit.".to_string(),
            Message::WatcherReceivedSigterm => "Received SIGTERM, shutting down gracefully...".to_string(),
            Message::WatcherReceivedSigint => "Received SIGINT, shutting down gracefully...".to_string(),
            Message::WatcherReceivedCtrlC => "Received Ctrl+C, shutting down gracefully...".to_string(),
            Message::WatcherCtrlCListenFailed(error) => format!("Failed to listen for Ctrl+C: {}", error),
            Message::WatcherSignalHandlingNotSupported => "Signal handling is not supported on this platform".to_string(),
            Message::FailedToCreateSigtermHandler => "Failed to create SIGTERM handler".to_string(),
            Message::FailedToCreateSigintHandler => "Failed to create SIGINT handler".to_string(),
        };
        write!(f, "{}", text)
    }
}
