//! Foreground activity watching command.
//!
//! Builds an [`ActivityMonitor`] on the system input backend, applies the
//! configured thresholds and polls the state at the configured interval —
//! idle detection is lazy, so the poll drives it. Distinct published states
//! are logged, and whenever activity lapses to idle a one-shot listener is
//! registered so the return of user input is reported exactly once.

use crate::libs::config::Config;
use crate::libs::input::SystemInputFactory;
use crate::libs::messages::Message;
use crate::libs::monitor::{ActivityListener, ActivityMonitor, ActivityState};
use crate::{msg_debug, msg_info, msg_warning};
use anyhow::Result;
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::time::{self, Duration};

/// Logs the return of user activity once, then unsubscribes itself.
struct ResumeLogger;

impl ActivityListener for ResumeLogger {
    fn action_notify(&self) -> bool {
        msg_info!(Message::ActivityResumed);
        false
    }
}

/// Runs the watch command until a shutdown signal arrives.
pub async fn cmd() -> Result<()> {
    let config = Config::read()?.monitor.unwrap_or_default();

    msg_info!(Message::WatcherStartingForeground);

    let monitor = ActivityMonitor::new(&SystemInputFactory);
    if !monitor.has_input_source() {
        msg_warning!(Message::InputSourceUnavailable);
    }
    monitor.set_parameters(
        config.noise_threshold,
        config.activity_threshold,
        config.idle_threshold,
        config.sensitivity,
    );

    // Log every distinct published state; queries republish unchanged
    // values, so dedupe here rather than in the publisher.
    let last_logged = Arc::new(Mutex::new(ActivityState::Idle));
    monitor.subscribe(move |state| {
        let mut last = last_logged.lock();
        if *last != state {
            *last = state;
            msg_info!(Message::StateChanged(state.to_string()));
        }
    });

    msg_info!(Message::MonitorStarted {
        noise_ms: config.noise_threshold,
        activity_ms: config.activity_threshold,
        idle_ms: config.idle_threshold,
        sensitivity: config.sensitivity,
    });

    // The monitor keeps only a weak reference; this handle owns the
    // listener for the lifetime of the loop.
    let resume_logger: Arc<dyn ActivityListener> = Arc::new(ResumeLogger);

    // Set up a channel to handle shutdown signals
    let (shutdown_tx, mut shutdown_rx) = tokio::sync::oneshot::channel();

    #[cfg(unix)]
    {
        tokio::spawn(async move {
            use tokio::signal::unix::{signal, SignalKind};

            let mut sigterm = signal(SignalKind::terminate()).expect(&Message::FailedToCreateSigtermHandler.to_string());
            let mut sigint = signal(SignalKind::interrupt()).expect(&Message::FailedToCreateSigintHandler.to_string());

            tokio::select! {
                _ = sigterm.recv() => {
                    msg_info!(Message::WatcherReceivedSigterm);
                }
                _ = sigint.recv() => {
                    msg_info!(Message::WatcherReceivedSigint);
                }
            }

            let _ = shutdown_tx.send(());
        });
    }

    #[cfg(windows)]
    {
        tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    msg_info!(Message::WatcherReceivedCtrlC);
                }
                Err(e) => {
                    crate::msg_error!(Message::WatcherCtrlCListenFailed(e.to_string()));
                }
            }

            let _ = shutdown_tx.send(());
        });
    }

    #[cfg(not(any(unix, windows)))]
    {
        let _ = shutdown_tx;
        msg_warning!(Message::WatcherSignalHandlingNotSupported);
    }

    loop {
        tokio::select! {
            _ = &mut shutdown_rx => {
                break;
            }
            _ = time::sleep(Duration::from_millis(config.poll_interval)) => {
                let state = monitor.get_current_state();
                msg_debug!(Message::StateChanged(state.to_string()));
                if state == ActivityState::Idle {
                    monitor.set_listener(Some(Arc::downgrade(&resume_logger)));
                }
            }
        }
    }

    msg_info!(Message::MonitorShuttingDown);
    monitor.terminate();
    msg_info!(Message::MonitorStopped);

    Ok(())
}
