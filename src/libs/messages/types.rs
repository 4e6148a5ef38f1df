#[derive(Debug, Clone)]
pub enum Message {
    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    ConfigDeleted,
    ConfigModuleMonitor,
    PromptSelectModules,
    PromptNoiseThreshold,
    PromptActivityThreshold,
    PromptIdleThreshold,
    PromptSensitivity,
    PromptPollInterval,

    // === MONITOR MESSAGES ===
    MonitorStarted {
        noise_ms: u64,
        activity_ms: u64,
        idle_ms: u64,
        sensitivity: i32,
    },
    MonitorShuttingDown,
    MonitorStopped,
    StateChanged(String),
    ActivityResumed,
    InputSourceUnavailable,
    InputListenFailed(String),

    // === WATCHER MESSAGES ===
    WatcherStartingForeground,
    WatcherReceivedSigterm,
    WatcherReceivedSigint,
    WatcherReceivedCtrlC,
    WatcherCtrlCListenFailed(String),
    WatcherSignalHandlingNotSupported,
    FailedToCreateSigtermHandler,
    FailedToCreateSigintHandler,
}
