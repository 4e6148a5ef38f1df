#[cfg(test)]
mod tests {
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};
    use vigil::libs::config::{Config, MonitorConfig};

    /// Test context to ensure a clean environment for each config test.
    /// It sets up a temporary directory to act as the user's home/appdata
    /// directory.
    struct ConfigTestContext {
        _temp_dir: TempDir,
    }

    impl TestContext for ConfigTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            // Mock the home/appdata directory for cross-platform compatibility.
            std::env::set_var("HOME", temp_dir.path());
            std::env::set_var("LOCALAPPDATA", temp_dir.path());
            ConfigTestContext { _temp_dir: temp_dir }
        }
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_default_config(_ctx: &mut ConfigTestContext) {
        let config = Config::default();
        assert!(config.monitor.is_none());
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_monitor_defaults_match_the_state_machine(_ctx: &mut ConfigTestContext) {
        let monitor = MonitorConfig::default();
        assert_eq!(monitor.noise_threshold, 1000);
        assert_eq!(monitor.activity_threshold, 2000);
        assert_eq!(monitor.idle_threshold, 5000);
        assert_eq!(monitor.sensitivity, 3);
        assert_eq!(monitor.poll_interval, 1000);
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_read_nonexistent_config(_ctx: &mut ConfigTestContext) {
        // When no config file exists, read() should return the default config.
        let config = Config::read().unwrap();
        assert!(config.monitor.is_none());
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_save_and_read_round_trip(_ctx: &mut ConfigTestContext) {
        let mut config = Config::default();
        config.monitor = Some(MonitorConfig {
            noise_threshold: 800,
            activity_threshold: 1500,
            idle_threshold: 30_000,
            sensitivity: 7,
            poll_interval: 250,
        });
        config.save().unwrap();

        let loaded = Config::read().unwrap();
        assert_eq!(loaded.monitor, config.monitor);
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_delete_removes_config(_ctx: &mut ConfigTestContext) {
        let mut config = Config::default();
        config.monitor = Some(MonitorConfig::default());
        config.save().unwrap();

        Config::delete().unwrap();
        let loaded = Config::read().unwrap();
        assert!(loaded.monitor.is_none());
    }
}
