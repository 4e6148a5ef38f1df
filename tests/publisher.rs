#[cfg(test)]
mod tests {
    use parking_lot::Mutex;
    use std::sync::atomic::{AtomicI64, Ordering};
    use std::sync::Arc;
    use vigil::libs::clock::Clock;
    use vigil::libs::input::NullInputFactory;
    use vigil::libs::monitor::{ActivityMonitor, ActivityState};

    struct TestClock {
        now_micros: AtomicI64,
    }

    impl TestClock {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                now_micros: AtomicI64::new(10_000_000),
            })
        }

        fn advance_ms(&self, ms: i64) {
            self.now_micros.fetch_add(ms * 1_000, Ordering::SeqCst);
        }
    }

    impl Clock for TestClock {
        fn now_micros(&self) -> i64 {
            self.now_micros.load(Ordering::SeqCst)
        }
    }

    fn collecting_monitor() -> (ActivityMonitor, Arc<TestClock>, Arc<Mutex<Vec<ActivityState>>>) {
        let clock = TestClock::new();
        let monitor = ActivityMonitor::with_clock(&NullInputFactory, clock.clone());
        monitor.set_parameters(1000, 0, 5000, 3);
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        monitor.subscribe(move |state| sink.lock().push(state));
        (monitor, clock, seen)
    }

    #[test]
    fn test_every_transition_is_published_in_order() {
        let (monitor, _clock, seen) = collecting_monitor();

        monitor.action_notify();
        monitor.suspend();
        monitor.resume();

        assert_eq!(
            *seen.lock(),
            vec![ActivityState::Active, ActivityState::Suspended, ActivityState::Idle]
        );
    }

    #[test]
    fn test_events_publish_transitions_only() {
        let (monitor, clock, seen) = collecting_monitor();

        monitor.action_notify();
        clock.advance_ms(10);
        monitor.keyboard_notify(false);
        clock.advance_ms(10);
        monitor.keyboard_notify(false);

        // Active is announced once; staying active is not news.
        assert_eq!(*seen.lock(), vec![ActivityState::Active]);
    }

    #[test]
    fn test_administrative_calls_publish_unchanged_state() {
        let (monitor, _clock, seen) = collecting_monitor();

        monitor.force_idle();
        monitor.force_idle();

        // Publishing an unchanged state is allowed and observable.
        assert_eq!(*seen.lock(), vec![ActivityState::Idle, ActivityState::Idle]);
    }

    #[test]
    fn test_queries_publish_the_returned_state() {
        let (monitor, clock, seen) = collecting_monitor();

        monitor.action_notify();
        clock.advance_ms(6000);
        assert_eq!(monitor.get_current_state(), ActivityState::Idle);

        assert_eq!(*seen.lock(), vec![ActivityState::Active, ActivityState::Idle]);
    }

    #[test]
    fn test_all_observers_receive_publications() {
        let clock = TestClock::new();
        let monitor = ActivityMonitor::with_clock(&NullInputFactory, clock);
        monitor.set_parameters(1000, 0, 5000, 3);

        let first = Arc::new(Mutex::new(Vec::new()));
        let second = Arc::new(Mutex::new(Vec::new()));
        let sink = first.clone();
        monitor.subscribe(move |state| sink.lock().push(state));
        let sink = second.clone();
        monitor.subscribe(move |state| sink.lock().push(state));

        monitor.suspend();

        assert_eq!(*first.lock(), vec![ActivityState::Suspended]);
        assert_eq!(*second.lock(), vec![ActivityState::Suspended]);
    }

    #[test]
    fn test_observer_may_reenter_the_monitor() {
        let clock = TestClock::new();
        let monitor = Arc::new(ActivityMonitor::with_clock(&NullInputFactory, clock));
        monitor.set_parameters(1000, 0, 5000, 3);

        let observed = Arc::new(Mutex::new(Vec::new()));
        let sink = observed.clone();
        let reentrant = monitor.clone();
        // Calls back into the monitor from inside the observer; deadlocks
        // if publication ran under the monitor's lock.
        monitor.subscribe(move |_state| {
            sink.lock().push(reentrant.get_parameters());
        });

        monitor.suspend();

        assert_eq!(*observed.lock(), vec![(1000, 0, 5000, 3)]);
    }
}
