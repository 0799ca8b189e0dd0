//! Live refresh driven by the event loop ticker.

use std::time::{Duration, Instant};
use vigil_core::Poller;

/// Refreshes the active view every `interval` while running.
#[derive(Debug, Clone)]
pub struct LivePoller {
    running: bool,
    interval: Duration,
    last_refresh: Option<Instant>,
}

impl LivePoller {
    pub fn new(interval: Duration) -> Self {
        Self {
            running: true,
            interval,
            last_refresh: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// True when a refresh should be issued at `now`.
    pub fn due(&self, now: Instant) -> bool {
        self.running
            && self
                .last_refresh
                .map_or(true, |last| now.saturating_duration_since(last) >= self.interval)
    }

    pub fn mark_refreshed(&mut self, now: Instant) {
        self.last_refresh = Some(now);
    }
}

impl Poller for LivePoller {
    fn running(&self) -> bool {
        self.running
    }

    fn start(&mut self) {
        self.running = true;
        self.last_refresh = None;
        tracing::debug!("live refresh started");
    }

    fn stop(&mut self) {
        self.running = false;
        tracing::debug!("live refresh stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn due_after_interval() {
        let mut poller = LivePoller::new(Duration::from_secs(5));
        let start = Instant::now();
        assert!(poller.due(start));
        poller.mark_refreshed(start);
        assert!(!poller.due(start + Duration::from_secs(1)));
        assert!(poller.due(start + Duration::from_secs(5)));
    }

    #[test]
    fn stopped_poller_is_never_due() {
        let mut poller = LivePoller::new(Duration::from_secs(5));
        poller.toggle();
        assert!(!poller.running());
        assert!(!poller.due(Instant::now()));
        poller.toggle();
        assert!(poller.due(Instant::now()));
    }
}
