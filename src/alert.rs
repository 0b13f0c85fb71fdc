//! Alert debouncing and notification delivery.
//!
//! The fusion loop produces a raw touching signal every cycle; left alone,
//! a sustained touch would fire a notification ten times a second. The
//! debouncer enforces a minimum quiet interval measured from the last fired
//! alert, so a continuous touch produces one alert per cooldown window.

use std::time::{Duration, Instant};

/// Per-cycle debouncer verdict.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AlertDecision {
    /// Fire the notification and restart the cooldown window.
    Alert,
    /// Nothing to report, or touching but still inside the cooldown window.
    Quiet,
}

/// Cooldown state machine.
///
/// `last_fired` starts empty so the first qualifying touch always alerts.
/// Time comes in as an explicit `Instant` so the machine can be tested
/// without the loop or detectors.
pub struct AlertDebouncer {
    cooldown: Duration,
    last_fired: Option<Instant>,
}

impl AlertDebouncer {
    pub fn new(cooldown: Duration) -> Self {
        Self {
            cooldown,
            last_fired: None,
        }
    }

    pub fn cooldown(&self) -> Duration {
        self.cooldown
    }

    /// Feed one cycle's touching signal.
    pub fn observe(&mut self, touching: bool, now: Instant) -> AlertDecision {
        if !touching {
            return AlertDecision::Quiet;
        }
        let ready = match self.last_fired {
            None => true,
            Some(fired) => now.duration_since(fired) >= self.cooldown,
        };
        if ready {
            self.last_fired = Some(now);
            AlertDecision::Alert
        } else {
            AlertDecision::Quiet
        }
    }
}

/// A fire-and-forget alert event.
#[derive(Clone, Debug)]
pub struct Notification {
    pub title: String,
    pub body: String,
    /// Requested auto-dismiss duration; set to the cooldown interval so the
    /// previous toast is gone before the next one can fire.
    pub timeout: Duration,
}

/// Delivery endpoint for alerts. Implementations must not block the loop;
/// OS toast integration lives in the embedding application.
pub trait NotificationSink: Send {
    fn notify(&mut self, notification: &Notification);
}

/// Default sink: the alert lands in the log stream.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl NotificationSink for LogNotifier {
    fn notify(&mut self, notification: &Notification) {
        log::warn!("{}: {}", notification.title, notification.body);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COOLDOWN: Duration = Duration::from_secs(10);

    #[test]
    fn first_touch_always_alerts() {
        let mut deb = AlertDebouncer::new(COOLDOWN);
        assert_eq!(deb.observe(true, Instant::now()), AlertDecision::Alert);
    }

    #[test]
    fn not_touching_is_quiet() {
        let mut deb = AlertDebouncer::new(COOLDOWN);
        assert_eq!(deb.observe(false, Instant::now()), AlertDecision::Quiet);
        // A non-touching cycle must not affect the cooldown clock.
        assert_eq!(deb.observe(true, Instant::now()), AlertDecision::Alert);
    }

    #[test]
    fn repeat_touch_inside_cooldown_is_suppressed() {
        let mut deb = AlertDebouncer::new(COOLDOWN);
        let t0 = Instant::now();
        assert_eq!(deb.observe(true, t0), AlertDecision::Alert);
        assert_eq!(
            deb.observe(true, t0 + Duration::from_secs(5)),
            AlertDecision::Quiet
        );
        assert_eq!(
            deb.observe(true, t0 + Duration::from_secs(11)),
            AlertDecision::Alert
        );
    }

    #[test]
    fn sustained_touch_alerts_once_per_window() {
        let mut deb = AlertDebouncer::new(COOLDOWN);
        let t0 = Instant::now();
        let mut alerts = 0;
        for tick in 0..=100 {
            let now = t0 + Duration::from_millis(tick * 100);
            if deb.observe(true, now) == AlertDecision::Alert {
                alerts += 1;
            }
        }
        // Touching every 100 ms from t0 through t0+10s: the t0 alert, and one
        // more once the window reopens at exactly t0+10s.
        assert_eq!(alerts, 2);
    }

    #[test]
    fn cooldown_runs_from_last_fired_not_episode_start() {
        let mut deb = AlertDebouncer::new(COOLDOWN);
        let t0 = Instant::now();
        assert_eq!(deb.observe(true, t0), AlertDecision::Alert);
        // Touch pauses and resumes; window still keyed to the t0 alert.
        assert_eq!(
            deb.observe(false, t0 + Duration::from_secs(4)),
            AlertDecision::Quiet
        );
        assert_eq!(
            deb.observe(true, t0 + Duration::from_secs(8)),
            AlertDecision::Quiet
        );
        assert_eq!(
            deb.observe(true, t0 + Duration::from_secs(10)),
            AlertDecision::Alert
        );
    }
}
