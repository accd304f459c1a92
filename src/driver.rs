use std::time::{Duration, Instant};

/// Periodic tick source with a period that can change mid-run.
///
/// The timer never reads the clock itself; callers pass `now` in.
pub struct IntervalTimer {
    period: Duration,
    next_due: Option<Instant>,
}

impl IntervalTimer {
    pub fn new() -> Self {
        IntervalTimer { period: Duration::from_millis(0), next_due: None }
    }

    pub fn start(&mut self, period: Duration, now: Instant) {
        self.period = period;
        self.next_due = Some(now + period);
    }

    /// Rebinds the period and restarts the countdown from `now`. Ignored while
    /// stopped, apart from remembering the period.
    pub fn set_period(&mut self, period: Duration, now: Instant) {
        self.period = period;
        if self.next_due.is_some() {
            self.next_due = Some(now + period);
        }
    }

    pub fn stop(&mut self) {
        self.next_due = None;
    }

    pub fn is_running(&self) -> bool {
        self.next_due.is_some()
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// True once per elapsed period. A late poll fires once and schedules the
    /// next tick a full period out rather than firing the missed ones.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.next_due {
            Some(due) if now >= due => {
                let next = due + self.period;
                self.next_due = Some(if next > now { next } else { now + self.period });
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn fires_once_per_period() {
        let t0 = Instant::now();
        let mut timer = IntervalTimer::new();
        timer.start(ms(200), t0);

        assert!(!timer.poll(t0 + ms(199)));
        assert!(timer.poll(t0 + ms(200)));
        assert!(!timer.poll(t0 + ms(250)));
        assert!(timer.poll(t0 + ms(400)));
    }

    #[test]
    fn stopped_timer_never_fires() {
        let t0 = Instant::now();
        let mut timer = IntervalTimer::new();
        assert!(!timer.poll(t0 + ms(10_000)));

        timer.start(ms(100), t0);
        timer.stop();
        assert!(!timer.is_running());
        assert!(!timer.poll(t0 + ms(500)));
    }

    #[test]
    fn new_period_counts_from_the_change() {
        let t0 = Instant::now();
        let mut timer = IntervalTimer::new();
        timer.start(ms(200), t0);
        assert!(timer.poll(t0 + ms(200)));

        timer.set_period(ms(195), t0 + ms(200));
        assert_eq!(timer.period(), ms(195));
        assert!(!timer.poll(t0 + ms(394)));
        assert!(timer.poll(t0 + ms(395)));
    }

    #[test]
    fn set_period_does_not_restart_a_stopped_timer() {
        let t0 = Instant::now();
        let mut timer = IntervalTimer::new();

        timer.set_period(ms(50), t0);
        assert!(!timer.is_running());
        assert!(!timer.poll(t0 + ms(1000)));
    }

    #[test]
    fn late_poll_does_not_burst() {
        let t0 = Instant::now();
        let mut timer = IntervalTimer::new();
        timer.start(ms(100), t0);

        assert!(timer.poll(t0 + ms(1000)));
        assert!(!timer.poll(t0 + ms(1001)));
        assert!(timer.poll(t0 + ms(1100)));
    }
}
