//! Quiet-period timer for document saves.

use std::time::{Duration, Instant};

/// Holds at most one pending save.
///
/// Each `schedule` pushes the deadline out to `now + delay`; the save fires
/// once `poll` sees the deadline pass.
#[derive(Debug, Clone)]
pub struct SaveDebouncer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl SaveDebouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    #[cfg(test)]
    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn set_delay(&mut self, delay: Duration) {
        self.delay = delay;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Time left before the pending save fires.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.deadline.map(|d| d.saturating_duration_since(now))
    }

    /// Restart the quiet period.
    pub fn schedule(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    /// Returns `true` exactly once per quiet period, when it has elapsed.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Fire immediately if anything is pending.
    pub fn flush(&mut self) -> bool {
        self.deadline.take().is_some()
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(1000);

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    /// Feed edits at the given offsets and poll every 10 ms; count writes.
    fn writes_for(edits: &[u64], until: u64) -> usize {
        let start = Instant::now();
        let mut debouncer = SaveDebouncer::new(DELAY);
        let mut writes = 0;
        let mut t = 0;
        while t <= until {
            if edits.contains(&t) {
                debouncer.schedule(start + ms(t));
            }
            if debouncer.poll(start + ms(t)) {
                writes += 1;
            }
            t += 10;
        }
        writes
    }

    #[test]
    fn test_rapid_edits_coalesce_into_one_write() {
        assert_eq!(writes_for(&[0, 100, 200, 300, 900, 1500], 5000), 1);
    }

    #[test]
    fn test_spaced_edits_write_each_time() {
        assert_eq!(writes_for(&[0, 1500, 3000], 6000), 3);
    }

    #[test]
    fn test_reschedule_pushes_deadline() {
        let start = Instant::now();
        let mut debouncer = SaveDebouncer::new(DELAY);
        debouncer.schedule(start);
        debouncer.schedule(start + ms(800));
        assert!(!debouncer.poll(start + ms(1000)));
        assert!(debouncer.poll(start + ms(1800)));
        assert!(!debouncer.poll(start + ms(5000)));
    }

    #[test]
    fn test_flush_and_cancel() {
        let start = Instant::now();
        let mut debouncer = SaveDebouncer::new(DELAY);
        assert!(!debouncer.flush());

        debouncer.schedule(start);
        assert!(debouncer.flush());
        assert!(!debouncer.is_pending());

        debouncer.schedule(start);
        debouncer.cancel();
        assert!(!debouncer.poll(start + ms(2000)));
    }

    #[test]
    fn test_remaining() {
        let start = Instant::now();
        let mut debouncer = SaveDebouncer::new(DELAY);
        assert_eq!(debouncer.remaining(start), None);
        debouncer.schedule(start);
        assert_eq!(debouncer.remaining(start + ms(400)), Some(ms(600)));
        assert_eq!(debouncer.remaining(start + ms(4000)), Some(Duration::ZERO));
    }
}
