use instant::Instant;
use std::time::Duration;

/// Cancel-and-replace scheduling slot.
///
/// At most one value is pending. Scheduling drops whatever was pending and
/// restarts the quiet period, so a burst of calls coalesces into the last
/// value once the burst has been quiet for `quiet`.
#[derive(Debug)]
pub struct Debouncer<T> {
    quiet: Duration,
    pending: Option<(Instant, T)>,
}

impl<T> Debouncer<T> {
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            pending: None,
        }
    }

    #[inline]
    pub fn quiet(&self) -> Duration {
        self.quiet
    }

    /// Replace any pending value and re-arm. Returns the new deadline.
    pub fn schedule(&mut self, now: Instant, value: T) -> Instant {
        let due = now + self.quiet;
        self.pending = Some((due, value));
        due
    }

    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|(_, v)| v)
    }

    #[inline]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn due_at(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(due, _)| *due)
    }

    /// Time left until the pending value fires, zero if overdue.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.due_at().map(|due| {
            if due > now {
                due - now
            } else {
                Duration::ZERO
            }
        })
    }

    /// Take the pending value if its quiet period has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some((due, _)) if now >= *due => self.pending.take().map(|(_, v)| v),
            _ => None,
        }
    }
}
