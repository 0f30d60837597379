//! Clock collaborator
//!
//! Read timestamps only rank entries for eviction; they never decide
//! validity. `ManualClock` lets callers control that ranking exactly.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, SystemTime};

/// Source of "now" for read bookkeeping
pub trait Clock: Send + Sync {
    fn now(&self) -> SystemTime;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> SystemTime {
        SystemTime::now()
    }
}

/// Millisecond clock that only moves when told to
///
/// Clones share the same counter, so a caller can hand one copy to a
/// cache and keep another to advance time.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    millis: Arc<AtomicU64>,
}

impl ManualClock {
    /// Create a clock reading `millis` after the Unix epoch
    pub fn starting_at(millis: u64) -> Self {
        Self {
            millis: Arc::new(AtomicU64::new(millis)),
        }
    }

    /// Move the clock forward, saturating at `u64::MAX` milliseconds
    pub fn advance(&self, by: Duration) {
        let by = u64::try_from(by.as_millis()).unwrap_or(u64::MAX);
        // The closure always returns Some, so the update cannot fail
        let _ = self
            .millis
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |current| {
                Some(current.saturating_add(by))
            });
    }

    /// Set the clock to an absolute millisecond value
    pub fn set_millis(&self, millis: u64) {
        self.millis.store(millis, Ordering::Relaxed);
    }

    pub fn millis(&self) -> u64 {
        self.millis.load(Ordering::Relaxed)
    }
}

impl Clock for ManualClock {
    fn now(&self) -> SystemTime {
        SystemTime::UNIX_EPOCH + Duration::from_millis(self.millis())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_shared_between_clones() {
        let clock = ManualClock::starting_at(1_000);
        let handle = clock.clone();

        handle.advance(Duration::from_millis(250));
        assert_eq!(clock.millis(), 1_250);
        assert_eq!(
            clock.now(),
            SystemTime::UNIX_EPOCH + Duration::from_millis(1_250)
        );

        handle.set_millis(5);
        assert_eq!(clock.millis(), 5);
    }

    #[test]
    fn test_advance_saturates() {
        let clock = ManualClock::starting_at(u64::MAX - 10);
        clock.advance(Duration::from_millis(100));
        assert_eq!(clock.millis(), u64::MAX);

        let clock = ManualClock::starting_at(0);
        clock.advance(Duration::MAX);
        assert_eq!(clock.millis(), u64::MAX);
    }

    #[test]
    fn test_system_clock_is_after_epoch() {
        assert!(SystemClock.now() > SystemTime::UNIX_EPOCH);
    }
}
