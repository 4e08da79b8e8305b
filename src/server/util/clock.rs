use chrono::{DateTime, Utc};

/// Source of bill creation timestamps.
///
/// The bill stores take the clock at construction so tests can pin time;
/// everything else runs on the system clock.
pub(crate) trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
pub(crate) struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[cfg(test)]
pub(crate) mod test_clock {
    use std::sync::atomic::{AtomicI64, Ordering};

    use chrono::{DateTime, Utc};

    use super::Clock;

    /// Programmable clock for store tests. Thread-safe, so tests that create
    /// bills concurrently can share one instance.
    pub struct FixedClock {
        epoch_secs: AtomicI64,
    }

    impl FixedClock {
        pub fn at(epoch_secs: i64) -> Self {
            Self {
                epoch_secs: AtomicI64::new(epoch_secs),
            }
        }

        pub fn advance_to(&self, epoch_secs: i64) {
            self.epoch_secs.store(epoch_secs, Ordering::SeqCst);
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            DateTime::from_timestamp(self.epoch_secs.load(Ordering::SeqCst), 0)
                .expect("timestamp in range")
        }
    }
}
