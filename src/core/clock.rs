use std::time::{Duration, Instant};

/// Monotonic clock for the controls.
/// Every controls operation takes a timestamp measured from this origin
#[derive(Debug)]
pub struct Clock {
    origin: Instant,
}

impl Clock {
    /// Create new clock starting now
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }

    /// Time elapsed since the clock was created
    pub fn now(&self) -> Duration {
        self.origin.elapsed()
    }

    /// Convert a controls timestamp back to an `Instant` (for event loop deadlines)
    pub fn instant_at(&self, at: Duration) -> Instant {
        self.origin + at
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn clock_measures_elapsed() {
        let clock = Clock::new();

        thread::sleep(Duration::from_millis(10));
        let now = clock.now();

        assert!(now >= Duration::from_millis(10));
    }

    #[test]
    fn clock_is_monotonic() {
        let clock = Clock::new();
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
    }

    #[test]
    fn instant_round_trip() {
        let clock = Clock::new();
        let at = Duration::from_millis(250);
        assert_eq!(clock.instant_at(at).duration_since(clock.instant_at(Duration::ZERO)), at);
    }
}
