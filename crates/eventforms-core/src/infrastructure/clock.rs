//! Response timestamps

use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;

/// Wall clock that never hands out the same instant twice.
///
/// Two submissions landing within the clock's resolution are spaced one
/// microsecond apart so response timestamps are strictly increasing.
#[derive(Debug)]
pub struct MonotonicClock {
    last: Mutex<DateTime<Utc>>,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self { last: Mutex::new(DateTime::<Utc>::MIN_UTC) }
    }

    pub fn now(&self) -> DateTime<Utc> {
        let now = Utc::now();
        let mut last = self.last.lock();
        let next = if now > *last { now } else { *last + Duration::microseconds(1) };
        *last = next;
        next
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strictly_increasing() {
        let clock = MonotonicClock::new();
        let stamps: Vec<_> = (0..1000).map(|_| clock.now()).collect();
        assert!(stamps.windows(2).all(|w| w[0] < w[1]));
    }
}
