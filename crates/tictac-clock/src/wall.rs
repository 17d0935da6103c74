use std::time::Duration;

use parking_lot::Mutex;
use web_time::{SystemTime, UNIX_EPOCH};

/// Source of real time, in milliseconds since the Unix epoch.
pub trait WallClock: Send + Sync + 'static {
    fn now_millis(&self) -> i64;
}

pub struct SystemClock;

impl WallClock for SystemClock {
    fn now_millis(&self) -> i64 {
        match SystemTime::now().duration_since(UNIX_EPOCH) {
            Ok(after) => i64::try_from(after.as_millis()).unwrap_or(i64::MAX),
            Err(before) => i64::try_from(before.duration().as_millis()).map_or(i64::MIN, |ms| -ms),
        }
    }
}

/// A wall clock you can drive deterministically.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Mutex<i64>,
}

impl ManualClock {
    pub fn new(now_millis: i64) -> Self {
        Self {
            now: Mutex::new(now_millis),
        }
    }

    pub fn set(&self, now_millis: i64) {
        *self.now.lock() = now_millis;
    }

    pub fn advance(&self, by: Duration) {
        let by = i64::try_from(by.as_millis()).unwrap_or(i64::MAX);
        let mut now = self.now.lock();
        *now = now.saturating_add(by);
    }
}

impl WallClock for ManualClock {
    fn now_millis(&self) -> i64 {
        *self.now.lock()
    }
}
