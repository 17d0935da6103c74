use std::time::Duration;

use crate::Timestamp;

pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClockConfig {
    /// How often the host should call `CompositeClock::tick`.
    pub tick_interval: Duration,
    /// Starting time; `None` reads the wall clock.
    pub initial_timestamp: Option<Timestamp>,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            tick_interval: DEFAULT_TICK_INTERVAL,
            initial_timestamp: None,
        }
    }
}

impl ClockConfig {
    /// Starts at a fixed time instead of the wall clock.
    pub fn at(timestamp: Timestamp) -> Self {
        Self {
            initial_timestamp: Some(timestamp),
            ..Self::default()
        }
    }

    pub fn with_tick_interval(self, tick_interval: Duration) -> Self {
        Self {
            tick_interval,
            ..self
        }
    }
}
