use chrono::{DateTime, Datelike, NaiveDateTime, TimeDelta, TimeZone, Utc};
use tictac_core::{StateCell, Store};

use crate::ClockError;

const MAX_ABS_YEAR: i32 = 100_000;

/// Milliseconds since the Unix epoch, always within a calendar-representable range.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Timestamp(i64);

impl Timestamp {
    pub const EPOCH: Timestamp = Timestamp(0);

    pub fn from_millis(millis: i64) -> Result<Self, ClockError> {
        match DateTime::<Utc>::from_timestamp_millis(millis) {
            Some(dt) if dt.year().abs() < MAX_ABS_YEAR => Ok(Self(millis)),
            _ => Err(ClockError::TimestampOutOfRange(millis)),
        }
    }

    pub const fn as_millis(self) -> i64 {
        self.0
    }

    /// Wall-clock reading of this instant in `tz`.
    pub fn to_local<Tz: TimeZone>(self, tz: &Tz) -> NaiveDateTime {
        let utc = DateTime::<Utc>::from_timestamp_millis(self.0)
            .unwrap_or_default()
            .naive_utc();
        tz.from_utc_datetime(&utc).naive_local()
    }

    /// Instant at which `tz` shows `local`. Ambiguous readings resolve to the
    /// earlier instant; readings inside a DST gap move forward by an hour.
    pub fn from_local<Tz: TimeZone>(local: NaiveDateTime, tz: &Tz) -> Result<Self, ClockError> {
        let resolved = tz.from_local_datetime(&local).earliest().or_else(|| {
            local
                .checked_add_signed(TimeDelta::hours(1))
                .and_then(|shifted| tz.from_local_datetime(&shifted).earliest())
        });
        match resolved {
            Some(dt) => Self::from_millis(dt.timestamp_millis()),
            None => Err(ClockError::NonexistentLocalTime(local)),
        }
    }
}

/// The single shared time value both faces are derived from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeState {
    pub timestamp: Timestamp,
}

impl TimeState {
    pub fn new(timestamp: Timestamp) -> Self {
        Self { timestamp }
    }

    fn epoch() -> Self {
        Self::new(Timestamp::EPOCH)
    }
}

pub const TIME: StateCell<TimeState> = StateCell::new("clock.time", TimeState::epoch);

/// Replaces the timestamp held in `store` as a single transaction.
pub fn change_timestamp(store: &Store, timestamp: Timestamp) -> TimeState {
    let (state,) = store.transact((&TIME,), |_| (TimeState::new(timestamp),));
    log::trace!("time: {}", timestamp.as_millis());
    state
}
