use chrono::NaiveDateTime;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ClockError {
    /// Pointer sample at (or numerically indistinguishable from) the face centre.
    #[error("pointer offset ({x}, {y}) has no direction")]
    DegeneratePointer { x: f32, y: f32 },

    #[error("'{0}' is not a HH:mm:ss time")]
    InvalidTimeText(String),

    #[error("timestamp {0} ms is outside the supported calendar range")]
    TimestampOutOfRange(i64),

    #[error("local time {0} does not exist in this time zone")]
    NonexistentLocalTime(NaiveDateTime),

    #[error("edited time overflows the calendar")]
    LocalTimeOverflow,
}
