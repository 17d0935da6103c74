use std::f64::consts::TAU;

use chrono::{NaiveTime, Timelike};

use crate::ClockError;

pub const TIME_TEXT_FORMAT: &str = "%H:%M:%S";

/// Hand angles in radians, clockwise from 12 o'clock.
///
/// Display angles always lie in `[0, 2π)`. An edit buffer's `hour` may leave
/// that range while the minute hand is dragged across 12; use
/// [`AnalogueAngles::normalized`] before drawing.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnalogueAngles {
    pub hour: f64,
    pub minute: f64,
    pub second: f64,
}

impl AnalogueAngles {
    pub fn normalized(self) -> Self {
        Self {
            hour: fold_angle(self.hour),
            minute: fold_angle(self.minute),
            second: fold_angle(self.second),
        }
    }
}

/// Folds any finite angle into `[0, 2π)`.
pub fn fold_angle(angle: f64) -> f64 {
    let folded = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if folded >= TAU { 0.0 } else { folded }
}

/// Completed units on a dial with `per_turn` divisions. An angle a hair
/// below a mark (radian round-off) counts as reaching it.
pub fn whole_units(angle: f64, per_turn: f64) -> f64 {
    (angle / TAU * per_turn + 1e-9).floor()
}

pub fn display_angles(time: NaiveTime) -> AnalogueAngles {
    let hours = f64::from(time.hour() % 12);
    let minutes = f64::from(time.minute());
    let seconds = f64::from(time.second());
    AnalogueAngles {
        hour: hours / 12.0 * TAU + minutes / 60.0 * (TAU / 12.0),
        minute: minutes / 60.0 * TAU + seconds / 60.0 * (TAU / 60.0),
        second: seconds / 60.0 * TAU,
    }
}

/// Zero-padded 24-hour `HH:mm:ss`.
pub fn display_text(time: NaiveTime) -> String {
    time.format(TIME_TEXT_FORMAT).to_string()
}

pub fn is_valid_time_text(text: &str) -> bool {
    parse_time_text(text).is_ok()
}

/// Strict `HH:mm:ss`: two digits per field, `00..=23` / `00..=59` / `00..=59`.
pub fn parse_time_text(text: &str) -> Result<NaiveTime, ClockError> {
    let invalid = || ClockError::InvalidTimeText(text.to_owned());

    let bytes = text.as_bytes();
    let shaped = bytes.len() == 8
        && bytes[2] == b':'
        && bytes[5] == b':'
        && [0, 1, 3, 4, 6, 7].iter().all(|&i| bytes[i].is_ascii_digit());
    if !shaped {
        return Err(invalid());
    }

    let field = |at: usize| text[at..at + 2].parse::<u32>().map_err(|_| invalid());
    NaiveTime::from_hms_opt(field(0)?, field(3)?, field(6)?).ok_or_else(invalid)
}
