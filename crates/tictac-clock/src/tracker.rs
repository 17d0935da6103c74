//! Pointer-to-minute-hand tracking for the analogue face in edit mode.
//!
//! A pointer position alone only gives an angle modulo one turn. To keep the
//! hand moving continuously through 12 o'clock, each sample is compared with
//! the previous hand direction: when both lie in the upper half-plane and
//! their x signs differ, the hand has just crossed 12 and the result is
//! unwrapped by a full turn in the direction of travel. The unwrapped value
//! then drives the hour hand across sector boundaries.
//!
//! Only one crossing per sample is detected. A pointer that jumps more than
//! half a turn between two samples is taken at face value.

use std::f64::consts::TAU;

use crate::{AnalogueAngles, ClockError, Vec2, fold_angle, whole_units};

/// Unwrapped minute angle for a pointer at `offset` from the face centre
/// (y pointing up), given the hand's previous, folded minute angle.
///
/// The result lies in `(-π/2, 5π/2)`: negative when the hand just moved
/// counter-clockwise through 12, above `2π` when it moved clockwise through 12.
pub fn continuous_minute_angle(offset: Vec2, prev_minute: f64) -> Result<f64, ClockError> {
    let (x, y) = (f64::from(offset.x), f64::from(offset.y));
    let len = x.hypot(y);
    if !len.is_finite() || len <= f64::EPSILON {
        return Err(ClockError::DegeneratePointer {
            x: offset.x,
            y: offset.y,
        });
    }
    let (nx, ny) = (x / len, y / len);

    // unsigned angle from 12 o'clock
    let raw = ny.clamp(-1.0, 1.0).acos();

    let (old_x, old_y) = (prev_minute.sin(), prev_minute.cos());

    let angle = if ny > 0.0 && old_y > 0.0 {
        match (nx >= 0.0, old_x >= 0.0) {
            (true, true) => raw,
            // left -> right through 12
            (true, false) => raw + TAU,
            // right -> left through 12
            (false, true) => -raw,
            (false, false) => TAU - raw,
        }
    } else if nx >= 0.0 {
        raw
    } else {
        TAU - raw
    };

    log::trace!(
        "tracker: offset=({x:.3}, {y:.3}) prev={prev_minute:.4} -> {angle:.4}"
    );
    Ok(angle)
}

/// Applies an unwrapped minute angle to an edit buffer.
///
/// The minute is folded into `[0, 2π)`. The hour keeps its current sector and
/// creeps by the unwrapped minute fraction, so a full-turn crossing moves it
/// into the neighbouring sector.
pub fn apply_minute_angle(angles: AnalogueAngles, unwrapped_minute: f64) -> AnalogueAngles {
    let sector = whole_units(angles.hour, 12.0);
    AnalogueAngles {
        hour: (sector + unwrapped_minute / TAU) * (TAU / 12.0),
        minute: fold_angle(unwrapped_minute),
        second: angles.second,
    }
}

/// One tracker step: pointer sample in, next edit buffer out.
pub fn track(angles: AnalogueAngles, offset: Vec2) -> Result<AnalogueAngles, ClockError> {
    let unwrapped = continuous_minute_angle(offset, angles.minute)?;
    Ok(apply_minute_angle(angles, unwrapped))
}
