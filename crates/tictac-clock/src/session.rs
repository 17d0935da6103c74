//! Edit-mode life-cycle shared by both faces.
//!
//! Transitions are pure functions over `(session, time)` pairs so the
//! controller can run each one as a single two-cell store transaction.

use std::fmt;

use chrono::{NaiveDateTime, NaiveTime, TimeDelta, TimeZone, Timelike};
use tictac_core::{StateCell, StateValue};

use crate::{
    AnalogueAngles, ClockError, TimeState, Timestamp, display_angles, display_text,
    parse_time_text, whole_units,
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EditMode {
    #[default]
    Idle,
    Editing,
}

/// Per-face edit state. `buffer` is only meaningful while `mode` is `Editing`.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EditSession<B> {
    pub mode: EditMode,
    pub buffer: B,
}

impl<B> EditSession<B> {
    pub fn is_edit_mode(&self) -> bool {
        self.mode == EditMode::Editing
    }

    /// The buffer, or `None` when it is stale.
    pub fn editing_buffer(&self) -> Option<&B> {
        self.is_edit_mode().then_some(&self.buffer)
    }
}

/// One editable clock face.
pub trait Face: 'static {
    type Buffer: StateValue + Default + fmt::Debug;

    const NAME: &'static str;
    const CELL: StateCell<EditSession<Self::Buffer>>;

    /// Buffer contents at the moment edit mode is entered.
    fn snapshot(now: NaiveDateTime) -> Self::Buffer;

    /// Local wall-clock time the buffer asks for, given the pre-edit local time.
    fn commit(buffer: &Self::Buffer, now: NaiveDateTime) -> Result<NaiveDateTime, ClockError>;
}

pub struct Analogue;
pub struct Digital;

pub const ANALOGUE: StateCell<EditSession<AnalogueAngles>> =
    StateCell::new("clock.analogue", EditSession::default);
pub const DIGITAL: StateCell<EditSession<String>> =
    StateCell::new("clock.digital", EditSession::default);

impl Face for Analogue {
    type Buffer = AnalogueAngles;

    const NAME: &'static str = "analogue";
    const CELL: StateCell<EditSession<AnalogueAngles>> = ANALOGUE;

    fn snapshot(now: NaiveDateTime) -> AnalogueAngles {
        display_angles(now.time())
    }

    fn commit(angles: &AnalogueAngles, now: NaiveDateTime) -> Result<NaiveDateTime, ClockError> {
        // the dial cannot tell AM from PM, so keep the half the edit started in
        let hours = whole_units(angles.hour, 12.0) as i64 + 12 * i64::from(now.hour() / 12);
        let minutes = whole_units(angles.minute, 60.0) as i64;
        let seconds = whole_units(angles.second, 60.0) as i64;
        let millis = i64::from(now.nanosecond() / 1_000_000);

        let offset = TimeDelta::try_hours(hours)
            .zip(TimeDelta::try_minutes(minutes))
            .zip(TimeDelta::try_seconds(seconds))
            .and_then(|((h, m), s)| h.checked_add(&m)?.checked_add(&s))
            .and_then(|hms| hms.checked_add(&TimeDelta::milliseconds(millis)))
            .ok_or(ClockError::LocalTimeOverflow)?;

        now.date()
            .and_time(NaiveTime::MIN)
            .checked_add_signed(offset)
            .ok_or(ClockError::LocalTimeOverflow)
    }
}

impl Face for Digital {
    type Buffer = String;

    const NAME: &'static str = "digital";
    const CELL: StateCell<EditSession<String>> = DIGITAL;

    fn snapshot(now: NaiveDateTime) -> String {
        display_text(now.time())
    }

    fn commit(text: &String, now: NaiveDateTime) -> Result<NaiveDateTime, ClockError> {
        Ok(now.date().and_time(parse_time_text(text)?))
    }
}

/// New timestamp for a committed buffer, anchored to `current`'s local date.
pub fn commit_timestamp<F: Face, Tz: TimeZone>(
    buffer: &F::Buffer,
    current: Timestamp,
    tz: &Tz,
) -> Result<Timestamp, ClockError> {
    let local = F::commit(buffer, current.to_local(tz))?;
    Timestamp::from_local(local, tz)
}

/// `Idle -> Editing`, snapshotting the buffer from `time`. No-op while editing.
pub fn enter_edit_mode<F: Face, Tz: TimeZone>(
    (session, time): (EditSession<F::Buffer>, TimeState),
    tz: &Tz,
) -> (EditSession<F::Buffer>, TimeState) {
    if session.is_edit_mode() {
        return (session, time);
    }
    let buffer = F::snapshot(time.timestamp.to_local(tz));
    log::debug!("{}: enter edit mode with {:?}", F::NAME, buffer);
    (
        EditSession {
            mode: EditMode::Editing,
            buffer,
        },
        time,
    )
}

/// `Editing -> Idle`. With `submit`, a committable buffer replaces the
/// timestamp; an uncommittable one is dropped. No-op while idle.
pub fn exit_edit_mode<F: Face, Tz: TimeZone>(
    (session, time): (EditSession<F::Buffer>, TimeState),
    submit: bool,
    tz: &Tz,
) -> (EditSession<F::Buffer>, TimeState) {
    if !session.is_edit_mode() {
        return (session, time);
    }

    let mut time = time;
    if submit {
        match commit_timestamp::<F, Tz>(&session.buffer, time.timestamp, tz) {
            Ok(timestamp) => {
                log::debug!("{}: commit {}", F::NAME, timestamp.as_millis());
                time = TimeState::new(timestamp);
            }
            Err(err) => log::debug!("{}: edit discarded: {err}", F::NAME),
        }
    } else {
        log::debug!("{}: edit cancelled", F::NAME);
    }

    (
        EditSession {
            mode: EditMode::Idle,
            ..session
        },
        time,
    )
}

/// Mid-edit buffer replacement. Ignored while idle.
pub fn change_buffer<B: Clone>(session: &EditSession<B>, buffer: B) -> EditSession<B> {
    if !session.is_edit_mode() {
        return session.clone();
    }
    EditSession {
        mode: EditMode::Editing,
        buffer,
    }
}
