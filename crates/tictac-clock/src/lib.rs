//! # Composite clock
//!
//! One shared time value, two faces that show it, and an edit mode on each
//! face that can change it.
//!
//! - `TIME` holds the canonical `Timestamp`. Only `change_timestamp` writes it.
//! - The analogue face shows `display_angles`, the digital face shows
//!   `display_text`. Both are pure functions of the local time.
//! - `ANALOGUE` / `DIGITAL` hold each face's `EditSession`. Entering edit
//!   mode snapshots the current display value into the session buffer;
//!   exiting with `submit` converts the buffer back into a timestamp.
//! - While the analogue face is editing, pointer samples go through
//!   [`continuous_minute_angle`], which keeps the minute hand continuous
//!   across 12 o'clock and carries the hour hand with it.
//!
//! All of it lives in a [`tictac_core::Store`] owned by a [`CompositeClock`]:
//!
//! ```rust
//! use std::sync::Arc;
//! use chrono::Utc;
//! use tictac_clock::*;
//!
//! let start = Timestamp::from_millis(45_296_000).unwrap(); // 12:34:56 UTC
//! let wall = Arc::new(ManualClock::new(start.as_millis()));
//! let clock = CompositeClock::with_zone(ClockConfig::at(start), Utc, wall.clone()).unwrap();
//! assert_eq!(clock.display_text(), "12:34:56");
//!
//! clock.enter_edit_mode(FaceKind::Digital);
//! clock.update_digital_buffer("08:00:00");
//! clock.exit_edit_mode(FaceKind::Digital, true);
//! assert_eq!(clock.display_text(), "08:00:00");
//!
//! // the edit persists as an offset from the wall clock
//! wall.advance(std::time::Duration::from_secs(5));
//! clock.tick().unwrap();
//! assert_eq!(clock.display_text(), "08:00:05");
//! clock.dispose();
//! ```
//!
//! ## Ticking and correction
//!
//! The host calls `tick` every `tick_interval` (100 ms by default). Each tick
//! writes `wall clock + correction`. The correction is re-read as
//! `timestamp - wall clock` whenever an edit ends and no face is still
//! editing, and after `change_timestamp` outside edit mode, so a committed
//! edit survives as an offset and a live edit is never fought by the tick.

pub mod config;
pub mod controller;
pub mod display;
pub mod error;
pub mod geometry;
pub mod input;
pub mod prelude;
pub mod session;
pub mod time;
pub mod tracker;
pub mod wall;

pub use config::*;
pub use controller::*;
pub use display::*;
pub use error::*;
pub use geometry::*;
pub use input::*;
pub use session::{
    ANALOGUE, Analogue, DIGITAL, Digital, EditMode, EditSession, Face, change_buffer,
    commit_timestamp,
};
pub use time::*;
pub use tracker::*;
pub use wall::*;
