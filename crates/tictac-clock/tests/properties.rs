//! Property tests for the pure clock functions: angle and text derivation,
//! text validation, analogue commits and the minute-hand tracker.

use std::f64::consts::{FRAC_PI_2, TAU};

use chrono::{NaiveTime, Utc};
use proptest::prelude::*;
use tictac_clock::session::{enter_edit_mode, exit_edit_mode};
use tictac_clock::*;

fn time_of_day() -> impl Strategy<Value = NaiveTime> {
    (0u32..24, 0u32..60, 0u32..60)
        .prop_map(|(h, m, s)| NaiveTime::from_hms_opt(h, m, s).unwrap())
}

/// Shortest distance between two angles on the circle.
fn circular_distance(a: f64, b: f64) -> f64 {
    let d = fold_angle(a - b);
    d.min(TAU - d)
}

proptest! {
    #[test]
    fn prop_display_angles_in_range(time in time_of_day()) {
        let angles = display_angles(time);
        for angle in [angles.hour, angles.minute, angles.second] {
            prop_assert!((0.0..TAU).contains(&angle), "{angle}");
        }
    }

    #[test]
    fn prop_second_hand_tracks_seconds(time in time_of_day()) {
        use chrono::Timelike;
        let expected = f64::from(time.second()) / 60.0 * TAU;
        prop_assert!((display_angles(time).second - expected).abs() < 1e-12);
    }

    #[test]
    fn prop_display_text_parses_back(time in time_of_day()) {
        let text = display_text(time);
        prop_assert_eq!(text.len(), 8);
        prop_assert!(is_valid_time_text(&text));
        prop_assert_eq!(parse_time_text(&text), Ok(time));
    }

    #[test]
    fn prop_shaped_text_valid_iff_fields_in_range(h in 0u32..100, m in 0u32..100, s in 0u32..100) {
        let text = format!("{h:02}:{m:02}:{s:02}");
        prop_assert_eq!(is_valid_time_text(&text), h < 24 && m < 60 && s < 60);
    }

    #[test]
    fn prop_arbitrary_text_never_panics(text in "\\PC{0,12}") {
        let _ = is_valid_time_text(&text);
    }

    #[test]
    fn prop_analogue_commit_without_drag_keeps_time(millis in 0i64..4_102_444_800_000) {
        let start = TimeState::new(Timestamp::from_millis(millis).unwrap());
        let editing = enter_edit_mode::<Analogue, _>((EditSession::default(), start), &Utc);
        let (session, time) = exit_edit_mode::<Analogue, _>(editing, true, &Utc);
        prop_assert!(!session.is_edit_mode());
        prop_assert_eq!(time, start);
    }

    #[test]
    fn prop_digital_commit_without_edit_truncates_to_seconds(millis in 0i64..4_102_444_800_000) {
        let start = TimeState::new(Timestamp::from_millis(millis).unwrap());
        let editing = enter_edit_mode::<Digital, _>((EditSession::default(), start), &Utc);
        let (_, time) = exit_edit_mode::<Digital, _>(editing, true, &Utc);
        prop_assert_eq!(time.timestamp.as_millis(), millis - millis.rem_euclid(1000));
    }

    #[test]
    fn prop_tracker_points_at_pointer(
        x in -100.0f32..100.0,
        y in -100.0f32..100.0,
        prev in 0.0f64..TAU,
    ) {
        prop_assume!(x.hypot(y) > 0.01);
        let unwrapped = continuous_minute_angle(Vec2::new(x, y), prev).unwrap();
        prop_assert!((-FRAC_PI_2..=TAU + FRAC_PI_2).contains(&unwrapped), "{unwrapped}");

        let pointer = f64::from(x).atan2(f64::from(y));
        prop_assert!(circular_distance(unwrapped, pointer) < 1e-4);
    }

    #[test]
    fn prop_tracked_buffer_keeps_minute_folded(
        x in -100.0f32..100.0,
        y in -100.0f32..100.0,
        time in time_of_day(),
    ) {
        prop_assume!(x.hypot(y) > 0.01);
        let before = display_angles(time);
        let after = track(before, Vec2::new(x, y)).unwrap();
        prop_assert!((0.0..TAU).contains(&after.minute));
        prop_assert_eq!(after.second, before.second);
        // the hour hand never moves by more than one sector per sample
        prop_assert!((after.hour - before.hour).abs() < TAU / 12.0 * 1.5);
    }
}
