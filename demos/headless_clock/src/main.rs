use std::f64::consts::TAU;
use std::thread;

use tictac_clock::prelude::*;

const FACE: Rect = Rect {
    x: 0.0,
    y: 0.0,
    w: 240.0,
    h: 240.0,
};

/// Screen point on the minute hand's path at `angle`, `radius` from the centre.
fn on_dial(angle: f64, radius: f32) -> Vec2 {
    let c = FACE.center();
    Vec2::new(
        c.x + radius * angle.sin() as f32,
        c.y - radius * angle.cos() as f32,
    )
}

fn pointer(event: PointerEventKind, position: Vec2) -> InputEvent {
    InputEvent::Pointer(PointerEvent::mouse(event, position))
}

fn run_for(clock: &CompositeClock, ticks: u32) -> anyhow::Result<()> {
    for _ in 0..ticks {
        thread::sleep(clock.tick_interval());
        clock.tick()?;
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    log::info!("Starting headless clock");

    let clock = CompositeClock::new(ClockConfig::default())?;
    let _render = clock.on_snapshot(|snapshot| {
        let angles = snapshot.visible_angles();
        log::debug!(
            "{} | h={:.3} m={:.3} s={:.3}{}",
            snapshot.visible_text(),
            angles.hour,
            angles.minute,
            angles.second,
            if snapshot.shows_text_hint() { " (invalid)" } else { "" }
        );
    });

    run_for(&clock, 10)?;
    log::info!("now {}", clock.display_text());

    // Drag the minute hand a quarter turn forward and let go.
    let start = clock.display_angles().minute;
    let press = PointerEventKind::Down(PointerButton::Primary);
    clock.route_analogue(FACE, true, &pointer(press, on_dial(start, 90.0)))?;
    for step in 1..=15 {
        let angle = start + TAU / 4.0 * f64::from(step) / 15.0;
        let moved = pointer(PointerEventKind::Move, on_dial(angle, 90.0));
        clock.route_analogue(FACE, true, &moved)?;
        run_for(&clock, 1)?;
    }
    let release = PointerEventKind::Up(PointerButton::Primary);
    clock.route_analogue(FACE, true, &pointer(release, on_dial(start + TAU / 4.0, 90.0)))?;
    log::info!("after analogue edit {}", clock.display_text());

    // Type a new time into the digital face.
    clock.route_digital(&pointer(press, Vec2::new(0.0, 0.0)));
    for text in ["0", "08", "08:0", "08:00:00"] {
        clock.route_digital(&InputEvent::Text(text.to_owned()));
    }
    clock.route_digital(&InputEvent::Key(KeyEvent::new(Key::Enter)));
    log::info!("after digital edit {}", clock.display_text());

    run_for(&clock, 20)?;
    log::info!(
        "now {} (correction {} ms)",
        clock.display_text(),
        clock.correction_millis()
    );

    clock.dispose();
    Ok(())
}
