use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use bitflags::bitflags;
use chrono::{Local, TimeZone};
use tictac_core::{Dispose, Scope, StateCell, StateValue, Store};

use crate::input::{InputEvent, Key, PointerButton, PointerEventKind};
use crate::session::{self, Analogue, Digital, EditSession, Face};
use crate::{
    ANALOGUE, AnalogueAngles, ClockConfig, ClockError, DIGITAL, Rect, SystemClock, TIME,
    TimeState, Timestamp, Vec2, WallClock, apply_minute_angle, continuous_minute_angle,
    display_angles, display_text, is_valid_time_text,
};

bitflags! {
    /// Faces currently in edit mode.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct EditingFaces: u8 {
        const ANALOGUE = 1;
        const DIGITAL = 1 << 1;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FaceKind {
    Analogue,
    Digital,
}

pub fn editing_faces(store: &Store) -> EditingFaces {
    let mut faces = EditingFaces::empty();
    faces.set(EditingFaces::ANALOGUE, store.get(&ANALOGUE).is_edit_mode());
    faces.set(EditingFaces::DIGITAL, store.get(&DIGITAL).is_edit_mode());
    faces
}

/// Everything a view needs to draw both faces, read in one go.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClockSnapshot {
    pub time: TimeState,
    pub display_angles: AnalogueAngles,
    pub display_text: String,
    pub analogue: EditSession<AnalogueAngles>,
    pub digital: EditSession<String>,
    /// Whether the digital edit buffer would commit.
    pub is_text_valid: bool,
}

impl ClockSnapshot {
    pub fn read<Tz: TimeZone>(store: &Store, tz: &Tz) -> Self {
        let time = store.get(&TIME);
        let local = time.timestamp.to_local(tz).time();
        let digital = store.get(&DIGITAL);
        Self {
            time,
            display_angles: display_angles(local),
            display_text: display_text(local),
            analogue: store.get(&ANALOGUE),
            is_text_valid: is_valid_time_text(&digital.buffer),
            digital,
        }
    }

    /// Edit buffer while editing, display angles otherwise.
    pub fn visible_angles(&self) -> AnalogueAngles {
        self.analogue
            .editing_buffer()
            .map_or(self.display_angles, |angles| angles.normalized())
    }

    pub fn visible_text(&self) -> &str {
        self.digital
            .editing_buffer()
            .map_or(self.display_text.as_str(), String::as_str)
    }

    /// The digital face is mid-edit with text that would be discarded.
    pub fn shows_text_hint(&self) -> bool {
        self.digital.is_edit_mode() && !self.is_text_valid
    }
}

/// Offset between the shared time and the wall clock.
#[derive(Clone)]
struct Correction {
    store: Store,
    wall: Arc<dyn WallClock>,
    offset: Rc<Cell<i64>>,
}

impl Correction {
    /// Re-reads the offset, unless a face is mid-edit.
    fn refresh(&self) {
        if !editing_faces(&self.store).is_empty() {
            return;
        }
        let offset = self
            .store
            .get(&TIME)
            .timestamp
            .as_millis()
            .saturating_sub(self.wall.now_millis());
        self.offset.set(offset);
        log::debug!("clock: correction {offset} ms");
    }

    fn corrected_now(&self) -> i64 {
        self.wall.now_millis().saturating_add(self.offset.get())
    }
}

/// One running composite clock: shared time, both faces, and the tick.
///
/// The host owns the loop. It calls [`CompositeClock::tick`] every
/// [`CompositeClock::tick_interval`], forwards input through the `route_*`
/// methods, and re-renders from [`CompositeClock::snapshot`] when notified.
pub struct CompositeClock<Tz: TimeZone = Local> {
    store: Store,
    tz: Tz,
    correction: Correction,
    scope: Scope,
    config: ClockConfig,
}

impl CompositeClock<Local> {
    /// Clock in the system time zone, driven by the system clock.
    pub fn new(config: ClockConfig) -> Result<Self, ClockError> {
        Self::with_zone(config, Local, Arc::new(SystemClock))
    }
}

impl<Tz: TimeZone + 'static> CompositeClock<Tz> {
    pub fn with_zone(
        config: ClockConfig,
        tz: Tz,
        wall: Arc<dyn WallClock>,
    ) -> Result<Self, ClockError> {
        let initial = match config.initial_timestamp {
            Some(timestamp) => timestamp,
            None => Timestamp::from_millis(wall.now_millis())?,
        };
        let store = Store::with(|store| {
            store.set(&TIME, TimeState::new(initial));
        });

        let clock = Self {
            correction: Correction {
                store: store.clone(),
                wall,
                offset: Rc::new(Cell::new(0)),
            },
            store,
            tz,
            scope: Scope::new(),
            config,
        };
        clock.correction.refresh();
        clock.watch_edit_modes();
        log::debug!("clock: created at {}", initial.as_millis());
        Ok(clock)
    }

    fn watch_edit_modes(&self) {
        let analogue = self.store.watch(&ANALOGUE, |s| s.is_edit_mode(), {
            let correction = self.correction.clone();
            move |_| correction.refresh()
        });
        let digital = self.store.watch(&DIGITAL, |s| s.is_edit_mode(), {
            let correction = self.correction.clone();
            move |_| correction.refresh()
        });
        self.scope.add(analogue);
        self.scope.add(digital);
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn zone(&self) -> &Tz {
        &self.tz
    }

    pub fn config(&self) -> &ClockConfig {
        &self.config
    }

    pub fn tick_interval(&self) -> Duration {
        self.config.tick_interval
    }

    /// Current offset of the shared time from the wall clock, in ms.
    pub fn correction_millis(&self) -> i64 {
        self.correction.offset.get()
    }

    /// Advances the shared time to the corrected wall-clock reading.
    pub fn tick(&self) -> Result<TimeState, ClockError> {
        let timestamp = Timestamp::from_millis(self.correction.corrected_now())
            .inspect_err(|err| log::error!("clock: tick skipped: {err}"))?;
        Ok(crate::time::change_timestamp(&self.store, timestamp))
    }

    // Read accessors

    pub fn time(&self) -> TimeState {
        self.store.get(&TIME)
    }

    pub fn timestamp(&self) -> Timestamp {
        self.time().timestamp
    }

    pub fn display_angles(&self) -> AnalogueAngles {
        display_angles(self.timestamp().to_local(&self.tz).time())
    }

    pub fn display_text(&self) -> String {
        display_text(self.timestamp().to_local(&self.tz).time())
    }

    pub fn analogue(&self) -> EditSession<AnalogueAngles> {
        self.store.get(&ANALOGUE)
    }

    pub fn digital(&self) -> EditSession<String> {
        self.store.get(&DIGITAL)
    }

    pub fn is_text_valid(&self) -> bool {
        is_valid_time_text(&self.digital().buffer)
    }

    pub fn editing_faces(&self) -> EditingFaces {
        editing_faces(&self.store)
    }

    pub fn snapshot(&self) -> ClockSnapshot {
        ClockSnapshot::read(&self.store, &self.tz)
    }

    // Mutators

    /// Sets the shared time. Outside edit mode the new time is kept as the
    /// correction, so later ticks continue from it.
    pub fn change_timestamp(&self, timestamp: Timestamp) -> TimeState {
        let state = crate::time::change_timestamp(&self.store, timestamp);
        self.correction.refresh();
        state
    }

    pub fn enter_edit_mode(&self, face: FaceKind) {
        match face {
            FaceKind::Analogue => self.enter::<Analogue>(),
            FaceKind::Digital => self.enter::<Digital>(),
        }
    }

    pub fn exit_edit_mode(&self, face: FaceKind, submit: bool) {
        match face {
            FaceKind::Analogue => self.exit::<Analogue>(submit),
            FaceKind::Digital => self.exit::<Digital>(submit),
        }
    }

    fn enter<F: Face>(&self) {
        let tz = &self.tz;
        self.store.transact((&F::CELL, &TIME), |pair| {
            session::enter_edit_mode::<F, Tz>(pair, tz)
        });
    }

    fn exit<F: Face>(&self, submit: bool) {
        let tz = &self.tz;
        self.store.transact((&F::CELL, &TIME), |pair| {
            session::exit_edit_mode::<F, Tz>(pair, submit, tz)
        });
    }

    /// Feeds an unwrapped minute angle from the tracker into the analogue buffer.
    pub fn update_analogue_buffer(&self, unwrapped_minute: f64) {
        self.store.update(&ANALOGUE, |s| {
            session::change_buffer(s, apply_minute_angle(s.buffer, unwrapped_minute))
        });
    }

    pub fn update_digital_buffer(&self, text: impl Into<String>) {
        let text = text.into();
        self.store
            .update(&DIGITAL, move |s| session::change_buffer(s, text));
    }

    /// Tracks one pointer sample, `offset` being relative to the face centre
    /// with y up. Ignored unless the analogue face is editing.
    pub fn drag_minute_hand(&self, offset: Vec2) -> Result<(), ClockError> {
        let session = self.analogue();
        if !session.is_edit_mode() {
            return Ok(());
        }
        let unwrapped = continuous_minute_angle(offset, session.buffer.minute)
            .inspect_err(|err| log::warn!("analogue: pointer sample rejected: {err}"))?;
        self.update_analogue_buffer(unwrapped);
        Ok(())
    }

    // Input routing

    /// Routes an event aimed at the analogue face whose screen rect is
    /// `face`. `on_minute_hand` tells whether a pointer-down hit the hand.
    pub fn route_analogue(
        &self,
        face: Rect,
        on_minute_hand: bool,
        event: &InputEvent,
    ) -> Result<(), ClockError> {
        match event {
            InputEvent::Pointer(pointer) => match pointer.event {
                PointerEventKind::Down(PointerButton::Primary) if on_minute_hand => {
                    self.enter_edit_mode(FaceKind::Analogue)
                }
                PointerEventKind::Move => {
                    return self.drag_minute_hand(face.offset_from_center(pointer.position));
                }
                PointerEventKind::Up(_) | PointerEventKind::Leave => {
                    self.exit_edit_mode(FaceKind::Analogue, true)
                }
                PointerEventKind::Cancel => self.exit_edit_mode(FaceKind::Analogue, false),
                _ => {}
            },
            InputEvent::Key(key) if key.key == Key::Escape => {
                self.exit_edit_mode(FaceKind::Analogue, false)
            }
            _ => {}
        }
        Ok(())
    }

    /// Routes an event aimed at the digital face (display or editor).
    pub fn route_digital(&self, event: &InputEvent) {
        match event {
            InputEvent::Pointer(pointer)
                if pointer.event == PointerEventKind::Down(PointerButton::Primary) =>
            {
                self.enter_edit_mode(FaceKind::Digital)
            }
            InputEvent::Text(text) => self.update_digital_buffer(text.as_str()),
            InputEvent::Key(key) => match key.key {
                Key::Enter => self.exit_edit_mode(FaceKind::Digital, true),
                Key::Escape => self.exit_edit_mode(FaceKind::Digital, false),
            },
            InputEvent::FocusLost => self.exit_edit_mode(FaceKind::Digital, false),
            _ => {}
        }
    }

    // Change notification

    /// Subscribes to one clock cell for the lifetime of this clock.
    pub fn subscribe<T: StateValue>(
        &self,
        cell: &StateCell<T>,
        on_change: impl Fn(&T, &T) + 'static,
    ) -> Dispose {
        let dispose = self.store.subscribe(cell, on_change);
        self.scope.add(dispose.clone());
        dispose
    }

    /// Calls `render` with a fresh snapshot whenever any clock cell changes.
    pub fn on_snapshot(&self, render: impl Fn(&ClockSnapshot) + 'static) -> Dispose {
        let render: Rc<dyn Fn()> = {
            let store = self.store.clone();
            let tz = self.tz.clone();
            Rc::new(move || render(&ClockSnapshot::read(&store, &tz)))
        };
        let subs = [
            self.store.subscribe(&TIME, {
                let render = render.clone();
                move |_, _| render()
            }),
            self.store.subscribe(&ANALOGUE, {
                let render = render.clone();
                move |_, _| render()
            }),
            self.store.subscribe(&DIGITAL, move |_, _| render()),
        ];
        let dispose = Dispose::new(move || subs.iter().for_each(Dispose::run));
        self.scope.add(dispose.clone());
        dispose
    }

    /// Tears the clock down: every subscription made through it is dropped
    /// and the store is cleared.
    pub fn dispose(self) {
        let Self { store, scope, .. } = self;
        scope.dispose();
        store.clear();
        log::debug!("clock: disposed");
    }
}
