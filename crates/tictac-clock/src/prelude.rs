pub use crate::config::ClockConfig;
pub use crate::controller::{ClockSnapshot, CompositeClock, EditingFaces, FaceKind};
pub use crate::display::{AnalogueAngles, display_angles, display_text, is_valid_time_text};
pub use crate::error::ClockError;
pub use crate::geometry::{Rect, Vec2};
pub use crate::input::{InputEvent, Key, KeyEvent, PointerButton, PointerEvent, PointerEventKind};
pub use crate::session::{EditMode, EditSession};
pub use crate::time::{TimeState, Timestamp};
pub use crate::wall::{ManualClock, SystemClock, WallClock};
pub use tictac_core::{Dispose, Store};
