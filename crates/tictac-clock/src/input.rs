use crate::Vec2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerButton {
    Primary,   // Left mouse, touch
    Secondary, // Right mouse
    Tertiary,  // Middle mouse
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerEventKind {
    Down(PointerButton),
    Up(PointerButton),
    Move,
    Cancel,
    Leave,
}

#[derive(Clone, Debug)]
pub struct PointerEvent {
    pub event: PointerEventKind,
    /// Screen position, same space as the face `Rect`.
    pub position: Vec2,
}

impl PointerEvent {
    pub fn mouse(event: PointerEventKind, position: Vec2) -> Self {
        Self { event, position }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Key {
    Enter,
    Escape,
}

#[derive(Clone, Debug)]
pub struct KeyEvent {
    pub key: Key,
}

impl KeyEvent {
    pub fn new(key: Key) -> Self {
        Self { key }
    }
}

#[derive(Clone, Debug)]
pub enum InputEvent {
    Pointer(PointerEvent),
    Key(KeyEvent),
    /// Full replacement text from a text editor.
    Text(String),
    FocusLost,
}
