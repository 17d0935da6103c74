use std::fmt;

pub type CellKey = &'static str;

/// Values a `Store` can hold. Equality decides whether a write notifies.
pub trait StateValue: Clone + PartialEq + 'static {}
impl<T> StateValue for T where T: Clone + PartialEq + 'static {}

/// Address of one piece of state.
///
/// A `StateCell` holds no value. It names a slot in a [`crate::Store`] and
/// says how to build that slot's first value, so the same descriptor can be
/// shared by any number of independent stores:
///
/// ```rust
/// use tictac_core::*;
///
/// const COUNT: StateCell<i32> = StateCell::new("count", || 0);
///
/// let store = Store::new();
/// assert_eq!(store.get(&COUNT), 0);
/// store.set(&COUNT, 3);
/// assert_eq!(store.get(&COUNT), 3);
/// ```
pub struct StateCell<T: 'static> {
    key: CellKey,
    init: fn() -> T,
}

impl<T> StateCell<T> {
    pub const fn new(key: CellKey, init: fn() -> T) -> Self {
        Self { key, init }
    }

    pub const fn key(&self) -> CellKey {
        self.key
    }

    /// Fresh default value for this cell.
    pub fn initial(&self) -> T {
        (self.init)()
    }
}

impl<T> Clone for StateCell<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for StateCell<T> {}

impl<T> fmt::Debug for StateCell<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("StateCell").field(&self.key).finish()
    }
}
