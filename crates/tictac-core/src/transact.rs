use crate::{StateCell, StateValue, Store};

/// A fixed group of cells that can be read and written as one tuple.
///
/// Implemented for tuples of `&StateCell<_>` of arity one to four.
pub trait CellGroup {
    type Values;

    fn read(&self, store: &Store) -> Self::Values;

    /// Writes every value first, then notifies cell by cell in tuple order,
    /// so no subscriber can observe a partially applied group.
    fn write(&self, store: &Store, values: Self::Values) -> Self::Values;
}

macro_rules! impl_cell_group {
    ($($T:ident $idx:tt),+) => {
        impl<'a, $($T: StateValue),+> CellGroup for ($(&'a StateCell<$T>,)+) {
            type Values = ($($T,)+);

            fn read(&self, store: &Store) -> Self::Values {
                ($(store.get(self.$idx),)+)
            }

            fn write(&self, store: &Store, values: Self::Values) -> Self::Values {
                let pending = ($(store.replace_quiet(self.$idx, values.$idx.clone()),)+);
                $(
                    if let Some(old) = pending.$idx {
                        store.dispatch(self.$idx, &values.$idx, &old);
                    }
                )+
                values
            }
        }
    };
}

impl_cell_group!(A 0);
impl_cell_group!(A 0, B 1);
impl_cell_group!(A 0, B 1, C 2);
impl_cell_group!(A 0, B 1, C 2, D 3);

impl Store {
    /// Atomic read-compute-write over several cells.
    ///
    /// ```rust
    /// use tictac_core::*;
    ///
    /// const FROM: StateCell<i32> = StateCell::new("from", || 10);
    /// const TO: StateCell<i32> = StateCell::new("to", || 0);
    ///
    /// let store = Store::new();
    /// store.transact((&FROM, &TO), |(from, to)| (from - 4, to + 4));
    /// assert_eq!((store.get(&FROM), store.get(&TO)), (6, 4));
    /// ```
    pub fn transact<G: CellGroup>(
        &self,
        cells: G,
        f: impl FnOnce(G::Values) -> G::Values,
    ) -> G::Values {
        let current = cells.read(self);
        let next = f(current);
        cells.write(self, next)
    }
}
