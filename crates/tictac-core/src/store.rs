use std::any::Any;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use smallvec::SmallVec;

use crate::{CellKey, Dispose, StateCell, StateValue};

pub type SubId = usize;

type Callback = Rc<dyn Fn(&dyn Any, &dyn Any)>;

struct Subscriber {
    id: SubId,
    on_change: Callback,
}

#[derive(Default)]
struct Registry {
    values: HashMap<CellKey, Box<dyn Any>>,
    subscribers: HashMap<CellKey, SmallVec<[Subscriber; 4]>>,
    next_sub: SubId,
}

impl Registry {
    fn read<T: StateValue>(&mut self, cell: &StateCell<T>) -> T {
        let slot = self
            .values
            .entry(cell.key())
            .or_insert_with(|| Box::new(cell.initial()));
        if let Some(v) = slot.downcast_ref::<T>() {
            return v.clone();
        }
        log::warn!(
            "store: cell '{}' read with a different type; re-initialising.",
            cell.key()
        );
        let v = cell.initial();
        *slot = Box::new(v.clone());
        v
    }

    /// Stores `value` and returns the previous one, or `None` if nothing changed.
    fn replace<T: StateValue>(&mut self, cell: &StateCell<T>, value: T) -> Option<T> {
        let old = self.read(cell);
        if old == value {
            return None;
        }
        self.values.insert(cell.key(), Box::new(value));
        Some(old)
    }

    fn unsubscribe(&mut self, key: CellKey, id: SubId) {
        if let Some(subs) = self.subscribers.get_mut(key) {
            subs.retain(|s| s.id != id);
            if subs.is_empty() {
                self.subscribers.remove(key);
            }
        }
    }
}

/// Registry of cell values and their subscribers.
///
/// Cloning a `Store` yields another handle to the same registry. The store is
/// single-threaded (`!Send`): every read-compute-write runs inside one
/// synchronous call, which is what makes [`Store::transact`] atomic to
/// observers.
#[derive(Clone, Default)]
pub struct Store(Rc<RefCell<Registry>>);

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fresh store with `init` applied before anyone else can observe it.
    pub fn with(init: impl FnOnce(&Store)) -> Self {
        let store = Self::new();
        init(&store);
        store
    }

    /// Current value of `cell`, creating it from the cell's default on first access.
    pub fn get<T: StateValue>(&self, cell: &StateCell<T>) -> T {
        self.0.borrow_mut().read(cell)
    }

    /// Whether `cell` currently has a value in this store.
    pub fn contains<T: StateValue>(&self, cell: &StateCell<T>) -> bool {
        self.0.borrow().values.contains_key(cell.key())
    }

    /// Writes `value`. Subscribers run synchronously, in subscription order,
    /// with `(new, old)` only if the value actually changed.
    pub fn set<T: StateValue>(&self, cell: &StateCell<T>, value: T) -> T {
        if let Some(old) = self.replace_quiet(cell, value.clone()) {
            self.dispatch(cell, &value, &old);
        }
        value
    }

    /// `set` with a pure updater over the current value.
    pub fn update<T: StateValue>(&self, cell: &StateCell<T>, f: impl FnOnce(&T) -> T) -> T {
        let current = self.get(cell);
        self.set(cell, f(&current))
    }

    pub fn subscribe<T: StateValue>(
        &self,
        cell: &StateCell<T>,
        on_change: impl Fn(&T, &T) + 'static,
    ) -> Dispose {
        let key = cell.key();
        let id = {
            let mut reg = self.0.borrow_mut();
            let id = reg.next_sub;
            reg.next_sub += 1;
            let on_change: Callback = Rc::new(move |new: &dyn Any, old: &dyn Any| {
                if let (Some(new), Some(old)) = (new.downcast_ref::<T>(), old.downcast_ref::<T>())
                {
                    on_change(new, old);
                }
            });
            reg.subscribers
                .entry(key)
                .or_default()
                .push(Subscriber { id, on_change });
            id
        };

        let weak = Rc::downgrade(&self.0);
        Dispose::new(move || {
            if let Some(reg) = weak.upgrade() {
                reg.borrow_mut().unsubscribe(key, id);
            }
        })
    }

    /// Subscribes to a projection of `cell`; `on_change` fires only when the
    /// projected value differs from the last one seen.
    pub fn watch<T, U>(
        &self,
        cell: &StateCell<T>,
        select: impl Fn(&T) -> U + 'static,
        on_change: impl Fn(&U) + 'static,
    ) -> Dispose
    where
        T: StateValue,
        U: Clone + PartialEq + 'static,
    {
        let last = RefCell::new(select(&self.get(cell)));
        self.subscribe(cell, move |new, _old| {
            let next = select(new);
            if *last.borrow() == next {
                return;
            }
            last.replace(next.clone());
            on_change(&next);
        })
    }

    pub fn subscriber_count<T: StateValue>(&self, cell: &StateCell<T>) -> usize {
        self.0
            .borrow()
            .subscribers
            .get(cell.key())
            .map_or(0, |subs| subs.len())
    }

    /// Drops every value and subscriber. Cells re-initialise lazily afterwards.
    pub fn clear(&self) {
        let (values, subscribers) = {
            let mut reg = self.0.borrow_mut();
            (
                std::mem::take(&mut reg.values),
                std::mem::take(&mut reg.subscribers),
            )
        };
        log::debug!(
            "store: cleared {} cells, {} subscriber lists",
            values.len(),
            subscribers.len()
        );
        // dropped outside the borrow: captured state may touch the store
        drop(values);
        drop(subscribers);
    }

    pub(crate) fn replace_quiet<T: StateValue>(&self, cell: &StateCell<T>, value: T) -> Option<T> {
        self.0.borrow_mut().replace(cell, value)
    }

    /// Runs one notification round over a snapshot of the subscriber list.
    pub(crate) fn dispatch<T: StateValue>(&self, cell: &StateCell<T>, new: &T, old: &T) {
        let round: SmallVec<[Callback; 4]> = self
            .0
            .borrow()
            .subscribers
            .get(cell.key())
            .map(|subs| subs.iter().map(|s| s.on_change.clone()).collect())
            .unwrap_or_default();
        for on_change in round {
            on_change(new, old);
        }
    }
}
