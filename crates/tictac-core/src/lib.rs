//! # Cells, Stores, and Scopes
//!
//! tictac keeps application state in a small reactive store instead of in
//! objects with mutable fields. There are four pieces:
//!
//! - `StateCell<T>`: a typed address with a default value.
//! - `Store`: holds the current value of every cell plus its subscribers.
//! - `transact`: atomic read-compute-write across several cells.
//! - `Dispose` / `Scope`: cleanup for subscriptions, tied to an owner.
//!
//! ## Cells and the store
//!
//! Cells are plain descriptors, so they are usually `const` items. A store
//! creates a cell's value the first time anything touches it:
//!
//! ```rust
//! use tictac_core::*;
//!
//! const NAME: StateCell<String> = StateCell::new("name", String::new);
//!
//! let store = Store::new();
//! store.set(&NAME, "Jane".to_string());
//! store.update(&NAME, |n| format!("{n} Doe"));
//! assert_eq!(store.get(&NAME), "Jane Doe");
//! ```
//!
//! ## Subscriptions
//!
//! Subscribers receive `(new, old)` after every write that changes the
//! value. Writing an equal value is silent.
//!
//! ```rust
//! use std::{cell::RefCell, rc::Rc};
//! use tictac_core::*;
//!
//! const COUNT: StateCell<u32> = StateCell::new("count", || 0);
//!
//! let store = Store::new();
//! let seen = Rc::new(RefCell::new(Vec::new()));
//! let unsubscribe = store.subscribe(&COUNT, {
//!     let seen = seen.clone();
//!     move |new, old| seen.borrow_mut().push((*old, *new))
//! });
//!
//! store.set(&COUNT, 1);
//! store.set(&COUNT, 1);
//! unsubscribe.run();
//! store.set(&COUNT, 2);
//! assert_eq!(*seen.borrow(), vec![(0, 1)]);
//! ```
//!
//! `watch` narrows a subscription to a projection of the value and only
//! fires when that projection changes.
//!
//! ## Lifecycle
//!
//! A store lives as long as the thing it backs. Register every `Dispose` in
//! that owner's `Scope`, dispose the scope on teardown, then `clear()` the
//! store. There is no process-wide store.

pub mod cell;
pub mod effects;
pub mod prelude;
pub mod scope;
pub mod store;
pub mod tests;
pub mod transact;

pub use cell::*;
pub use effects::*;
pub use scope::*;
pub use store::*;
pub use transact::*;
