pub use crate::cell::{CellKey, StateCell, StateValue};
pub use crate::effects::Dispose;
pub use crate::scope::Scope;
pub use crate::store::{Store, SubId};
pub use crate::transact::CellGroup;
