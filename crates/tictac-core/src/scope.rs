use std::cell::RefCell;
use std::rc::Rc;

use crate::Dispose;

/// Owner of cleanups for one mounted instance.
///
/// Cleanups run in registration order, either on an explicit
/// [`Scope::dispose`] or when the last clone of the scope is dropped.
pub struct Scope {
    inner: Rc<ScopeInner>,
}

struct ScopeInner {
    disposers: RefCell<Vec<Dispose>>,
    children: RefCell<Vec<Scope>>,
}

impl Default for Scope {
    fn default() -> Self {
        Self::new()
    }
}

impl Scope {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(ScopeInner {
                disposers: RefCell::new(Vec::new()),
                children: RefCell::new(Vec::new()),
            }),
        }
    }

    /// Registers `dispose`. Handles that already ran are dropped here, so a
    /// long-lived scope does not accumulate them.
    pub fn add(&self, dispose: Dispose) {
        let mut disposers = self.inner.disposers.borrow_mut();
        disposers.retain(|d| !d.is_spent());
        disposers.push(dispose);
    }

    pub fn add_disposer(&self, disposer: impl FnOnce() + 'static) {
        self.add(Dispose::new(disposer));
    }

    /// New scope disposed together with (and before) this one.
    pub fn child(&self) -> Scope {
        let child = Scope::new();
        self.inner.children.borrow_mut().push(child.clone());
        child
    }

    /// Number of cleanups still pending in this scope (children excluded).
    pub fn pending(&self) -> usize {
        self.inner
            .disposers
            .borrow()
            .iter()
            .filter(|d| !d.is_spent())
            .count()
    }

    /// Handles held by this scope, spent ones included.
    pub(crate) fn held(&self) -> usize {
        self.inner.disposers.borrow().len()
    }

    pub fn dispose(self) {
        self.inner.run_all();
    }
}

impl ScopeInner {
    fn run_all(&self) {
        // Dispose children first
        let children = std::mem::take(&mut *self.children.borrow_mut());
        for child in children {
            child.inner.run_all();
        }

        let disposers = std::mem::take(&mut *self.disposers.borrow_mut());
        for disposer in disposers {
            disposer.run();
        }
    }
}

impl Clone for Scope {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl Drop for ScopeInner {
    fn drop(&mut self) {
        self.run_all();
    }
}
