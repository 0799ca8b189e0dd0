//! Optional caller-supplied callbacks.
//!
//! An unset callback is a no-op: calling it does nothing and never panics.

use std::fmt;
use std::rc::Rc;

/// A shareable `Fn(&A)` that defaults to doing nothing.
pub struct Callback<A: ?Sized> {
    inner: Option<Rc<dyn Fn(&A)>>,
}

impl<A: ?Sized> Callback<A> {
    pub fn new(f: impl Fn(&A) + 'static) -> Self {
        Self {
            inner: Some(Rc::new(f)),
        }
    }

    /// The documented default: a callback that ignores its argument.
    pub fn noop() -> Self {
        Self { inner: None }
    }

    pub fn call(&self, arg: &A) {
        if let Some(f) = &self.inner {
            f(arg);
        }
    }

    pub fn is_set(&self) -> bool {
        self.inner.is_some()
    }
}

impl<A: ?Sized> Default for Callback<A> {
    fn default() -> Self {
        Self::noop()
    }
}

impl<A: ?Sized> Clone for Callback<A> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<A: ?Sized> fmt::Debug for Callback<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callback")
            .field("set", &self.is_set())
            .finish()
    }
}

impl<A: ?Sized, F: Fn(&A) + 'static> From<F> for Callback<A> {
    fn from(f: F) -> Self {
        Self::new(f)
    }
}
