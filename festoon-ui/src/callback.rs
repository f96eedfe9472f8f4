//! Identity-compared callback handles.
//!
//! Widget args structs hold handlers as [`Callback`] / [`CallbackWith`]
//! rather than bare boxed closures so that args stay `Clone + PartialEq`
//! without forcing deep closure comparisons: two handles compare equal when
//! they share the same underlying allocation.

use std::sync::Arc;

/// Stable, comparable slot for any shared callable trait object.
///
/// Compares by identity (`Arc::ptr_eq`).
pub struct Slot<F: ?Sized> {
    inner: Arc<F>,
}

impl<F: ?Sized> Slot<F> {
    /// Creates a slot from a shared callable trait object.
    pub fn from_shared(handler: Arc<F>) -> Self {
        Self { inner: handler }
    }

    /// Reads the current callable.
    pub fn shared(&self) -> Arc<F> {
        Arc::clone(&self.inner)
    }
}

impl<F: ?Sized> Clone for Slot<F> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<F: ?Sized> PartialEq for Slot<F> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<F: ?Sized> Eq for Slot<F> {}

impl<F: ?Sized> std::fmt::Debug for Slot<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Slot")
            .field("inner", &Arc::as_ptr(&self.inner))
            .finish()
    }
}

/// Stable, comparable callback handle for `Fn()`.
#[derive(Clone, Debug)]
pub struct Callback {
    slot: Slot<dyn Fn() + Send + Sync>,
}

impl Callback {
    /// Creates a callback handle from a closure.
    pub fn new<F>(handler: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        Self {
            slot: Slot::from_shared(Arc::new(handler)),
        }
    }

    /// Invokes the callback.
    pub fn call(&self) {
        let handler = self.slot.shared();
        handler();
    }
}

impl<F> From<F> for Callback
where
    F: Fn() + Send + Sync + 'static,
{
    fn from(handler: F) -> Self {
        Self::new(handler)
    }
}

impl Default for Callback {
    fn default() -> Self {
        Self::new(|| {})
    }
}

impl PartialEq for Callback {
    fn eq(&self, other: &Self) -> bool {
        self.slot == other.slot
    }
}

impl Eq for Callback {}

/// Stable, comparable callback handle for `Fn(T) -> R`.
///
/// Useful for value-change handlers and similar one-argument callbacks.
pub struct CallbackWith<T, R = ()> {
    slot: Slot<dyn Fn(T) -> R + Send + Sync>,
}

impl<T, R> CallbackWith<T, R> {
    /// Creates a callback handle from a closure.
    pub fn new<F>(handler: F) -> Self
    where
        F: Fn(T) -> R + Send + Sync + 'static,
    {
        Self {
            slot: Slot::from_shared(Arc::new(handler)),
        }
    }

    /// Invokes the callback with an argument.
    pub fn call(&self, value: T) -> R {
        let handler = self.slot.shared();
        handler(value)
    }
}

impl<T, R, F> From<F> for CallbackWith<T, R>
where
    F: Fn(T) -> R + Send + Sync + 'static,
{
    fn from(handler: F) -> Self {
        Self::new(handler)
    }
}

impl<T, R> Clone for CallbackWith<T, R> {
    fn clone(&self) -> Self {
        Self {
            slot: self.slot.clone(),
        }
    }
}

impl<T, R> PartialEq for CallbackWith<T, R> {
    fn eq(&self, other: &Self) -> bool {
        self.slot == other.slot
    }
}

impl<T, R> Eq for CallbackWith<T, R> {}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    #[test]
    fn test_callback_identity_equality() {
        let a = Callback::new(|| {});
        let b = a.clone();
        let c = Callback::new(|| {});

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_callback_with_invocation() {
        let hits = Arc::new(AtomicUsize::new(0));
        let hits_in = hits.clone();
        let cb: CallbackWith<usize> = CallbackWith::new(move |n| {
            hits_in.fetch_add(n, Ordering::SeqCst);
        });

        cb.call(3);
        cb.call(4);
        assert_eq!(hits.load(Ordering::SeqCst), 7);
    }
}
