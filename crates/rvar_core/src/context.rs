//! Typed heterogeneous side-channel threaded alongside the generator state.
//!
//! Callers mint a [`ContextKey<T>`] once and use it to read and write a value
//! of type `T` from inside a random variable. Keys carry a process-unique
//! identity that is never reused, so two independently created keys never
//! alias even when they share a value type.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_KEY_ID: AtomicU64 = AtomicU64::new(0);

/// Typed identity token for an entry of an [`ExtensibleContext`].
///
/// # Examples
///
/// ```rust
/// use rvar_core::context::{ContextKey, ExtensibleContext};
///
/// let depth: ContextKey<u32> = ContextKey::new();
/// let mut ctx = ExtensibleContext::new();
///
/// assert_eq!(ctx.get(&depth), None);
/// ctx.set(&depth, 3);
/// assert_eq!(ctx.get(&depth), Some(3));
/// ```
pub struct ContextKey<T> {
    id: u64,
    _value: PhantomData<fn() -> T>,
}

impl<T> ContextKey<T> {
    /// Mints a fresh key with a never-reused identity.
    pub fn new() -> Self {
        Self {
            id: NEXT_KEY_ID.fetch_add(1, Ordering::Relaxed),
            _value: PhantomData,
        }
    }

    /// Returns the key's identity.
    #[inline]
    pub fn id(&self) -> u64 {
        self.id
    }
}

impl<T> Default for ContextKey<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for ContextKey<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ContextKey<T> {}

impl<T> PartialEq for ContextKey<T> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<T> Eq for ContextKey<T> {}

impl<T> fmt::Debug for ContextKey<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContextKey")
            .field("id", &self.id)
            .field("type", &std::any::type_name::<T>())
            .finish()
    }
}

/// Type-tagged store of auxiliary values, keyed by [`ContextKey`].
///
/// A fresh, empty context is created for every `simulate` call and dropped
/// with the final generator state, so nothing leaks between runs.
#[derive(Default)]
pub struct ExtensibleContext {
    entries: HashMap<u64, Box<dyn Any>>,
}

impl ExtensibleContext {
    /// Creates an empty context.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads the value stored under `key`.
    ///
    /// Returns `None` when the key is absent or the stored value fails the
    /// type-tag check.
    pub fn get<T: Clone + 'static>(&self, key: &ContextKey<T>) -> Option<T> {
        self.entries
            .get(&key.id)
            .and_then(|value| value.downcast_ref::<T>())
            .cloned()
    }

    /// Stores `value` under `key`, returning the previous value if any.
    pub fn set<T: 'static>(&mut self, key: &ContextKey<T>, value: T) -> Option<T> {
        self.entries
            .insert(key.id, Box::new(value))
            .and_then(|previous| previous.downcast::<T>().ok())
            .map(|previous| *previous)
    }

    /// Removes the value stored under `key`.
    pub fn remove<T: 'static>(&mut self, key: &ContextKey<T>) -> Option<T> {
        self.entries
            .remove(&key.id)
            .and_then(|previous| previous.downcast::<T>().ok())
            .map(|previous| *previous)
    }

    /// Returns `true` when a value is stored under `key`.
    #[inline]
    pub fn contains<T>(&self, key: &ContextKey<T>) -> bool {
        self.entries.contains_key(&key.id)
    }

    /// Number of stored entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when nothing is stored.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for ExtensibleContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut ids: Vec<_> = self.entries.keys().collect();
        ids.sort_unstable();
        f.debug_struct("ExtensibleContext")
            .field("keys", &ids)
            .finish()
    }
}
