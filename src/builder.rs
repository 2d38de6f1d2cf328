//! Builder for configuring a cache before construction.
//!
//! The builder is the only way to attach an eviction hook; the plain
//! constructors cover the common no-hook case.
//!
//! ## Example
//!
//! ```
//! use bytecache::builder::CacheBuilder;
//!
//! let mut cache = CacheBuilder::new(64)
//!     .on_evicted(|key: &str, _value: &String| println!("evicted {key}"))
//!     .build();
//! cache.add("k", String::from("hello"));
//! assert_eq!(cache.len(), 1);
//! ```

use std::fmt;

use crate::lru::{ByteLruCache, EvictionHook};
use crate::traits::ByteSized;

/// Builder for [`ByteLruCache`].
pub struct CacheBuilder<V> {
    max_bytes: u64,
    on_evicted: Option<EvictionHook<V>>,
}

impl<V: ByteSized> CacheBuilder<V> {
    /// Starts a builder with the given byte budget (0 = unbounded).
    pub fn new(max_bytes: u64) -> Self {
        Self {
            max_bytes,
            on_evicted: None,
        }
    }

    /// Starts a builder for an unbounded cache.
    pub fn unbounded() -> Self {
        Self::new(0)
    }

    /// Registers a hook invoked with the key and value of every entry
    /// removed through `remove_oldest`, budget-driven evictions included.
    /// Overwrites and keyed removals do not notify.
    ///
    /// The hook runs synchronously on the caller's thread and must not
    /// call back into the cache.
    pub fn on_evicted<F>(mut self, hook: F) -> Self
    where
        F: FnMut(&str, &V) + 'static,
    {
        self.on_evicted = Some(Box::new(hook));
        self
    }

    /// Builds the cache.
    pub fn build(self) -> ByteLruCache<V> {
        ByteLruCache::with_hook(self.max_bytes, self.on_evicted)
    }
}

impl<V> fmt::Debug for CacheBuilder<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheBuilder")
            .field("max_bytes", &self.max_bytes)
            .field("on_evicted", &self.on_evicted.is_some())
            .finish()
    }
}
