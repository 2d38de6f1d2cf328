//! # Byte-Budgeted LRU Cache
//!
//! Exact least-recently-used cache bounded by cumulative entry size rather
//! than entry count. Every stored entry is charged `key.len() +
//! value.byte_len()` bytes against a configured ceiling; once the total
//! exceeds the ceiling, entries are evicted from the cold end of the
//! recency order until the cache fits again.
//!
//! ## Architecture
//!
//! ```text
//!   ┌─────────────────────────────────────────────────────────────────┐
//!   │                       ByteLruCache<V>                           │
//!   │                                                                 │
//!   │   ┌───────────────────────────────────────────────────────────┐ │
//!   │   │  FxHashMap<String, SlotId> (index into the recency list)  │ │
//!   │   │                                                           │ │
//!   │   │  ┌─────────┬───────────────────────────────────────┐      │ │
//!   │   │  │   Key   │  SlotId                               │      │ │
//!   │   │  ├─────────┼───────────────────────────────────────┤      │ │
//!   │   │  │  "a"    │  ─────────────────────────────────┐   │      │ │
//!   │   │  │  "b"    │  ───────────────────────────┐     │   │      │ │
//!   │   │  └─────────┴─────────────────────────────┼─────┼───┘      │ │
//!   │   └──────────────────────────────────────────┼─────┼──────────┘ │
//!   │                                              │     │            │
//!   │   ┌──────────────────────────────────────────┼─────┼──────────┐ │
//!   │   │  RecencyList<Entry<V>>                   ▼     ▼          │ │
//!   │   │                                                           │ │
//!   │   │  head ──► ┌───────┐ ◄──────► ┌───────┐ ◄── tail           │ │
//!   │   │   (MRU)   │ "b"   │          │ "a"   │    (LRU)           │ │
//!   │   │           │ value │          │ value │                    │ │
//!   │   │           └───────┘          └───────┘                    │ │
//!   │   └───────────────────────────────────────────────────────────┘ │
//!   │                                                                 │
//!   │   used_bytes = Σ (key.len() + value.byte_len())                 │
//!   │   max_bytes  = ceiling (0 = unbounded)                          │
//!   └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Operations
//!
//! | Method            | Complexity | Recency effect | Description            |
//! |-------------------|------------|----------------|------------------------|
//! | `get(&k)`         | O(1)       | moves to MRU   | Mutating read          |
//! | `add(k, v)`       | O(1)*      | moves to MRU   | Insert or update,      |
//! |                   |            |                | may evict from tail    |
//! | `remove_oldest()` | O(1)       | removes tail   | Fires eviction hook    |
//! | `peek(&k)`        | O(1)       | none           | Read without touching  |
//! | `peek_oldest()`   | O(1)       | none           | Inspect next victim    |
//! | `touch(&k)`       | O(1)       | moves to MRU   | Refresh without read   |
//! | `remove(&k)`      | O(1)       | removes entry  | No eviction hook       |
//! | `len()`           | O(1)       | none           | Entry count            |
//!
//! \* amortized; one `add` may evict several tail entries when a large
//! value displaces many small ones.
//!
//! ## Eviction semantics
//!
//! ```text
//!   add("d", v)  with  max_bytes = 20, used_bytes = 18, charge("d") = 6
//!   ═══════════════════════════════════════════════════════════════════
//!
//!   1. "d" is inserted at the head unconditionally: used_bytes = 24
//!   2. 24 > 20 ⇒ evict tail "a" (charge 6):         used_bytes = 18
//!   3. 18 ≤ 20 ⇒ stop; eviction hook fired once with ("a", value)
//! ```
//!
//! The budget check re-runs after every single eviction; one eviction may
//! not be enough when a large entry lands in a tight budget. An entry
//! whose own charge exceeds the entire budget is still stored: eviction
//! only ever removes *other* entries, so the oversized entry remains
//! resident (alone, with `used_bytes > max_bytes`) until a later `add`
//! pushes it out from the tail. A `max_bytes` of 0 disables automatic
//! eviction entirely.
//!
//! Overwriting a key via `add` discards the previous value without firing
//! the eviction hook; only removals through `remove_oldest` (explicit or
//! budget-driven) notify.
//!
//! ## Thread Safety
//!
//! `ByteLruCache` is single-threaded: every mutating operation takes
//! `&mut self`, so concurrent use requires external synchronization that
//! covers the whole call, eviction hook included. The hook runs on the
//! caller's thread inside the triggering operation and must not re-enter
//! the cache.

use std::fmt;
use std::mem;

use rustc_hash::FxHashMap;

use crate::ds::{RecencyList, SlotId};
use crate::error::ConfigError;
#[cfg(any(test, debug_assertions))]
use crate::error::InvariantError;
#[cfg(feature = "metrics")]
use crate::metrics::{CacheMetrics, CacheMetricsSnapshot};
use crate::traits::ByteSized;

/// Hook invoked with the key and value of every entry removed through
/// [`ByteLruCache::remove_oldest`], budget-driven evictions included.
pub type EvictionHook<V> = Box<dyn FnMut(&str, &V)>;

/// One stored key/value pair. List position is implicit via the node
/// linkage in the recency list.
struct Entry<V> {
    key: String,
    value: V,
}

impl<V: ByteSized> Entry<V> {
    /// Bytes this entry counts against the budget.
    #[inline]
    fn charge(&self) -> u64 {
        (self.key.len() + self.value.byte_len()) as u64
    }
}

/// Byte-budgeted LRU cache over payloads exposing a [`ByteSized`] size.
///
/// See the module docs for the architecture and eviction semantics.
pub struct ByteLruCache<V> {
    index: FxHashMap<String, SlotId>,
    order: RecencyList<Entry<V>>,
    max_bytes: u64,
    used_bytes: u64,
    on_evicted: Option<EvictionHook<V>>,
    #[cfg(feature = "metrics")]
    metrics: CacheMetrics,
}

impl<V: ByteSized> ByteLruCache<V> {
    /// Creates a cache with the given byte budget and no eviction hook.
    ///
    /// A `max_bytes` of 0 creates an unbounded cache: nothing is ever
    /// evicted automatically.
    ///
    /// # Example
    /// ```
    /// use bytecache::lru::ByteLruCache;
    ///
    /// let mut cache: ByteLruCache<String> = ByteLruCache::new(1024);
    /// cache.add("greeting", String::from("hello"));
    /// assert_eq!(cache.used_bytes(), 8 + 5);
    /// ```
    #[inline]
    pub fn new(max_bytes: u64) -> Self {
        Self::with_hook(max_bytes, None)
    }

    /// Fallible constructor for callers holding signed budgets (config
    /// files, foreign interfaces). Rejects negative budgets at
    /// construction time instead of misbehaving later.
    ///
    /// # Example
    /// ```
    /// use bytecache::lru::ByteLruCache;
    ///
    /// assert!(ByteLruCache::<String>::try_new(4096).is_ok());
    /// assert!(ByteLruCache::<String>::try_new(-1).is_err());
    /// ```
    pub fn try_new(max_bytes: i64) -> Result<Self, ConfigError> {
        if max_bytes < 0 {
            return Err(ConfigError::new(format!(
                "max_bytes must be non-negative, got {max_bytes}"
            )));
        }
        Ok(Self::new(max_bytes as u64))
    }

    pub(crate) fn with_hook(max_bytes: u64, on_evicted: Option<EvictionHook<V>>) -> Self {
        Self {
            index: FxHashMap::default(),
            order: RecencyList::new(),
            max_bytes,
            used_bytes: 0,
            on_evicted,
            #[cfg(feature = "metrics")]
            metrics: CacheMetrics::default(),
        }
    }

    /// Looks up a key, marking the entry most recently used on a hit.
    ///
    /// This is a mutating read: recency state changes even though data
    /// does not. A miss has no side effects. Use [`peek`](Self::peek) to
    /// read without touching the recency order.
    ///
    /// # Example
    /// ```
    /// use bytecache::lru::ByteLruCache;
    ///
    /// let mut cache = ByteLruCache::new(0);
    /// cache.add("k", String::from("v"));
    /// assert_eq!(cache.get("k").map(String::as_str), Some("v"));
    /// assert!(cache.get("missing").is_none());
    /// ```
    pub fn get(&mut self, key: &str) -> Option<&V> {
        let id = match self.index.get(key) {
            Some(&id) => id,
            None => {
                #[cfg(feature = "metrics")]
                self.metrics.record_get_miss();
                return None;
            }
        };

        #[cfg(feature = "metrics")]
        self.metrics.record_get_hit();

        self.order.move_to_front(id);
        self.order.get(id).map(|entry| &entry.value)
    }

    /// Inserts a value, or updates it in place if the key is present.
    ///
    /// Either way the entry becomes most recently used and the byte
    /// accounting is adjusted (full charge for a new key, size delta for
    /// an update; the key length is charged once). Returns the previous
    /// value on update; replaced values are handed back rather than
    /// reported through the eviction hook, since an overwrite is not an
    /// eviction.
    ///
    /// If the budget is exceeded afterwards, tail entries are evicted one
    /// at a time until the cache fits or only the most recent entry
    /// remains. All inputs are accepted; an oversized value is stored
    /// regardless (see the module docs).
    pub fn add(&mut self, key: impl Into<String>, value: V) -> Option<V> {
        let key = key.into();

        if let Some(id) = self.index.get(&key).copied() {
            if let Some(entry) = self.order.get_mut(id) {
                #[cfg(feature = "metrics")]
                self.metrics.record_add_update();

                let old_size = entry.value.byte_len() as u64;
                let new_size = value.byte_len() as u64;
                let previous = mem::replace(&mut entry.value, value);
                self.used_bytes = self.used_bytes - old_size + new_size;
                self.order.move_to_front(id);
                self.evict_over_budget();
                return Some(previous);
            }
        }

        #[cfg(feature = "metrics")]
        self.metrics.record_add_new();

        self.used_bytes += (key.len() + value.byte_len()) as u64;
        let id = self.order.push_front(Entry {
            key: key.clone(),
            value,
        });
        self.index.insert(key, id);
        self.evict_over_budget();
        None
    }

    /// Removes the least-recently-used entry and returns it.
    ///
    /// No-op on an empty cache. The eviction hook, if configured, runs
    /// synchronously with the evicted key and value before ownership is
    /// returned to the caller. The hook must not call back into this
    /// cache.
    pub fn remove_oldest(&mut self) -> Option<(String, V)> {
        #[cfg(feature = "metrics")]
        self.metrics.record_remove_oldest_call();

        let entry = self.order.pop_back()?;
        self.index.remove(&entry.key);
        self.used_bytes -= entry.charge();

        #[cfg(feature = "metrics")]
        {
            self.metrics.record_remove_oldest_found();
            self.metrics.record_evicted_entry(entry.charge());
        }

        if let Some(hook) = self.on_evicted.as_mut() {
            hook(&entry.key, &entry.value);
        }

        Some((entry.key, entry.value))
    }

    /// Returns the current entry count.
    #[inline]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns `true` if the cache holds no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Bytes currently charged against the budget.
    #[inline]
    pub fn used_bytes(&self) -> u64 {
        self.used_bytes
    }

    /// The configured ceiling; 0 means unbounded.
    #[inline]
    pub fn max_bytes(&self) -> u64 {
        self.max_bytes
    }

    /// Looks up a key without changing the recency order.
    pub fn peek(&self, key: &str) -> Option<&V> {
        #[cfg(feature = "metrics")]
        self.metrics.peek_calls.incr();

        let id = self.index.get(key)?;
        let entry = self.order.get(*id)?;

        #[cfg(feature = "metrics")]
        self.metrics.peek_found.incr();

        Some(&entry.value)
    }

    /// Returns the least-recently-used entry without removing it, i.e.
    /// the next eviction victim.
    pub fn peek_oldest(&self) -> Option<(&str, &V)> {
        #[cfg(feature = "metrics")]
        self.metrics.peek_oldest_calls.incr();

        let entry = self.order.back()?;

        #[cfg(feature = "metrics")]
        self.metrics.peek_oldest_found.incr();

        Some((entry.key.as_str(), &entry.value))
    }

    /// Marks an entry most recently used without retrieving the value.
    ///
    /// Returns `true` if the key was found.
    pub fn touch(&mut self, key: &str) -> bool {
        let found = match self.index.get(key) {
            Some(&id) => self.order.move_to_front(id),
            None => false,
        };

        #[cfg(feature = "metrics")]
        self.metrics.record_touch(found);

        found
    }

    /// Returns `true` if the key is present. Does not affect recency.
    #[inline]
    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Removes a specific key and returns its value.
    ///
    /// Explicit removal is not an eviction: the eviction hook is not
    /// invoked. The byte accounting is adjusted.
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let id = self.index.remove(key)?;
        let entry = self.order.remove(id)?;
        self.used_bytes -= entry.charge();
        Some(entry.value)
    }

    /// Drops every entry and resets the accounting. No hooks fire.
    pub fn clear(&mut self) {
        self.order.clear();
        self.index.clear();
        self.used_bytes = 0;
    }

    /// Evicts tail entries until the cache fits its budget again.
    ///
    /// Re-checks the bound after every single eviction. Never evicts the
    /// last remaining entry: an entry larger than the whole budget stays
    /// resident alone rather than being refused or dropped.
    fn evict_over_budget(&mut self) {
        if self.max_bytes == 0 || self.used_bytes <= self.max_bytes {
            return;
        }

        #[cfg(feature = "metrics")]
        self.metrics.record_evict_call();

        while self.used_bytes > self.max_bytes && self.order.len() > 1 {
            self.remove_oldest();
        }
    }

    /// Revalidates the structural and accounting invariants from scratch.
    ///
    /// Walks the recency list, checks the 1:1 correspondence with the
    /// index, and recomputes the byte total. Debug/test builds only.
    #[cfg(any(test, debug_assertions))]
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.index.len() != self.order.len() {
            return Err(InvariantError::new(format!(
                "index holds {} keys but the recency list holds {} nodes",
                self.index.len(),
                self.order.len()
            )));
        }

        let mut total = 0u64;
        for (id, entry) in self.order.iter_entries() {
            match self.index.get(&entry.key) {
                Some(&mapped) if mapped == id => {}
                Some(_) => {
                    return Err(InvariantError::new(format!(
                        "key {:?} maps to a different slot than its list node",
                        entry.key
                    )));
                }
                None => {
                    return Err(InvariantError::new(format!(
                        "key {:?} is in the recency list but not the index",
                        entry.key
                    )));
                }
            }
            total += entry.charge();
        }

        if total != self.used_bytes {
            return Err(InvariantError::new(format!(
                "used_bytes is {} but entries sum to {}",
                self.used_bytes, total
            )));
        }

        Ok(())
    }
}

#[cfg(feature = "metrics")]
impl<V: ByteSized> ByteLruCache<V> {
    pub fn metrics_snapshot(&self) -> CacheMetricsSnapshot {
        CacheMetricsSnapshot {
            get_calls: self.metrics.get_calls,
            get_hits: self.metrics.get_hits,
            get_misses: self.metrics.get_misses,
            add_calls: self.metrics.add_calls,
            add_updates: self.metrics.add_updates,
            add_new: self.metrics.add_new,
            evict_calls: self.metrics.evict_calls,
            evicted_entries: self.metrics.evicted_entries,
            evicted_bytes: self.metrics.evicted_bytes,
            remove_oldest_calls: self.metrics.remove_oldest_calls,
            remove_oldest_found: self.metrics.remove_oldest_found,
            peek_calls: self.metrics.peek_calls.get(),
            peek_found: self.metrics.peek_found.get(),
            peek_oldest_calls: self.metrics.peek_oldest_calls.get(),
            peek_oldest_found: self.metrics.peek_oldest_found.get(),
            touch_calls: self.metrics.touch_calls,
            touch_found: self.metrics.touch_found,
            cache_len: self.order.len(),
            used_bytes: self.used_bytes,
            max_bytes: self.max_bytes,
        }
    }
}

impl<V> fmt::Debug for ByteLruCache<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ByteLruCache")
            .field("len", &self.order.len())
            .field("used_bytes", &self.used_bytes)
            .field("max_bytes", &self.max_bytes)
            .finish_non_exhaustive()
    }
}

impl<V: ByteSized> Default for ByteLruCache<V> {
    /// Creates an unbounded cache (budget 0, no automatic eviction).
    fn default() -> Self {
        Self::new(0)
    }
}

impl<V: ByteSized> Extend<(String, V)> for ByteLruCache<V> {
    fn extend<T: IntoIterator<Item = (String, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.add(key, value);
        }
    }
}
