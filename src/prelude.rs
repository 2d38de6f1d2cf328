pub use crate::builder::CacheBuilder;
pub use crate::ds::{RecencyList, SlotArena, SlotId};
pub use crate::error::{ConfigError, InvariantError};
pub use crate::lru::{ByteLruCache, EvictionHook};
#[cfg(feature = "metrics")]
pub use crate::metrics::snapshot::CacheMetricsSnapshot;
pub use crate::traits::ByteSized;
