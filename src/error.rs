//! Error types for the bytecache library.
//!
//! ## Key Components
//!
//! - [`ConfigError`]: Returned when construction parameters are invalid
//!   (a negative byte budget).
//! - [`InvariantError`]: Returned when internal accounting or structural
//!   invariants are violated (debug-only `check_invariants` method).
//!
//! ## Example Usage
//!
//! ```
//! use bytecache::error::ConfigError;
//! use bytecache::lru::ByteLruCache;
//!
//! // Fallible constructor for callers holding signed budgets.
//! let cache: Result<ByteLruCache<String>, ConfigError> = ByteLruCache::try_new(1024);
//! assert!(cache.is_ok());
//!
//! // A negative budget is caught without panicking.
//! let bad = ByteLruCache::<String>::try_new(-1);
//! assert!(bad.is_err());
//! ```

use std::fmt;

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Error returned when cache construction parameters are invalid.
///
/// Produced by [`ByteLruCache::try_new`](crate::lru::ByteLruCache::try_new)
/// when the requested byte budget is negative. Carries a human-readable
/// description of the rejected parameter.
///
/// # Example
///
/// ```
/// use bytecache::lru::ByteLruCache;
///
/// let err = ByteLruCache::<String>::try_new(-8).unwrap_err();
/// assert!(err.to_string().contains("max_bytes"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError(String);

impl ConfigError {
    /// Creates a new `ConfigError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Error returned when internal cache invariants are violated.
///
/// Produced by the debug-only
/// [`ByteLruCache::check_invariants`](crate::lru::ByteLruCache::check_invariants),
/// which revalidates the index/order correspondence and the byte
/// accounting from scratch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    /// Creates a new `InvariantError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InvariantError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
