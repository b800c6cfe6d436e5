use crate::error::StoreResult;

/// Durable string key → string value mapping.
///
/// All implementations must satisfy these invariants:
/// - `set` overwrites any prior value at the key.
/// - `get` after `set` returns the exact value written, across process
///   restarts for durable backends.
/// - The store never interprets values — it is a pure key-value mapping.
/// - Backend failures are propagated, never silently swallowed.
pub trait KeyValueStore: Send + Sync {
    /// Read the value at `key`. Returns `Ok(None)` if the key is absent.
    fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Write `value` at `key`, overwriting prior content.
    fn set(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Delete the value at `key`. Returns `true` if a value was present.
    fn remove(&self, key: &str) -> StoreResult<bool>;

    /// Check whether `key` holds a value.
    ///
    /// Default implementation reads the value. Backends may override to
    /// avoid copying it.
    fn contains(&self, key: &str) -> StoreResult<bool> {
        Ok(self.get(key)?.is_some())
    }
}
