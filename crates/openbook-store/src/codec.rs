//! The document codec: typed documents in, JSON text out, and back.
//!
//! [`load`] is deliberately infallible. The original contract treats a
//! missing or corrupt document as "use the default": first run has no
//! documents at all, and a hand-edited or truncated blob must not brick
//! the whole catalog. Corruption is logged as a warning, not an error.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{StoreError, StoreResult};
use crate::traits::KeyValueStore;

/// Load the document at `key`, or `fallback` if the key is absent, the
/// backend fails, or the stored text does not parse as `T`.
pub fn load<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str, fallback: T) -> T {
    let text = match store.get(key) {
        Ok(Some(text)) => text,
        Ok(None) => return fallback,
        Err(e) => {
            warn!(key, error = %e, "store read failed; using fallback");
            return fallback;
        }
    };
    match serde_json::from_str(&text) {
        Ok(value) => value,
        Err(e) => {
            warn!(key, error = %e, "corrupt document; using fallback");
            fallback
        }
    }
}

/// Serialize `value` as JSON text and write it at `key`, overwriting any
/// prior document. Backend failure is propagated; there is no retry.
pub fn save<T: Serialize>(store: &dyn KeyValueStore, key: &str, value: &T) -> StoreResult<()> {
    let text =
        serde_json::to_string(value).map_err(|e| StoreError::Serialization(e.to_string()))?;
    store.set(key, &text)?;
    debug!(key, "document saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys;
    use crate::memory::InMemoryKeyValueStore;

    #[test]
    fn load_missing_returns_fallback() {
        let store = InMemoryKeyValueStore::new();
        let value: Vec<String> = load(&store, keys::BOOKS, vec!["default".to_string()]);
        assert_eq!(value, vec!["default".to_string()]);
    }

    #[test]
    fn save_then_load_roundtrip() {
        let store = InMemoryKeyValueStore::new();
        let original = vec![1u32, 2, 3];
        save(&store, keys::CART, &original).unwrap();
        let back: Vec<u32> = load(&store, keys::CART, Vec::new());
        assert_eq!(back, original);
    }

    #[test]
    fn load_corrupt_returns_fallback() {
        let store = InMemoryKeyValueStore::new();
        store.set(keys::USERS, "{not json").unwrap();
        let value: Vec<u32> = load(&store, keys::USERS, vec![9]);
        assert_eq!(value, vec![9]);
    }

    #[test]
    fn load_wrong_shape_returns_fallback() {
        let store = InMemoryKeyValueStore::new();
        // Valid JSON, wrong schema for the requested type.
        store.set(keys::CART, r#"["a","b"]"#).unwrap();
        let value: u64 = load(&store, keys::CART, 7);
        assert_eq!(value, 7);
    }

    #[test]
    fn save_overwrites_prior_document() {
        let store = InMemoryKeyValueStore::new();
        save(&store, keys::CURRENT_USER, &Some("alice")).unwrap();
        save(&store, keys::CURRENT_USER, &None::<&str>).unwrap();
        assert_eq!(store.get(keys::CURRENT_USER).unwrap().as_deref(), Some("null"));
    }

    #[test]
    fn none_serializes_as_json_null() {
        let store = InMemoryKeyValueStore::new();
        save(&store, keys::CURRENT_USER, &None::<u32>).unwrap();
        let back: Option<u32> = load(&store, keys::CURRENT_USER, Some(1));
        assert_eq!(back, None);
    }
}
