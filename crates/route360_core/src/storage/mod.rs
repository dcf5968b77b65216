//! Local key-value storage, the desktop stand-in for browser local storage.
//!
//! # Responsibility
//! - Define the `KeyValueStore` contract (`get`/`set`/`remove` on raw strings).
//! - Provide SQLite-backed and in-memory implementations.
//! - Own JSON list encoding plus the "malformed means empty" read policy,
//!   applied per element so one bad element never hides its neighbours.
//!
//! # Invariants
//! - Values are opaque strings; only the helpers in this module parse them.
//! - Every read-modify-write is last-writer-wins. There is no locking and no
//!   compare-and-swap, so two sessions for the same user can clobber each
//!   other's writes.

mod memory_store;
mod scope;
mod sqlite_store;

pub use memory_store::MemoryKeyValueStore;
pub use scope::{StorageScope, CURRENT_USER_KEY, USERS_KEY};
pub use sqlite_store::SqliteKeyValueStore;

use crate::db::DbError;
use log::warn;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Storage transport or encoding failure.
#[derive(Debug)]
pub enum StoreError {
    Db(DbError),
    Encode(serde_json::Error),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Encode(err) => write!(f, "failed to encode stored value: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Encode(err) => Some(err),
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Raw string key-value store.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> StoreResult<()>;
    fn remove(&self, key: &str) -> StoreResult<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        (**self).remove(key)
    }
}

/// Elements of a stored JSON array: the ones that decoded, and the raw ones
/// that did not.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredList<T> {
    pub items: Vec<T>,
    /// Written back after `items` by `write_stored_list`.
    pub unreadable: Vec<Value>,
}

impl<T> Default for StoredList<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            unreadable: Vec::new(),
        }
    }
}

/// Reads a JSON array stored under `key`, decoding each element on its own.
///
/// A missing key, unparsable JSON, `null`, or any non-array value all yield an
/// empty list. Elements that do not decode as `T` are set aside in
/// `unreadable` instead of failing the read. Only transport failures are
/// returned as errors.
pub fn load_json_list<T, S>(store: &S, key: &str) -> StoreResult<StoredList<T>>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    let Some(raw) = store.get(key)? else {
        return Ok(StoredList::default());
    };

    let elements = match serde_json::from_str::<Value>(&raw) {
        Ok(Value::Array(elements)) => elements,
        Ok(Value::Null) => return Ok(StoredList::default()),
        Ok(_) => {
            warn!("event=store_read module=storage status=degraded key={key} reason=not_an_array");
            return Ok(StoredList::default());
        }
        Err(err) => {
            warn!(
                "event=store_read module=storage status=degraded key={key} reason=malformed_json error={err}"
            );
            return Ok(StoredList::default());
        }
    };

    let mut list = StoredList::default();
    for (index, element) in elements.into_iter().enumerate() {
        match T::deserialize(&element) {
            Ok(item) => list.items.push(item),
            Err(err) => {
                warn!(
                    "event=store_read module=storage status=degraded key={key} reason=bad_element index={index} error={err}"
                );
                list.unreadable.push(element);
            }
        }
    }
    Ok(list)
}

/// Reads the decodable elements of the JSON array under `key`.
pub fn read_json_list<T, S>(store: &S, key: &str) -> StoreResult<Vec<T>>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    Ok(load_json_list(store, key)?.items)
}

/// Serializes `items` as a JSON array and writes it under `key`.
pub fn write_json_list<T, S>(store: &S, key: &str, items: &[T]) -> StoreResult<()>
where
    T: Serialize,
    S: KeyValueStore + ?Sized,
{
    let raw = serde_json::to_string(items).map_err(StoreError::Encode)?;
    store.set(key, &raw)
}

/// Writes `list.items` followed by the untouched `list.unreadable` elements.
pub fn write_stored_list<T, S>(store: &S, key: &str, list: &StoredList<T>) -> StoreResult<()>
where
    T: Serialize,
    S: KeyValueStore + ?Sized,
{
    let mut elements = list
        .items
        .iter()
        .map(serde_json::to_value)
        .collect::<Result<Vec<_>, _>>()
        .map_err(StoreError::Encode)?;
    elements.extend(list.unreadable.iter().cloned());
    let raw = serde_json::to_string(&elements).map_err(StoreError::Encode)?;
    store.set(key, &raw)
}

#[cfg(test)]
mod tests {
    use super::{
        load_json_list, read_json_list, write_json_list, write_stored_list, KeyValueStore,
        MemoryKeyValueStore,
    };

    #[test]
    fn missing_key_reads_as_empty_list() {
        let store = MemoryKeyValueStore::new();
        let items: Vec<String> = read_json_list(&store, "absent").unwrap();
        assert!(items.is_empty());
        assert!(store.is_empty());
    }

    #[test]
    fn malformed_or_non_array_values_read_as_empty_list() {
        let store = MemoryKeyValueStore::new();
        for raw in ["{not json", "null", "{\"a\":1}", "42", "\"text\""] {
            store.set("k", raw).unwrap();
            let items: Vec<String> = read_json_list(&store, "k").unwrap();
            assert!(items.is_empty(), "raw value `{raw}` should read as empty");
        }
    }

    #[test]
    fn written_list_reads_back() {
        let store = MemoryKeyValueStore::new();
        write_json_list(&store, "k", &["a".to_string(), "b".to_string()]).unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("[\"a\",\"b\"]"));
        let items: Vec<String> = read_json_list(&store, "k").unwrap();
        assert_eq!(items, vec!["a", "b"]);

        store.remove("k").unwrap();
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn bad_elements_are_set_aside_and_written_back() {
        let store = MemoryKeyValueStore::new();
        store.set("k", r#"["a", null, 7, "b"]"#).unwrap();

        let mut list = load_json_list::<String, _>(&store, "k").unwrap();
        assert_eq!(list.items, vec!["a", "b"]);
        assert_eq!(list.unreadable.len(), 2);

        list.items.insert(0, "c".to_string());
        write_stored_list(&store, "k", &list).unwrap();
        assert_eq!(
            store.get("k").unwrap().as_deref(),
            Some(r#"["c","a","b",null,7]"#)
        );
    }
}
