//! Persistence gateway.
//!
//! Three named records back the whole application: the user profile, the
//! session list, and the journal. Each record is stored as one JSON document
//! under a fixed key. The gateway is an injected port: [`Store`] layers the
//! typed read-modify-write contract over any [`StoreBackend`], so the state
//! machine and the recorder can be tested against [`MemoryBackend`] without
//! touching disk.
//!
//! Failure policy is best-effort by design: a backend that cannot read or
//! write degrades to a silent no-op (reads become `None`, writes are
//! dropped). Malformed persisted data is indistinguishable from absent data.

mod config;
pub mod memory;
pub mod sqlite;

pub use config::{CoachConfig, Config, FastingConfig, JournalConfig};
pub use memory::MemoryBackend;
pub use sqlite::SqliteBackend;

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::PathBuf;
use tracing::warn;

/// Record key for the user profile.
pub const USER_KEY: &str = "fastflow_user";
/// Record key for the fasting session list.
pub const SESSIONS_KEY: &str = "fastflow_sessions";
/// Record key for the journal entry list.
pub const JOURNAL_KEY: &str = "fastflow_journal";

/// Returns `~/.config/fastflow[-dev]/` based on FASTFLOW_ENV.
///
/// Set FASTFLOW_ENV=dev to use the development data directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> Result<PathBuf, Box<dyn std::error::Error>> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("FASTFLOW_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("fastflow-dev")
    } else {
        base_dir.join("fastflow")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Raw key-value transport under the typed gateway.
///
/// Implementations must swallow their own I/O failures: `load_raw` answers
/// `None` and the write methods drop the operation when the underlying store
/// is unavailable.
pub trait StoreBackend {
    fn load_raw(&self, key: &str) -> Option<String>;
    fn save_raw(&self, key: &str, json: &str);
    fn remove_raw(&self, key: &str);
}

/// Typed persistence gateway over a [`StoreBackend`].
///
/// Every write serializes the full record. Single-writer model: callers run
/// on one thread of control, so read-modify-write sequences need no locking.
pub struct Store<B: StoreBackend> {
    backend: B,
}

impl<B: StoreBackend> Store<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Read a record. Absent and malformed are treated identically.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.backend.load_raw(key)?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(key, error = %e, "malformed record treated as absent");
                None
            }
        }
    }

    /// Write a record, replacing any previous value.
    pub fn set<T: Serialize>(&self, key: &str, value: &T) {
        match serde_json::to_string(value) {
            Ok(json) => self.backend.save_raw(key, &json),
            Err(e) => warn!(key, error = %e, "dropping unserializable record"),
        }
    }

    /// Append an item to a collection record, preserving insertion order.
    pub fn append_to<T: Serialize + DeserializeOwned>(&self, key: &str, item: T) {
        let mut items: Vec<T> = self.get(key).unwrap_or_default();
        items.push(item);
        self.set(key, &items);
    }

    /// Edit the first element of a collection record matching `matches`.
    ///
    /// The element is updated in place; order and other elements are
    /// untouched. No-op when nothing matches.
    pub fn update_in<T, M, F>(&self, key: &str, matches: M, apply: F)
    where
        T: Serialize + DeserializeOwned,
        M: Fn(&T) -> bool,
        F: FnOnce(&mut T),
    {
        let mut items: Vec<T> = self.get(key).unwrap_or_default();
        if let Some(item) = items.iter_mut().find(|item| matches(item)) {
            apply(item);
            self.set(key, &items);
        }
    }

    /// Remove all three records. Idempotent; each key is cleared
    /// independently.
    pub fn clear_all(&self) {
        self.backend.remove_raw(USER_KEY);
        self.backend.remove_raw(SESSIONS_KEY);
        self.backend.remove_raw(JOURNAL_KEY);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Item {
        id: String,
        count: u32,
    }

    fn store() -> Store<MemoryBackend> {
        Store::new(MemoryBackend::new())
    }

    #[test]
    fn get_absent_key_is_none() {
        let s = store();
        assert!(s.get::<Item>(USER_KEY).is_none());
    }

    #[test]
    fn set_then_get_roundtrips() {
        let s = store();
        let item = Item { id: "a".into(), count: 3 };
        s.set(USER_KEY, &item);
        assert_eq!(s.get::<Item>(USER_KEY), Some(item));
    }

    #[test]
    fn malformed_record_reads_as_absent() {
        let s = store();
        s.backend.save_raw(USER_KEY, "{not json");
        assert!(s.get::<Item>(USER_KEY).is_none());
    }

    #[test]
    fn append_preserves_insertion_order() {
        let s = store();
        for i in 0..5 {
            s.append_to(JOURNAL_KEY, Item { id: format!("i{i}"), count: i });
        }
        let items: Vec<Item> = s.get(JOURNAL_KEY).unwrap();
        assert_eq!(items.len(), 5);
        for (i, item) in items.iter().enumerate() {
            assert_eq!(item.id, format!("i{i}"));
        }
    }

    #[test]
    fn update_in_edits_first_match_only() {
        let s = store();
        s.append_to(SESSIONS_KEY, Item { id: "a".into(), count: 0 });
        s.append_to(SESSIONS_KEY, Item { id: "b".into(), count: 0 });
        s.append_to(SESSIONS_KEY, Item { id: "b".into(), count: 0 });

        s.update_in::<Item, _, _>(SESSIONS_KEY, |i| i.id == "b", |i| i.count = 9);

        let items: Vec<Item> = s.get(SESSIONS_KEY).unwrap();
        assert_eq!(items[0].count, 0);
        assert_eq!(items[1].count, 9);
        assert_eq!(items[2].count, 0);
    }

    #[test]
    fn update_in_without_match_is_noop() {
        let s = store();
        s.append_to(SESSIONS_KEY, Item { id: "a".into(), count: 1 });
        s.update_in::<Item, _, _>(SESSIONS_KEY, |i| i.id == "zzz", |i| i.count = 9);
        let items: Vec<Item> = s.get(SESSIONS_KEY).unwrap();
        assert_eq!(items, vec![Item { id: "a".into(), count: 1 }]);
    }

    #[test]
    fn clear_all_is_idempotent() {
        let s = store();
        s.set(USER_KEY, &Item { id: "u".into(), count: 1 });
        s.append_to(SESSIONS_KEY, Item { id: "s".into(), count: 1 });
        s.append_to(JOURNAL_KEY, Item { id: "j".into(), count: 1 });

        s.clear_all();
        s.clear_all();

        assert!(s.get::<Item>(USER_KEY).is_none());
        assert!(s.get::<Vec<Item>>(SESSIONS_KEY).is_none());
        assert!(s.get::<Vec<Item>>(JOURNAL_KEY).is_none());
    }
}
