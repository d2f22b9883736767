//! In-memory record storage for tests and ephemeral runs.

use std::collections::HashMap;
use std::sync::Mutex;

use super::StoreBackend;

/// HashMap-backed [`StoreBackend`]. Nothing survives the process.
#[derive(Default)]
pub struct MemoryBackend {
    records: Mutex<HashMap<String, String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StoreBackend for MemoryBackend {
    fn load_raw(&self, key: &str) -> Option<String> {
        self.records.lock().ok()?.get(key).cloned()
    }

    fn save_raw(&self, key: &str, json: &str) {
        if let Ok(mut records) = self.records.lock() {
            records.insert(key.to_string(), json.to_string());
        }
    }

    fn remove_raw(&self, key: &str) {
        if let Ok(mut records) = self.records.lock() {
            records.remove(key);
        }
    }
}
