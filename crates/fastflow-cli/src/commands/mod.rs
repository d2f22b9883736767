pub mod coach;
pub mod config;
pub mod fast;
pub mod journal;
pub mod onboard;
pub mod reset;
pub mod stats;

use fastflow_core::{SqliteBackend, Store};

/// Open the production store.
pub fn open_store() -> Result<Store<SqliteBackend>, Box<dyn std::error::Error>> {
    Ok(Store::new(SqliteBackend::open()?))
}

pub fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
