//! The three domain stores. Each one is a thin CRUD wrapper over the shared
//! key/value adapter: read the whole collection, mutate in memory, write the
//! whole collection back. After every successful mutation a store publishes
//! its latest snapshot on a watch channel so observers (the SSE feed, tests)
//! see the change.

pub mod directory;
pub mod requests;
pub mod session;

pub use directory::DirectoryStore;
pub use requests::RequestStore;
pub use session::SessionStore;

/// Persisted key holding the JSON array of all profiles.
pub const USERS_KEY: &str = "users";
/// Persisted key holding the session identity, absent when logged out.
pub const CURRENT_USER_KEY: &str = "currentUser";
/// Persisted key holding the JSON array of swap requests.
pub const SWAP_REQUESTS_KEY: &str = "swapRequests";

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::AppResult;
use crate::kv::SharedKv;

/// Read a JSON array collection; a never-written key is an empty collection.
pub(crate) fn read_collection<T: DeserializeOwned>(kv: &SharedKv, key: &str) -> AppResult<Vec<T>> {
    match kv.get(key)? {
        Some(value) => Ok(serde_json::from_value(value)?),
        None => Ok(Vec::new()),
    }
}

/// Overwrite a JSON array collection in full.
pub(crate) fn write_collection<T: Serialize>(kv: &SharedKv, key: &str, items: &[T]) -> AppResult<()> {
    kv.set(key, &serde_json::to_value(items)?)?;
    Ok(())
}
