use crate::config::Config;
use crate::kv::SharedKv;
use crate::store::{DirectoryStore, RequestStore, SessionStore};

/// Application state handed to every route. The stores are explicit objects
/// built once at startup and injected here, never ambient singletons.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub kv: SharedKv,
    pub session: SessionStore,
    pub directory: DirectoryStore,
    pub requests: RequestStore,
}

impl AppState {
    /// Wire the stores over a shared adapter and run first-run
    /// initialization (directory seeding).
    pub fn init(config: Config, kv: SharedKv) -> crate::error::AppResult<Self> {
        let directory = DirectoryStore::new(kv.clone());
        directory.init()?;
        let session = SessionStore::new(kv.clone(), directory.clone());
        let requests = RequestStore::new(kv.clone());

        Ok(Self {
            config,
            kv,
            session,
            directory,
            requests,
        })
    }
}
