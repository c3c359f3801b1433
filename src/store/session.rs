use chrono::Utc;
use tokio::sync::watch;

use crate::domain::{Availability, ProfileUpdate, UserProfile};
use crate::error::{AppError, AppResult};
use crate::kv::SharedKv;
use crate::store::{DirectoryStore, CURRENT_USER_KEY};

/// The single authenticated identity of this instance: either anonymous or
/// one profile. Login and signup move anonymous to authenticated, logout
/// moves back; profile edits keep the session authenticated with updated
/// fields. The identity is persisted under its own key, so it survives
/// restarts.
#[derive(Clone)]
pub struct SessionStore {
    kv: SharedKv,
    directory: DirectoryStore,
    snapshot: watch::Sender<Option<UserProfile>>,
}

impl SessionStore {
    pub fn new(kv: SharedKv, directory: DirectoryStore) -> Self {
        let (snapshot, _) = watch::channel(None);
        Self {
            kv,
            directory,
            snapshot,
        }
    }

    /// The current identity, re-read from the adapter on every call.
    pub fn current(&self) -> AppResult<Option<UserProfile>> {
        match self.kv.get(CURRENT_USER_KEY)? {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<UserProfile>> {
        self.snapshot.subscribe()
    }

    /// Register a new account. Fails with `DuplicateEmail` when a profile
    /// already uses the email (case-sensitive exact match), leaving the
    /// directory untouched. On success the new profile is appended to the
    /// directory and becomes the session identity.
    pub fn signup(&self, email: &str, password: &str, name: &str) -> AppResult<UserProfile> {
        let profiles = self.directory.list_profiles()?;
        if profiles.iter().any(|p| p.email == email) {
            return Err(AppError::DuplicateEmail);
        }

        let profile = UserProfile {
            id: uuid::Uuid::now_v7().to_string(),
            email: email.to_string(),
            password: password.to_string(),
            name: name.to_string(),
            location: None,
            skills_offered: Vec::new(),
            skills_wanted: Vec::new(),
            availability: Availability::Unset,
            is_public: true,
            profile_photo: None,
            rating: 0.0,
            review_count: 0,
            created_at: Utc::now(),
        };

        self.directory.append(profile.clone())?;
        self.persist_identity(&profile)?;
        tracing::info!(user = %profile.id, "New account registered");
        Ok(profile)
    }

    /// Authenticate against the stored profiles. Plaintext equality on both
    /// email and password, by design.
    pub fn login(&self, email: &str, password: &str) -> AppResult<UserProfile> {
        let profile = self
            .directory
            .list_profiles()?
            .into_iter()
            .find(|p| p.email == email && p.password == password)
            .ok_or(AppError::InvalidCredentials)?;

        self.persist_identity(&profile)?;
        Ok(profile)
    }

    /// Clear the session identity. The directory collection is untouched.
    pub fn logout(&self) -> AppResult<()> {
        self.kv.remove(CURRENT_USER_KEY)?;
        self.snapshot.send_replace(None);
        Ok(())
    }

    /// Merge the given fields into the current identity and persist the
    /// result both as the session identity and as the matching directory
    /// entry. A no-op returning `None` when no session is active.
    pub fn update_profile(&self, update: &ProfileUpdate) -> AppResult<Option<UserProfile>> {
        let Some(mut profile) = self.current()? else {
            return Ok(None);
        };

        update.apply(&mut profile);
        self.persist_identity(&profile)?;
        self.directory.update(&profile)?;
        Ok(Some(profile))
    }

    fn persist_identity(&self, profile: &UserProfile) -> AppResult<()> {
        self.kv
            .set(CURRENT_USER_KEY, &serde_json::to_value(profile)?)?;
        self.snapshot.send_replace(Some(profile.clone()));
        Ok(())
    }
}
