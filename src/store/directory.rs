use chrono::Utc;
use tokio::sync::watch;

use crate::domain::{Availability, UserProfile};
use crate::error::AppResult;
use crate::kv::SharedKv;
use crate::store::{read_collection, write_collection, USERS_KEY};

/// The collection of all registered profiles, public and private. Listing is
/// insertion order (newest last) and always re-reads the adapter, so an
/// external write to the same store is picked up on the next read —
/// best-effort only, there is no locking or versioning.
///
/// The directory exposes no public mutators: profiles are created and edited
/// exclusively through the session store (self-registration, self-editing).
#[derive(Clone)]
pub struct DirectoryStore {
    kv: SharedKv,
    snapshot: watch::Sender<Vec<UserProfile>>,
}

impl DirectoryStore {
    pub fn new(kv: SharedKv) -> Self {
        let (snapshot, _) = watch::channel(Vec::new());
        Self { kv, snapshot }
    }

    /// First-run initialization: when nothing is persisted yet, seed the
    /// three example profiles so the browse view is never empty. Also
    /// publishes the initial snapshot.
    pub fn init(&self) -> AppResult<()> {
        if self.kv.get(USERS_KEY)?.is_none() {
            tracing::info!("No profiles found, seeding sample data");
            write_collection(&self.kv, USERS_KEY, &sample_profiles())?;
        }
        self.snapshot.send_replace(self.list_profiles()?);
        Ok(())
    }

    /// All profiles in insertion order, newest last.
    pub fn list_profiles(&self) -> AppResult<Vec<UserProfile>> {
        read_collection(&self.kv, USERS_KEY)
    }

    pub fn find(&self, id: &str) -> AppResult<Option<UserProfile>> {
        Ok(self.list_profiles()?.into_iter().find(|p| p.id == id))
    }

    pub fn subscribe(&self) -> watch::Receiver<Vec<UserProfile>> {
        self.snapshot.subscribe()
    }

    /// Append a freshly registered profile. Session store only.
    pub(crate) fn append(&self, profile: UserProfile) -> AppResult<()> {
        let mut profiles = self.list_profiles()?;
        profiles.push(profile);
        write_collection(&self.kv, USERS_KEY, &profiles)?;
        self.snapshot.send_replace(profiles);
        Ok(())
    }

    /// Replace the entry matching the profile's id. Missing ids are silently
    /// ignored. Session store only.
    pub(crate) fn update(&self, profile: &UserProfile) -> AppResult<()> {
        let mut profiles = self.list_profiles()?;
        if let Some(entry) = profiles.iter_mut().find(|p| p.id == profile.id) {
            *entry = profile.clone();
            write_collection(&self.kv, USERS_KEY, &profiles)?;
            self.snapshot.send_replace(profiles);
        }
        Ok(())
    }
}

/// Fixed sample profiles written on first run.
fn sample_profiles() -> Vec<UserProfile> {
    let now = Utc::now();
    vec![
        UserProfile {
            id: "1".to_string(),
            email: "marc@example.com".to_string(),
            password: "password123".to_string(),
            name: "Marc Demo".to_string(),
            location: Some("New York, NY".to_string()),
            skills_offered: vec!["Java Script".to_string(), "Python".to_string()],
            skills_wanted: vec!["Python".to_string(), "Graphic design".to_string()],
            availability: Availability::Weekends,
            is_public: true,
            profile_photo: None,
            rating: 3.4,
            review_count: 12,
            created_at: now,
        },
        UserProfile {
            id: "2".to_string(),
            email: "michell@example.com".to_string(),
            password: "password123".to_string(),
            name: "Michell".to_string(),
            location: Some("San Francisco, CA".to_string()),
            skills_offered: vec!["Java Script".to_string(), "Python".to_string()],
            skills_wanted: vec!["Python".to_string(), "Graphic design".to_string()],
            availability: Availability::Evenings,
            is_public: true,
            profile_photo: None,
            rating: 2.5,
            review_count: 8,
            created_at: now,
        },
        UserProfile {
            id: "3".to_string(),
            email: "joe@example.com".to_string(),
            password: "password123".to_string(),
            name: "Joe Wills".to_string(),
            location: Some("Austin, TX".to_string()),
            skills_offered: vec!["Java Script".to_string(), "Python".to_string()],
            skills_wanted: vec!["Python".to_string(), "Graphic design".to_string()],
            availability: Availability::Flexible,
            is_public: true,
            profile_photo: None,
            rating: 4.0,
            review_count: 15,
            created_at: now,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::MemoryKv;
    use std::sync::Arc;

    fn store() -> DirectoryStore {
        DirectoryStore::new(Arc::new(MemoryKv::new()))
    }

    #[test]
    fn init_seeds_three_profiles_once() {
        let dir = store();
        dir.init().unwrap();

        let profiles = dir.list_profiles().unwrap();
        assert_eq!(profiles.len(), 3);
        assert_eq!(profiles[0].name, "Marc Demo");
        assert_eq!(profiles[2].email, "joe@example.com");
    }

    #[test]
    fn init_does_not_reseed_existing_data() {
        let dir = store();
        dir.init().unwrap();

        let mut marc = dir.find("1").unwrap().unwrap();
        marc.name = "Renamed".to_string();
        dir.update(&marc).unwrap();

        dir.init().unwrap();
        assert_eq!(dir.find("1").unwrap().unwrap().name, "Renamed");
        assert_eq!(dir.list_profiles().unwrap().len(), 3);
    }

    #[test]
    fn append_keeps_insertion_order() {
        let dir = store();
        dir.init().unwrap();

        let mut extra = dir.find("1").unwrap().unwrap();
        extra.id = "99".to_string();
        extra.email = "extra@example.com".to_string();
        dir.append(extra).unwrap();

        let profiles = dir.list_profiles().unwrap();
        assert_eq!(profiles.last().unwrap().id, "99");
    }

    #[test]
    fn update_of_unknown_id_is_ignored() {
        let dir = store();
        dir.init().unwrap();

        let mut ghost = dir.find("1").unwrap().unwrap();
        ghost.id = "ghost".to_string();
        dir.update(&ghost).unwrap();

        assert_eq!(dir.list_profiles().unwrap().len(), 3);
        assert!(dir.find("ghost").unwrap().is_none());
    }

    #[test]
    fn mutations_publish_snapshots() {
        let dir = store();
        let mut rx = dir.subscribe();
        dir.init().unwrap();

        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().len(), 3);

        let mut extra = dir.find("1").unwrap().unwrap();
        extra.id = "99".to_string();
        dir.append(extra).unwrap();

        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().len(), 4);
    }
}
