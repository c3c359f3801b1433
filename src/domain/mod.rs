pub mod query;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// When a profile's owner is available for swaps. New accounts start unset
/// (serialized as an empty string, matching the persisted format).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Availability {
    #[serde(rename = "weekends")]
    Weekends,
    #[serde(rename = "evenings")]
    Evenings,
    #[serde(rename = "weekdays")]
    Weekdays,
    #[serde(rename = "flexible")]
    Flexible,
    #[default]
    #[serde(rename = "")]
    Unset,
}

impl Availability {
    pub const ALL: [Availability; 4] = [
        Availability::Weekends,
        Availability::Evenings,
        Availability::Weekdays,
        Availability::Flexible,
    ];

    pub fn is_set(&self) -> bool {
        !matches!(self, Availability::Unset)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Availability::Weekends => "weekends",
            Availability::Evenings => "evenings",
            Availability::Weekdays => "weekdays",
            Availability::Flexible => "flexible",
            Availability::Unset => "",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Availability::Weekends => "Weekends",
            Availability::Evenings => "Evenings",
            Availability::Weekdays => "Weekdays",
            Availability::Flexible => "Flexible",
            Availability::Unset => "Not set",
        }
    }
}

impl fmt::Display for Availability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Availability {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "weekends" => Ok(Availability::Weekends),
            "evenings" => Ok(Availability::Evenings),
            "weekdays" => Ok(Availability::Weekdays),
            "flexible" => Ok(Availability::Flexible),
            "" => Ok(Availability::Unset),
            _ => Err(()),
        }
    }
}

/// A registered user's record. Field names on the wire are camelCase,
/// matching the persisted `users` / `currentUser` layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    pub password: String,
    pub name: String,
    #[serde(default)]
    pub location: Option<String>,
    pub skills_offered: Vec<String>,
    pub skills_wanted: Vec<String>,
    pub availability: Availability,
    pub is_public: bool,
    #[serde(default)]
    pub profile_photo: Option<String>,
    pub rating: f64,
    pub review_count: u32,
    pub created_at: DateTime<Utc>,
}

impl UserProfile {
    /// First letter of the name, used as the avatar fallback.
    pub fn initial(&self) -> String {
        self.name
            .chars()
            .next()
            .map(|c| c.to_uppercase().to_string())
            .unwrap_or_else(|| "?".to_string())
    }
}

/// Status of a swap request. Transitions are one-way out of `Pending`;
/// once accepted or rejected a request never changes status again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Accepted,
    Rejected,
}

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "pending",
            RequestStatus::Accepted => "accepted",
            RequestStatus::Rejected => "rejected",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "Pending",
            RequestStatus::Accepted => "Accepted",
            RequestStatus::Rejected => "Rejected",
        }
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RequestStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(RequestStatus::Pending),
            "accepted" => Ok(RequestStatus::Accepted),
            "rejected" => Ok(RequestStatus::Rejected),
            _ => Err(()),
        }
    }
}

/// A directed proposal to exchange one offered skill for one wanted skill.
/// Requester and target ids are weak references into the directory; nothing
/// cascades when a referenced profile disappears.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapRequest {
    pub id: String,
    pub requester_id: String,
    pub target_user_id: String,
    pub offered_skill: String,
    pub wanted_skill: String,
    pub message: String,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
}

impl SwapRequest {
    /// Accept/reject belongs to the target, and only while pending.
    pub fn can_decide(&self, viewer_id: &str) -> bool {
        self.target_user_id == viewer_id && self.status == RequestStatus::Pending
    }

    /// The requester may cancel while pending; either party may delete a
    /// rejected request.
    pub fn can_delete(&self, viewer_id: &str) -> bool {
        match self.status {
            RequestStatus::Pending => self.requester_id == viewer_id,
            RequestStatus::Rejected => {
                self.requester_id == viewer_id || self.target_user_id == viewer_id
            }
            RequestStatus::Accepted => false,
        }
    }
}

/// Part of the shared type vocabulary but never populated or read by any
/// store. Kept so the persisted format stays open to reviews later.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: String,
    pub reviewer_id: String,
    pub reviewee_id: String,
    pub swap_request_id: String,
    pub rating: f64,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

/// Partial profile edit. Present fields replace the profile's same-named
/// fields wholesale (a shallow merge: skill lists are swapped out, not
/// merged element-wise).
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub location: Option<Option<String>>,
    pub skills_offered: Option<Vec<String>>,
    pub skills_wanted: Option<Vec<String>>,
    pub availability: Option<Availability>,
    pub is_public: Option<bool>,
    pub profile_photo: Option<Option<String>>,
}

impl ProfileUpdate {
    pub fn apply(&self, profile: &mut UserProfile) {
        if let Some(name) = &self.name {
            profile.name = name.clone();
        }
        if let Some(location) = &self.location {
            profile.location = location.clone();
        }
        if let Some(skills) = &self.skills_offered {
            profile.skills_offered = skills.clone();
        }
        if let Some(skills) = &self.skills_wanted {
            profile.skills_wanted = skills.clone();
        }
        if let Some(availability) = self.availability {
            profile.availability = availability;
        }
        if let Some(is_public) = self.is_public {
            profile.is_public = is_public;
        }
        if let Some(photo) = &self.profile_photo {
            profile.profile_photo = photo.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(id: &str) -> UserProfile {
        UserProfile {
            id: id.to_string(),
            email: format!("{id}@example.com"),
            password: "password123".to_string(),
            name: "Test".to_string(),
            location: None,
            skills_offered: vec![],
            skills_wanted: vec![],
            availability: Availability::Unset,
            is_public: true,
            profile_photo: None,
            rating: 0.0,
            review_count: 0,
            created_at: Utc::now(),
        }
    }

    fn request(status: RequestStatus) -> SwapRequest {
        SwapRequest {
            id: "r1".to_string(),
            requester_id: "a".to_string(),
            target_user_id: "b".to_string(),
            offered_skill: "Python".to_string(),
            wanted_skill: "Guitar".to_string(),
            message: "hi".to_string(),
            status,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn profile_serializes_with_camel_case_keys() {
        let json = serde_json::to_value(profile("1")).unwrap();
        assert!(json.get("skillsOffered").is_some());
        assert!(json.get("isPublic").is_some());
        assert!(json.get("reviewCount").is_some());
        assert!(json.get("createdAt").is_some());
    }

    #[test]
    fn unset_availability_round_trips_as_empty_string() {
        let json = serde_json::to_value(Availability::Unset).unwrap();
        assert_eq!(json, serde_json::json!(""));

        let parsed: Availability = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, Availability::Unset);
    }

    #[test]
    fn status_serializes_lowercase() {
        let json = serde_json::to_value(RequestStatus::Accepted).unwrap();
        assert_eq!(json, serde_json::json!("accepted"));
    }

    #[test]
    fn only_the_target_decides_and_only_while_pending() {
        let req = request(RequestStatus::Pending);
        assert!(req.can_decide("b"));
        assert!(!req.can_decide("a"));

        let req = request(RequestStatus::Accepted);
        assert!(!req.can_decide("b"));
    }

    #[test]
    fn delete_rules_follow_the_lifecycle() {
        let pending = request(RequestStatus::Pending);
        assert!(pending.can_delete("a"));
        assert!(!pending.can_delete("b"));

        let rejected = request(RequestStatus::Rejected);
        assert!(rejected.can_delete("a"));
        assert!(rejected.can_delete("b"));

        let accepted = request(RequestStatus::Accepted);
        assert!(!accepted.can_delete("a"));
        assert!(!accepted.can_delete("b"));
    }

    #[test]
    fn update_replaces_named_fields_wholesale() {
        let mut p = profile("1");
        p.skills_offered = vec!["Rust".to_string(), "Go".to_string()];

        let update = ProfileUpdate {
            skills_offered: Some(vec!["Piano".to_string()]),
            is_public: Some(false),
            ..Default::default()
        };
        update.apply(&mut p);

        assert_eq!(p.skills_offered, vec!["Piano".to_string()]);
        assert!(!p.is_public);
        // Untouched fields survive
        assert_eq!(p.name, "Test");
    }

    #[test]
    fn applying_the_same_update_twice_is_idempotent() {
        let mut once = profile("1");
        let mut twice = once.clone();

        let update = ProfileUpdate {
            name: Some("Ada".to_string()),
            skills_wanted: Some(vec!["Chess".to_string()]),
            availability: Some(Availability::Evenings),
            ..Default::default()
        };

        update.apply(&mut once);
        update.apply(&mut twice);
        update.apply(&mut twice);

        assert_eq!(once, twice);
    }

    #[test]
    fn initial_falls_back_for_empty_names() {
        let mut p = profile("1");
        assert_eq!(p.initial(), "T");
        p.name.clear();
        assert_eq!(p.initial(), "?");
    }
}
