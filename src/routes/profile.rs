use askama::Template;
use axum::extract::State;
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::get;
use axum::{Form, Router};
use serde::Deserialize;

use crate::domain::{Availability, ProfileUpdate, UserProfile};
use crate::error::AppResult;
use crate::extractors::MaybeUser;
use crate::routes::Html;
use crate::state::AppState;

#[derive(Template)]
#[template(path = "pages/profile.html")]
pub struct ProfileTemplate {
    pub viewer: UserProfile,
    pub form: ProfileFormView,
    pub message: Option<String>,
    pub saved: bool,
}

/// The editor's current field values, either from the stored profile or,
/// after a rejected submit, from the submitted form so nothing is lost.
pub struct ProfileFormView {
    pub name: String,
    pub location: String,
    pub skills_offered: String,
    pub skills_wanted: String,
    pub availability: String,
    pub is_public: bool,
    pub profile_photo: String,
}

impl ProfileFormView {
    fn from_profile(profile: &UserProfile) -> Self {
        Self {
            name: profile.name.clone(),
            location: profile.location.clone().unwrap_or_default(),
            skills_offered: profile.skills_offered.join(", "),
            skills_wanted: profile.skills_wanted.join(", "),
            availability: profile.availability.as_str().to_string(),
            is_public: profile.is_public,
            profile_photo: profile.profile_photo.clone().unwrap_or_default(),
        }
    }
}

#[derive(Deserialize)]
pub struct ProfileForm {
    pub name: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub skills_offered: String,
    #[serde(default)]
    pub skills_wanted: String,
    #[serde(default)]
    pub availability: String,
    // Checkbox: present when checked, absent otherwise
    pub is_public: Option<String>,
    #[serde(default)]
    pub profile_photo: String,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/profile", get(edit_page).post(save))
}

async fn edit_page(MaybeUser(viewer): MaybeUser) -> AppResult<Response> {
    let Some(viewer) = viewer else {
        return Ok(Redirect::to("/login").into_response());
    };

    let form = ProfileFormView::from_profile(&viewer);
    Ok(Html(ProfileTemplate {
        viewer,
        form,
        message: None,
        saved: false,
    })
    .into_response())
}

async fn save(
    State(state): State<AppState>,
    MaybeUser(viewer): MaybeUser,
    Form(form): Form<ProfileForm>,
) -> AppResult<Response> {
    let Some(viewer) = viewer else {
        return Ok(Redirect::to("/login").into_response());
    };

    let name = form.name.trim().to_string();
    let skills_offered = parse_skills(&form.skills_offered);
    let skills_wanted = parse_skills(&form.skills_wanted);
    let availability = form
        .availability
        .parse::<Availability>()
        .unwrap_or(Availability::Unset);

    let submitted = ProfileFormView {
        name: name.clone(),
        location: form.location.trim().to_string(),
        skills_offered: skills_offered.join(", "),
        skills_wanted: skills_wanted.join(", "),
        availability: availability.as_str().to_string(),
        is_public: form.is_public.is_some(),
        profile_photo: form.profile_photo.trim().to_string(),
    };

    let error = if name.is_empty() {
        Some("Name is required")
    } else if skills_offered.is_empty() {
        Some("Please add at least one skill you can offer")
    } else if skills_wanted.is_empty() {
        Some("Please add at least one skill you want to learn")
    } else if !availability.is_set() {
        Some("Please select your availability")
    } else {
        None
    };

    if let Some(error) = error {
        return Ok(Html(ProfileTemplate {
            viewer,
            form: submitted,
            message: Some(error.to_string()),
            saved: false,
        })
        .into_response());
    }

    let location = submitted.location.clone();
    let photo = submitted.profile_photo.clone();
    let update = ProfileUpdate {
        name: Some(name),
        location: Some((!location.is_empty()).then_some(location)),
        skills_offered: Some(skills_offered),
        skills_wanted: Some(skills_wanted),
        availability: Some(availability),
        is_public: Some(submitted.is_public),
        profile_photo: Some((!photo.is_empty()).then_some(photo)),
    };

    let updated = state
        .session
        .update_profile(&update)?
        .unwrap_or(viewer);

    let form = ProfileFormView::from_profile(&updated);
    Ok(Html(ProfileTemplate {
        viewer: updated,
        form,
        message: Some("Profile updated successfully!".to_string()),
        saved: true,
    })
    .into_response())
}

/// Comma-separated input, trimmed, empty entries and duplicates dropped,
/// first occurrence wins.
fn parse_skills(input: &str) -> Vec<String> {
    let mut skills: Vec<String> = Vec::new();
    for raw in input.split(',') {
        let skill = raw.trim();
        if !skill.is_empty() && !skills.iter().any(|s| s == skill) {
            skills.push(skill.to_string());
        }
    }
    skills
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_skills_trims_and_drops_empties() {
        assert_eq!(
            parse_skills(" Python ,  , Guitar,"),
            vec!["Python".to_string(), "Guitar".to_string()]
        );
    }

    #[test]
    fn parse_skills_keeps_first_occurrence() {
        assert_eq!(
            parse_skills("Python, Guitar, Python"),
            vec!["Python".to_string(), "Guitar".to_string()]
        );
    }

    #[test]
    fn parse_skills_of_empty_input_is_empty() {
        assert!(parse_skills("").is_empty());
        assert!(parse_skills("  , ,").is_empty());
    }
}
