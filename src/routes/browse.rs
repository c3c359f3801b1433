use askama::Template;
use axum::extract::{Query, State};
use serde::Deserialize;

use crate::domain::query::{browse_directory, AvailabilityFilter, Page};
use crate::domain::UserProfile;
use crate::error::AppResult;
use crate::extractors::MaybeUser;
use crate::routes::Html;
use crate::state::AppState;

#[derive(Template)]
#[template(path = "pages/browse.html")]
pub struct BrowseTemplate {
    pub viewer: Option<UserProfile>,
    pub page: Page<UserProfile>,
    pub q: String,
    pub availability: String,
}

#[derive(Deserialize)]
pub struct BrowseQuery {
    #[serde(default)]
    q: String,
    #[serde(default)]
    availability: String,
    page: Option<usize>,
}

/// The directory browse view. Anonymous visitors may browse; the viewer's
/// own profile and private profiles never appear.
pub async fn index(
    State(state): State<AppState>,
    MaybeUser(viewer): MaybeUser,
    Query(query): Query<BrowseQuery>,
) -> AppResult<Html<BrowseTemplate>> {
    let filter = AvailabilityFilter::parse(&query.availability);
    let profiles = state.directory.list_profiles()?;
    let page = browse_directory(
        profiles,
        viewer.as_ref().map(|u| u.id.as_str()),
        &query.q,
        filter,
        query.page.unwrap_or(1),
    );

    Ok(Html(BrowseTemplate {
        viewer,
        page,
        q: query.q.trim().to_string(),
        availability: filter.as_str().to_string(),
    }))
}
