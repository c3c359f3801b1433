use askama::Template;
use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::Router;
use serde::Deserialize;

use crate::domain::query::{inbox, InboxEntry, Page, StatusFilter};
use crate::domain::{RequestStatus, UserProfile};
use crate::error::{AppError, AppResult};
use crate::extractors::{CurrentUser, MaybeUser};
use crate::routes::Html;
use crate::state::AppState;

#[derive(Template)]
#[template(path = "pages/requests.html")]
pub struct RequestsTemplate {
    pub viewer: UserProfile,
    pub page: Page<InboxEntry>,
    pub q: String,
    pub status: String,
}

#[derive(Deserialize)]
pub struct InboxQuery {
    #[serde(default)]
    q: String,
    #[serde(default)]
    status: String,
    page: Option<usize>,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/requests", get(inbox_page))
        .route("/requests/{id}/accept", post(accept))
        .route("/requests/{id}/reject", post(reject))
        .route("/requests/{id}/delete", post(delete))
}

/// The swap request inbox: everything the viewer sent or received,
/// filterable by status, searchable, paginated.
async fn inbox_page(
    State(state): State<AppState>,
    MaybeUser(viewer): MaybeUser,
    Query(query): Query<InboxQuery>,
) -> AppResult<Response> {
    let Some(viewer) = viewer else {
        return Ok(Redirect::to("/login").into_response());
    };

    let filter = StatusFilter::parse(&query.status);
    let requests = state.requests.list()?;
    let profiles = state.directory.list_profiles()?;
    let page = inbox(
        requests,
        &profiles,
        &viewer.id,
        filter,
        &query.q,
        query.page.unwrap_or(1),
    );

    Ok(Html(RequestsTemplate {
        viewer,
        page,
        q: query.q.trim().to_string(),
        status: filter.as_str().to_string(),
    })
    .into_response())
}

async fn accept(
    State(state): State<AppState>,
    CurrentUser(viewer): CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Redirect> {
    decide(&state, &viewer, &id, RequestStatus::Accepted)
}

async fn reject(
    State(state): State<AppState>,
    CurrentUser(viewer): CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Redirect> {
    decide(&state, &viewer, &id, RequestStatus::Rejected)
}

/// Accept/reject gate: only the target may decide, and only while the
/// request is still pending. The store itself does not enforce this.
fn decide(
    state: &AppState,
    viewer: &UserProfile,
    id: &str,
    status: RequestStatus,
) -> AppResult<Redirect> {
    let request = state.requests.find(id)?.ok_or(AppError::NotFound)?;
    if !request.can_decide(&viewer.id) {
        return Err(AppError::Unauthorized);
    }

    state.requests.update_status(id, status)?;
    Ok(Redirect::to("/requests"))
}

/// Delete gate: the requester may cancel while pending; either party may
/// delete once rejected.
async fn delete(
    State(state): State<AppState>,
    CurrentUser(viewer): CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Redirect> {
    let request = state.requests.find(&id)?.ok_or(AppError::NotFound)?;
    if !request.can_delete(&viewer.id) {
        return Err(AppError::Unauthorized);
    }

    state.requests.delete(&id)?;
    Ok(Redirect::to("/requests"))
}
