use askama::Template;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::{Form, Router};
use serde::Deserialize;

use crate::domain::UserProfile;
use crate::error::{AppError, AppResult};
use crate::extractors::MaybeUser;
use crate::routes::Html;
use crate::state::AppState;
use crate::store::requests::NewSwapRequest;

#[derive(Template)]
#[template(path = "pages/user.html")]
pub struct UserDetailTemplate {
    pub viewer: Option<UserProfile>,
    pub target: UserProfile,
    pub error: Option<String>,
}

#[derive(Deserialize)]
pub struct RequestForm {
    #[serde(default)]
    pub offered_skill: String,
    #[serde(default)]
    pub wanted_skill: String,
    #[serde(default)]
    pub message: String,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/user/{id}", get(detail_page))
        .route("/user/{id}/request", post(create_request))
}

/// Another user's profile with the swap request form. The form offers the
/// viewer's offered skills and the target's wanted skills; the store accepts
/// whatever non-empty strings arrive (see DESIGN.md on this gap).
async fn detail_page(
    State(state): State<AppState>,
    MaybeUser(viewer): MaybeUser,
    Path(id): Path<String>,
) -> AppResult<Html<UserDetailTemplate>> {
    let target = state.directory.find(&id)?.ok_or(AppError::NotFound)?;

    Ok(Html(UserDetailTemplate {
        viewer,
        target,
        error: None,
    }))
}

async fn create_request(
    State(state): State<AppState>,
    MaybeUser(viewer): MaybeUser,
    Path(id): Path<String>,
    Form(form): Form<RequestForm>,
) -> AppResult<Response> {
    let Some(viewer) = viewer else {
        return Ok(Redirect::to("/login").into_response());
    };
    let target = state.directory.find(&id)?.ok_or(AppError::NotFound)?;

    let offered_skill = form.offered_skill.trim().to_string();
    let wanted_skill = form.wanted_skill.trim().to_string();
    let message = form.message.trim().to_string();

    let error = if offered_skill.is_empty() {
        Some("Please choose a skill to offer")
    } else if wanted_skill.is_empty() {
        Some("Please choose a skill to request")
    } else if message.is_empty() {
        Some("Please include a message")
    } else {
        None
    };

    if let Some(error) = error {
        return Ok(Html(UserDetailTemplate {
            viewer: Some(viewer),
            target,
            error: Some(error.to_string()),
        })
        .into_response());
    }

    state.requests.create(NewSwapRequest {
        requester_id: viewer.id,
        target_user_id: target.id,
        offered_skill,
        wanted_skill,
        message,
    })?;

    Ok(Redirect::to("/requests").into_response())
}
