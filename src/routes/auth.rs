use askama::Template;
use axum::extract::State;
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::{Form, Router};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::routes::Html;
use crate::state::AppState;

#[derive(Template)]
#[template(path = "pages/login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
}

#[derive(Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct SignupForm {
    pub name: String,
    pub email: String,
    pub password: String,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", get(login_page))
        .route("/auth/login", post(login))
        .route("/auth/signup", post(signup))
        .route("/auth/logout", post(logout))
}

async fn login_page() -> Html<LoginTemplate> {
    Html(LoginTemplate { error: None })
}

/// Sign in with stored credentials. Failures render back into the form as
/// inline text rather than an error page.
async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> AppResult<Response> {
    let email = form.email.trim();
    if email.is_empty() || form.password.is_empty() {
        return Ok(inline_error("Email and password are required"));
    }

    match state.session.login(email, &form.password) {
        Ok(_) => Ok(Redirect::to("/").into_response()),
        Err(AppError::InvalidCredentials) => {
            Ok(inline_error(&AppError::InvalidCredentials.to_string()))
        }
        Err(e) => Err(e),
    }
}

/// Create an account and sign in as it.
async fn signup(
    State(state): State<AppState>,
    Form(form): Form<SignupForm>,
) -> AppResult<Response> {
    let name = form.name.trim();
    let email = form.email.trim();

    if name.is_empty() {
        return Ok(inline_error("Name is required"));
    }
    if email.is_empty() {
        return Ok(inline_error("Email is required"));
    }
    if form.password.is_empty() {
        return Ok(inline_error("Password is required"));
    }

    match state.session.signup(email, &form.password, name) {
        Ok(_) => Ok(Redirect::to("/").into_response()),
        Err(AppError::DuplicateEmail) => Ok(inline_error(&AppError::DuplicateEmail.to_string())),
        Err(e) => Err(e),
    }
}

async fn logout(State(state): State<AppState>) -> AppResult<Redirect> {
    state.session.logout()?;
    Ok(Redirect::to("/"))
}

fn inline_error(message: &str) -> Response {
    Html(LoginTemplate {
        error: Some(message.to_string()),
    })
    .into_response()
}
