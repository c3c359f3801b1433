pub mod assets;
pub mod auth;
pub mod browse;
pub mod events;
pub mod profile;
pub mod requests;
pub mod users;

use askama::Template;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Wrapper to render askama templates as axum responses.
pub struct Html<T: Template>(pub T);

impl<T: Template> IntoResponse for Html<T> {
    fn into_response(self) -> Response {
        match self.0.render() {
            Ok(body) => (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
                body,
            )
                .into_response(),
            Err(e) => {
                tracing::error!("Template render error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Template error").into_response()
            }
        }
    }
}

/// The full application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(browse::index))
        .route("/assets/{*path}", get(assets::serve))
        .route("/events", get(events::stream))
        .merge(auth::router())
        .merge(profile::router())
        .merge(requests::router())
        .merge(users::router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
