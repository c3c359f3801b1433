use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::domain::UserProfile;
use crate::error::AppError;
use crate::state::AppState;

/// Extractor that requires an authenticated session identity.
/// Returns 401 if nothing is persisted under the session key.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub UserProfile);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        _parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        state
            .session
            .current()?
            .map(CurrentUser)
            .ok_or(AppError::Unauthorized)
    }
}

/// Optional variant — `None` instead of 401 when logged out.
pub struct MaybeUser(pub Option<UserProfile>);

impl FromRequestParts<AppState> for MaybeUser {
    type Rejection = AppError;

    async fn from_request_parts(
        _parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(MaybeUser(state.session.current()?))
    }
}
