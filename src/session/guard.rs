use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use tracing::warn;

use super::{cookie::read_cookie, SessionId};
use crate::{error::ApiError, state::AppState};

/// Rejects requests without a session cookie. Whether the token belongs to a
/// user is checked later by [`super::CurrentUser`].
pub async fn require_session(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let Some(token) = read_cookie(req.headers(), &state.config.session.cookie_name) else {
        warn!(method = %req.method(), uri = %req.uri(), "missing session cookie");
        return Err(ApiError::MissingSession);
    };
    req.extensions_mut().insert(SessionId(token));
    Ok(next.run(req).await)
}
