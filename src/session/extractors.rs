use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use tracing::warn;

use super::SessionId;
use crate::{error::ApiError, state::AppState, store::User};

/// Resolves the session stored by [`super::require_session`] to the owning user row.
pub struct CurrentUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let SessionId(token) = parts
            .extensions
            .get::<SessionId>()
            .ok_or(ApiError::MissingSession)?;

        match state.store.find_user_by_session(token).await? {
            Some(user) => Ok(CurrentUser(user)),
            None => {
                warn!("session does not match any user");
                Err(ApiError::UnknownSession)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts_with(session: Option<&str>) -> Parts {
        let (mut parts, _) = Request::builder()
            .uri("/meals")
            .header("cookie", "sessionId=ignored-without-guard")
            .body(())
            .unwrap()
            .into_parts();
        if let Some(token) = session {
            parts.extensions.insert(SessionId(token.to_string()));
        }
        parts
    }

    #[tokio::test]
    async fn rejects_when_guard_did_not_run() {
        let state = AppState::in_memory();
        let err = CurrentUser::from_request_parts(&mut parts_with(None), &state)
            .await
            .err()
            .expect("should reject");
        assert!(matches!(err, ApiError::MissingSession));
    }

    #[tokio::test]
    async fn rejects_unknown_session() {
        let state = AppState::in_memory();
        let err = CurrentUser::from_request_parts(&mut parts_with(Some("stale")), &state)
            .await
            .err()
            .expect("should reject");
        assert!(matches!(err, ApiError::UnknownSession));
    }
}
