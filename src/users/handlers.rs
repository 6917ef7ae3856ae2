use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    routing::get,
    Json, Router,
};
use tracing::{info, instrument};
use uuid::Uuid;

use super::dto::RegisterRequest;
use crate::{
    error::ApiError,
    session::cookie::{read_cookie, session_cookie},
    state::AppState,
    store::NewUser,
};

pub fn user_routes() -> Router<AppState> {
    Router::new().route("/users", get(hello).post(register))
}

pub async fn hello() -> &'static str {
    "Hello World"
}

/// POST /users. Mints a session cookie only when the request has none.
#[instrument(skip(state, headers, payload))]
pub async fn register(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, HeaderMap), ApiError> {
    let session_cfg = &state.config.session;
    let mut out = HeaderMap::new();

    let session_id = match read_cookie(&headers, &session_cfg.cookie_name) {
        Some(existing) => existing,
        None => {
            let minted = Uuid::new_v4().to_string();
            out.insert(header::SET_COOKIE, session_cookie(session_cfg, &minted)?);
            minted
        }
    };

    let user = state
        .store
        .create_user(NewUser {
            name: payload.name,
            email: payload.email,
            session_id,
        })
        .await?;

    info!(user_id = %user.id, new_session = out.contains_key(header::SET_COOKIE), "user registered");
    Ok((StatusCode::CREATED, out))
}
