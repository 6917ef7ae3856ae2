mod dto;
pub mod handlers;
pub mod metrics;

use crate::{session::require_session, state::AppState};
use axum::{middleware, Router};

/// Meal routes, all behind the session guard.
pub fn router(state: AppState) -> Router<AppState> {
    handlers::meal_routes().route_layer(middleware::from_fn_with_state(state, require_session))
}
