use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use super::dto::{MealListResponse, MealRequest, MealResponse};
use super::metrics::{summarize, MealMetrics};
use crate::{error::ApiError, session::CurrentUser, state::AppState, store::MealOrder};

// --- public routers ---

pub fn meal_routes() -> Router<AppState> {
    Router::new()
        .route("/meals", get(list_meals).post(create_meal))
        .route("/meals/metrics", get(meal_metrics))
        .route(
            "/meals/:id",
            get(get_meal).put(update_meal).delete(delete_meal),
        )
}

// --- handlers ---

#[instrument(skip(state, user, body), fields(user_id = %user.id))]
pub async fn create_meal(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(body): Json<MealRequest>,
) -> Result<StatusCode, ApiError> {
    let meal = state.store.create_meal(user.id, body.into()).await?;
    info!(meal_id = %meal.id, "meal created");
    Ok(StatusCode::CREATED)
}

#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn list_meals(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<MealListResponse>, ApiError> {
    let meals = state
        .store
        .list_meals(user.id, MealOrder::NewestFirst)
        .await?;
    Ok(Json(MealListResponse { meals }))
}

#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn get_meal(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<MealResponse>, ApiError> {
    match state.store.find_meal(user.id, id).await? {
        Some(meal) => Ok(Json(MealResponse { meal })),
        None => {
            warn!(%id, "meal not found");
            Err(ApiError::NotFound("Meal"))
        }
    }
}

#[instrument(skip(state, user, body), fields(user_id = %user.id))]
pub async fn update_meal(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
    Json(body): Json<MealRequest>,
) -> Result<StatusCode, ApiError> {
    let updated = state.store.update_meal(user.id, id, body.into()).await?;
    if updated.is_none() {
        warn!(%id, "update of missing meal");
        return Err(ApiError::NotFound("Meal"));
    }
    info!(%id, "meal updated");
    Ok(StatusCode::OK)
}

#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn delete_meal(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    if !state.store.delete_meal(user.id, id).await? {
        warn!(%id, "delete of missing meal");
        return Err(ApiError::NotFound("Meal"));
    }
    info!(%id, "meal deleted");
    Ok(StatusCode::OK)
}

#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn meal_metrics(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<MealMetrics>, ApiError> {
    let meals = state.store.list_meals(user.id, MealOrder::Inserted).await?;
    Ok(Json(summarize(meals.iter().map(|m| m.is_on_diet))))
}
