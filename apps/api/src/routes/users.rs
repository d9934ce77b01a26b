use axum::{extract::State, Json};

use crate::errors::AppError;
use crate::models::user::User;
use crate::state::AppState;

/// GET /api/users
pub async fn handle_list_users(State(state): State<AppState>) -> Result<Json<Vec<User>>, AppError> {
    let users = state.store.list_users().await?;
    Ok(Json(users))
}
