use std::sync::Arc;

use axum::extract::State;
use harbor_core::models::User;
use harbor_db::UserLookup;

use crate::constants::{DEFAULT_USER_ID, SUCCESS_MESSAGE};
use crate::error::HttpAppError;
use crate::response::ApiResponse;
use crate::state::AppState;

/// `GET /server`: the default user
#[tracing::instrument(skip(state))]
pub async fn get_user(
    State(state): State<Arc<AppState>>,
) -> Result<ApiResponse<User>, HttpAppError> {
    let user = state
        .user_repository
        .find_by_lookup(UserLookup::Id(DEFAULT_USER_ID))
        .await?;

    Ok(ApiResponse::from_data(SUCCESS_MESSAGE, user))
}

/// `GET /server/all-users`
#[tracing::instrument(skip(state))]
pub async fn get_all_users(
    State(state): State<Arc<AppState>>,
) -> Result<ApiResponse<Vec<User>>, HttpAppError> {
    let users = state.user_repository.list_all().await?;

    Ok(ApiResponse::from_data(SUCCESS_MESSAGE, users))
}
