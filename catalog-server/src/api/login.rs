use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use shared_types::{LoginRequest, LoginResponse};
use tracing::info;

use crate::auth;
use crate::error::ApiResult;
use crate::AppState;

/// POST /login/authenticate
///
/// Always 200: a wrong password or unknown token is reported through
/// `success: false` and a message the dashboard shows verbatim.
pub async fn authenticate(
    State(state): State<Arc<AppState>>,
    Json(body): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let response = auth::authenticate(&state.db, &body).await?;
    info!(
        token_id = %body.token_id,
        success = response.success,
        "login attempt"
    );
    Ok(Json(response))
}
