use crate::models::AppState;
use crate::models::oauth::CallbackParams;
use axum::{
    extract::{Query, State},
    response::IntoResponse,
};
use tower_sessions::Session;
use tracing::debug;

/// `GET /user/login/foursquare/callback`
pub async fn callback_handler(
    Query(params): Query<CallbackParams>,
    State(app_state): State<AppState>,
    session: Session,
) -> impl IntoResponse {
    debug!(
        "OAuth callback received. Session ID: {:?}, has code: {}, has state: {}, error: {:?}",
        session.id(),
        params.code.is_some(),
        params.state.is_some(),
        params.error
    );

    app_state.controller.callback(&session, params).await
}
