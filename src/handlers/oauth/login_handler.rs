use crate::models::AppState;
use crate::models::oauth::LoginParams;
use axum::{
    extract::{Query, State},
    response::IntoResponse,
};
use tower_sessions::Session;

/// `GET /user/login/foursquare`
pub async fn login_handler(
    Query(params): Query<LoginParams>,
    State(app_state): State<AppState>,
    session: Session,
) -> impl IntoResponse {
    app_state
        .controller
        .start(&session, params.destination.as_deref())
        .await
}
