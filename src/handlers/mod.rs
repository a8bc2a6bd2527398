pub mod login_page_handler;
pub mod oauth;

use axum::{Router, routing::get};

use crate::models::AppState;
pub use login_page_handler::login_page_handler;
pub use oauth::{callback_handler, login_handler};

pub fn router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(login_page_handler))
        .route("/user/login", get(login_page_handler))
        .route("/user/login/foursquare", get(login_handler))
        .route("/user/login/foursquare/callback", get(callback_handler))
        .with_state(app_state)
}
