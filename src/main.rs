use std::sync::Arc;

use foursquare_login::auth::{AuthFlowController, FoursquareNetwork, InMemoryUserManager};
use foursquare_login::handlers::router;
use foursquare_login::models::{AppConfig, AppState};
use time::Duration;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let app_config = Arc::new(AppConfig::from_env()?);
    if app_config.client_id.is_empty() || app_config.client_secret.is_empty() {
        warn!("FOURSQUARE_CLIENT_ID / FOURSQUARE_CLIENT_SECRET not set; logins will fail until configured");
    }

    let controller = AuthFlowController::new(
        Arc::new(FoursquareNetwork::new(app_config.clone())),
        app_config.clone(),
        Arc::new(InMemoryUserManager::new()),
    );

    let app_state = AppState {
        controller: Arc::new(controller),
    };

    let session_store = MemoryStore::default();
    let session_expiry = Expiry::OnInactivity(Duration::hours(6));
    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(false)
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_expiry(session_expiry);

    let app = router(app_state).layer(session_layer);

    info!("listening on http://{}", app_config.bind_addr);

    let listener = tokio::net::TcpListener::bind(app_config.bind_addr.as_str()).await?;
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}
