use axum::response::{Html, IntoResponse};
use tower_sessions::Session;
use tracing::error;

use crate::messages::{self, Level};

/// `GET /user/login`: pending messages plus the Foursquare login link.
pub async fn login_page_handler(session: Session) -> impl IntoResponse {
    let pending = messages::drain(&session).await.unwrap_or_else(|e| {
        error!("Failed to read messages from session: {}", e);
        Vec::new()
    });

    let mut items = String::new();
    for message in pending {
        let class = match message.level {
            Level::Status => "status",
            Level::Error => "error",
        };
        items.push_str(&format!(
            "<li class=\"{class}\">{}</li>",
            escape_html(&message.text)
        ));
    }

    Html(format!(
        r#"<!DOCTYPE html>
<html>
<head><title>Log in</title></head>
<body>
    <ul class="messages">{items}</ul>
    <p><a href="/user/login/foursquare">Log in with Foursquare</a></p>
</body>
</html>"#
    ))
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
