use serde::Deserialize;
use serde_json::Value;

use crate::error::AuthError;
use crate::models::NameField;
use crate::models::profile::RemoteProfile;

const AVATAR_SIZE: &str = "original";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FoursquareUser {
    id: Option<Value>,
    first_name: Option<String>,
    last_name: Option<String>,
    contact: Option<Contact>,
    photo: Option<Photo>,
}

#[derive(Debug, Deserialize)]
struct Contact {
    email: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Photo {
    prefix: Option<String>,
    suffix: Option<String>,
}

/// Maps a Foursquare user object onto [`RemoteProfile`].
pub fn map_profile(raw: &Value, name_field: NameField) -> Result<RemoteProfile, AuthError> {
    let user = FoursquareUser::deserialize(raw)
        .map_err(|e| AuthError::MalformedProfile(format!("Unexpected user object: {e}")))?;

    let provider_user_id = match user.id {
        Some(Value::String(id)) if !id.trim().is_empty() => id,
        Some(Value::Number(id)) => id.to_string(),
        _ => return Err(AuthError::MalformedProfile("Profile has no id".to_string())),
    };

    let first_name = non_empty(user.first_name);
    let full_name = match (first_name.as_deref(), non_empty(user.last_name).as_deref()) {
        (Some(first), Some(last)) => Some(format!("{first} {last}")),
        (Some(first), None) => Some(first.to_string()),
        (None, Some(last)) => Some(last.to_string()),
        (None, None) => None,
    };

    let display_name = match name_field {
        NameField::FirstName => first_name.or(full_name),
        NameField::FullName => full_name,
    }
    .unwrap_or_else(|| provider_user_id.clone());

    let email = non_empty(user.contact.and_then(|contact| contact.email));

    let avatar_url = user.photo.and_then(|photo| match (photo.prefix, photo.suffix) {
        (Some(prefix), Some(suffix)) => Some(format!("{prefix}{AVATAR_SIZE}{suffix}")),
        _ => None,
    });

    Ok(RemoteProfile {
        provider_user_id,
        display_name,
        email,
        avatar_url,
    })
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
