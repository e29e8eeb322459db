//! Registration and login.

use super::*;
use stacklist::model::new_entity_id;

const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, serde::Deserialize)]
pub(super) struct CredentialsPayload {
    #[serde(default)]
    email: Option<String>,

    #[serde(default)]
    password: Option<String>,
}

pub(super) async fn register(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CredentialsPayload>,
) -> Result<Response, Response> {
    let (Some(email), Some(password)) = (payload.email, payload.password) else {
        return Err(bad_request("Email and password are required"));
    };
    let email = email.trim().to_string();
    let password = password.trim().to_string();

    if email.is_empty() {
        return Err(bad_request("Email cannot be blank"));
    }
    if password.is_empty() {
        return Err(bad_request("Password cannot be blank"));
    }
    if password.len() < MIN_PASSWORD_LEN {
        return Err(bad_request("Password must be at least 6 characters"));
    }

    let mut users = state.users.write().await;
    let mut email_index = state.email_index.write().await;
    if email_index.contains_key(&email) {
        return Err(bad_request("Email already taken"));
    }

    let user = UserRecord {
        id: new_entity_id().map_err(internal_error)?,
        email: email.clone(),
        password_hash: hash_password(&password),
        created_at: now_ts(),
    };
    email_index.insert(email, user.id.clone());
    users.insert(user.id.clone(), user);

    persist_users(&state.data_dir, &users).map_err(internal_error)?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({"message": "User registered successfully"})),
    )
        .into_response())
}

pub(super) async fn login(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CredentialsPayload>,
) -> Result<Json<serde_json::Value>, Response> {
    let (Some(email), Some(password)) = (payload.email, payload.password) else {
        return Err(invalid_credentials());
    };

    let user_id = {
        let email_index = state.email_index.read().await;
        email_index.get(email.trim()).cloned()
    };
    let Some(user_id) = user_id else {
        return Err(invalid_credentials());
    };

    let users = state.users.read().await;
    let Some(user) = users.get(&user_id) else {
        return Err(invalid_credentials());
    };
    if user.password_hash != hash_password(password.trim()) {
        return Err(invalid_credentials());
    }

    Ok(Json(serde_json::json!({"userId": user.id})))
}

fn invalid_credentials() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(serde_json::json!({"error": "Invalid credentials"})),
    )
        .into_response()
}
