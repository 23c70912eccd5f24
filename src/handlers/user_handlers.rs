use crate::error::{AppError, Result};
use crate::models::{User, UserRequest};
use crate::AppState;
use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    Json,
};

// Decoded by hand so that every malformed body is a 400 regardless of
// Content-Type; the `Json` extractor would answer 415/422 instead.
// Only the first JSON value is read, and a bare `null` is an empty request.
fn parse_body(body: &[u8]) -> Result<UserRequest> {
    let mut values =
        serde_json::Deserializer::from_slice(body).into_iter::<Option<UserRequest>>();

    match values.next() {
        Some(Ok(request)) => Ok(request.unwrap_or_default()),
        Some(Err(e)) => Err(AppError::InvalidJson(e)),
        None => Err(AppError::InvalidJson(serde::de::Error::custom("empty body"))),
    }
}

fn parse_id(raw: &str) -> Result<i64> {
    raw.parse::<i64>()
        .map_err(|_| AppError::InvalidUserId(raw.to_string()))
}

/// `POST /users`
pub async fn create_user_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<User>)> {
    let request = parse_body(&body)?;

    let user = state
        .users
        .create_user(&request.name, &request.email)
        .await
        .map_err(AppError::repository("Failed to create user"))?;

    tracing::info!(id = user.id, "Created user");

    Ok((StatusCode::CREATED, Json(user)))
}

/// `GET /users`
pub async fn list_users_handler(State(state): State<AppState>) -> Result<Json<Vec<User>>> {
    let users = state
        .users
        .list_users()
        .await
        .map_err(AppError::repository("Failed to get users"))?;

    Ok(Json(users))
}

/// `GET /users/{id}`
pub async fn get_user_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<User>> {
    let id = parse_id(&id)?;

    let user = state
        .users
        .find_by_id(id)
        .await
        .map_err(AppError::repository("Failed to get user"))?;

    Ok(Json(user))
}

/// `PUT /users/{id}`
pub async fn update_user_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<User>> {
    let id = parse_id(&id)?;
    let request = parse_body(&body)?;

    let user = state
        .users
        .update_user(id, &request.name, &request.email)
        .await
        .map_err(AppError::repository("Failed to update user"))?;

    Ok(Json(user))
}

/// `DELETE /users/{id}`, 204 whether or not the row existed.
pub async fn delete_user_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    let id = parse_id(&id)?;

    state
        .users
        .delete_user(id)
        .await
        .map_err(AppError::repository("Failed to delete user"))?;

    Ok(StatusCode::NO_CONTENT)
}
