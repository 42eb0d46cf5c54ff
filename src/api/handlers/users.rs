//! User CRUD endpoints under `/api/users`.
//!
//! Names are stored verbatim; the only validation is that a `name` field is
//! present where one is required. Unknown or non-numeric ids answer 404.

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;
use tracing::{debug, info, instrument};

use crate::{
    api::store::SharedStore,
    model::{ErrorBody, MessageBody, User, UserInput},
};

const MISSING_NAME: &str = "Missing name in request body";
const MISSING_BODY: &str = "Missing request body";
const NOT_FOUND: &str = "User not found";
const DELETED: &str = "User deleted successfully";

#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "A list of users", body = [User]),
    ),
    tag = "users"
)]
/// Returns the list of all users.
pub async fn list_users(store: Extension<SharedStore>) -> impl IntoResponse {
    let users = store.read().await.list();
    debug!("listing {} users", users.len());
    Json(users)
}

#[utoipa::path(
    post,
    path = "/api/users",
    request_body = UserInput,
    responses(
        (status = 201, description = "User created successfully", body = User),
        (status = 400, description = "Missing 'name' in request body", body = ErrorBody),
    ),
    tag = "users"
)]
#[instrument(skip(store))]
pub async fn create_user(
    store: Extension<SharedStore>,
    payload: Option<Json<UserInput>>,
) -> Response {
    let Some(name) = payload.and_then(|Json(input)| input.name) else {
        return bad_request(MISSING_NAME);
    };

    let user = store.write().await.create(name);
    info!(id = user.id, "user created");

    (StatusCode::CREATED, Json(user)).into_response()
}

#[utoipa::path(
    get,
    path = "/api/users/{id}",
    params(
        ("id" = u64, Path, description = "ID of the user to retrieve")
    ),
    responses(
        (status = 200, description = "User details", body = User),
        (status = 404, description = "User not found", body = ErrorBody),
    ),
    tag = "users"
)]
pub async fn get_user(Path(id): Path<String>, store: Extension<SharedStore>) -> Response {
    let found = match parse_id(&id) {
        Some(id) => store.read().await.get(id),
        None => None,
    };

    match found {
        Some(user) => (StatusCode::OK, Json(user)).into_response(),
        None => not_found(),
    }
}

#[utoipa::path(
    put,
    path = "/api/users/{id}",
    params(
        ("id" = u64, Path, description = "ID of the user to update")
    ),
    request_body = UserInput,
    responses(
        (status = 200, description = "User updated successfully", body = User),
        (status = 400, description = "Missing 'name' in request body", body = ErrorBody),
        (status = 404, description = "User not found", body = ErrorBody),
    ),
    tag = "users"
)]
#[instrument(skip(store))]
/// Replaces the user's name. Existence is checked before the body.
pub async fn update_user(
    Path(id): Path<String>,
    store: Extension<SharedStore>,
    payload: Option<Json<UserInput>>,
) -> Response {
    let Some(id) = parse_id(&id) else {
        return not_found();
    };

    let mut store = store.write().await;
    if !store.contains(id) {
        return not_found();
    }

    let Some(name) = payload.and_then(|Json(input)| input.name) else {
        return bad_request(MISSING_NAME);
    };

    match store.rename(id, name) {
        Some(user) => {
            info!(id, "user updated");
            (StatusCode::OK, Json(user)).into_response()
        }
        None => not_found(),
    }
}

#[utoipa::path(
    patch,
    path = "/api/users/{id}",
    params(
        ("id" = u64, Path, description = "ID of the user to partially update")
    ),
    request_body = UserInput,
    responses(
        (status = 200, description = "User updated successfully", body = User),
        (status = 400, description = "Missing request body", body = ErrorBody),
        (status = 404, description = "User not found", body = ErrorBody),
    ),
    tag = "users"
)]
#[instrument(skip(store))]
/// Applies the fields present in the body. A falsy body (`{}`, `[]`, `""`,
/// `0`, `false`, `null`) counts as no body.
pub async fn patch_user(
    Path(id): Path<String>,
    store: Extension<SharedStore>,
    payload: Option<Json<Value>>,
) -> Response {
    let Some(id) = parse_id(&id) else {
        return not_found();
    };

    let mut store = store.write().await;
    let Some(current) = store.get(id) else {
        return not_found();
    };

    let Some(Json(body)) = payload.filter(|Json(body)| has_content(body)) else {
        return bad_request(MISSING_BODY);
    };

    let user = match body.get("name").and_then(Value::as_str) {
        Some(name) => store.rename(id, name.to_string()).unwrap_or(current),
        None => current,
    };

    (StatusCode::OK, Json(user)).into_response()
}

#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    params(
        ("id" = u64, Path, description = "ID of the user to delete")
    ),
    responses(
        (status = 200, description = "User deleted successfully", body = MessageBody),
        (status = 404, description = "User not found", body = ErrorBody),
    ),
    tag = "users"
)]
#[instrument(skip(store))]
pub async fn delete_user(Path(id): Path<String>, store: Extension<SharedStore>) -> Response {
    let removed = match parse_id(&id) {
        Some(id) => store.write().await.remove(id),
        None => false,
    };

    if !removed {
        return not_found();
    }

    info!("user deleted");
    (
        StatusCode::OK,
        Json(MessageBody {
            message: DELETED.to_string(),
        }),
    )
        .into_response()
}

fn parse_id(raw: &str) -> Option<u64> {
    raw.trim().parse::<u64>().ok()
}

fn has_content(body: &Value) -> bool {
    match body {
        Value::Null => false,
        Value::Bool(value) => *value,
        Value::Number(number) => number.as_f64().is_some_and(|value| value != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

fn bad_request(message: &str) -> Response {
    (StatusCode::BAD_REQUEST, Json(ErrorBody::new(message))).into_response()
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(ErrorBody::new(NOT_FOUND))).into_response()
}
