use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::auth::password;
use crate::error::ApiError;
use crate::state::AppState;
use crate::users::{
    dto::{CreateUserRequest, EmailQuery, UpdateUserRequest, UserResponse},
    repo::{NewUser, User},
    service,
};

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route("/users/search", get(find_by_email))
        .route(
            "/users/:id",
            get(get_user).put(update_user).delete(delete_user),
        )
}

#[instrument(skip(state))]
async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<UserResponse>>, ApiError> {
    let users = User::list(&state.db).await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

#[instrument(skip(state))]
async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = User::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".into()))?;
    Ok(Json(user.into()))
}

#[instrument(skip(state))]
async fn find_by_email(
    State(state): State<AppState>,
    Query(q): Query<EmailQuery>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = User::find_by_email(&state.db, &q.email)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".into()))?;
    Ok(Json(user.into()))
}

#[instrument(skip(state, payload))]
async fn create_user(
    State(state): State<AppState>,
    Json(payload): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    payload.validate()?;

    // Advisory check; the unique index catches the race.
    if User::find_by_email(&state.db, &payload.email).await?.is_some() {
        warn!(email = %payload.email, "email already in use");
        return Err(ApiError::Conflict("Email already in use".into()));
    }

    let password_hash = password::hash_password(&payload.password)?;
    let user = User::create(
        &state.db,
        &NewUser {
            email: payload.email,
            password_hash,
            first_name: payload.first_name,
            last_name: payload.last_name,
        },
    )
    .await?;

    info!(user_id = %user.id, "user created");
    Ok((StatusCode::CREATED, Json(user.into())))
}

#[instrument(skip(state, payload))]
async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateUserRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    payload.validate()?;

    let mut user = User::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".into()))?;

    // A changed email must not belong to anyone else. Advisory, like
    // creation; the unique index has the final word.
    if let Some(email) = payload.email.as_deref() {
        if email != user.email {
            if let Some(other) = User::find_by_email(&state.db, email).await? {
                if other.id != user.id {
                    warn!(email, "email already in use");
                    return Err(ApiError::Conflict("Email already in use".into()));
                }
            }
        }
    }

    let password_hash = match payload.password.as_deref() {
        Some(plain) => Some(password::hash_password(plain)?),
        None => None,
    };
    service::apply_update(&mut user, payload, password_hash);

    let user = User::update(&state.db, &user).await?;
    info!(user_id = %user.id, "user updated");
    Ok(Json(user.into()))
}

#[instrument(skip(state))]
async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    if !User::exists(&state.db, id).await? {
        return Err(ApiError::NotFound("User not found".into()));
    }
    User::delete(&state.db, id).await?;
    info!(user_id = %id, "user deleted");
    Ok(StatusCode::NO_CONTENT)
}
