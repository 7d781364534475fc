use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::error::ApiError;
use crate::posts::{
    dto::{CreatePostRequest, PostResponse},
    repo::Post,
};
use crate::state::AppState;
use crate::users::repo::User;

pub fn post_routes() -> Router<AppState> {
    Router::new()
        .route("/posts", get(list_posts))
        .route("/posts/user/:user_id", get(posts_by_user).post(create_post))
}

#[instrument(skip(state))]
async fn list_posts(State(state): State<AppState>) -> Result<Json<Vec<PostResponse>>, ApiError> {
    let posts = Post::list(&state.db).await?;
    Ok(Json(posts.into_iter().map(PostResponse::from).collect()))
}

#[instrument(skip(state))]
async fn posts_by_user(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Vec<PostResponse>>, ApiError> {
    if !User::exists(&state.db, user_id).await? {
        return Err(ApiError::NotFound("User not found".into()));
    }
    let posts = Post::list_by_user(&state.db, user_id).await?;
    Ok(Json(posts.into_iter().map(PostResponse::from).collect()))
}

#[instrument(skip(state, payload))]
async fn create_post(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(payload): Json<CreatePostRequest>,
) -> Result<Json<PostResponse>, ApiError> {
    payload.validate()?;
    if !User::exists(&state.db, user_id).await? {
        return Err(ApiError::NotFound("User not found".into()));
    }
    let post = Post::create(&state.db, user_id, &payload.title, &payload.content).await?;
    info!(post_id = %post.id, %user_id, "post created");
    Ok(Json(post.into()))
}
