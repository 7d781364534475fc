use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts, Request, State},
    http::{request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use tracing::debug;
use uuid::Uuid;

use crate::auth::jwt::JwtKeys;
use crate::error::ApiError;
use crate::state::AppState;
use crate::users::repo::User;

/// Identity attached to a request once its bearer token has been resolved.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: Uuid,
    pub email: String,
}

/// Runs on every request before handler dispatch. A missing, malformed or
/// invalid token leaves the request unauthenticated; rejection happens later
/// at the authorization boundary, never here.
pub async fn resolve_principal(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Response {
    if let Some(user) = principal_for(&state, req.headers()).await {
        debug!(user_id = %user.id, email = %user.email, "principal resolved");
        req.extensions_mut().insert(user);
    }
    next.run(req).await
}

async fn principal_for(state: &AppState, headers: &HeaderMap) -> Option<CurrentUser> {
    let header = headers
        .get(axum::http::header::AUTHORIZATION)?
        .to_str()
        .ok()?;
    let token = header.strip_prefix("Bearer ")?;
    let keys = JwtKeys::from_ref(state);
    let claims = keys.verify(token).ok()?;
    // Token subject must still exist; a deleted user's token is dead weight.
    let user = User::find_by_email(&state.db, &claims.sub).await.ok()??;
    Some(CurrentUser {
        id: user.id,
        email: user.email,
    })
}

/// Authorization boundary for the protected subtree: no principal, no entry.
pub async fn require_auth(req: Request, next: Next) -> Result<Response, ApiError> {
    if req.extensions().get::<CurrentUser>().is_none() {
        return Err(ApiError::Unauthorized("Missing or invalid token".into()));
    }
    Ok(next.run(req).await)
}

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .ok_or_else(|| ApiError::Unauthorized("Missing or invalid token".into()))
    }
}
