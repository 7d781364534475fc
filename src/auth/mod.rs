use crate::state::AppState;
use axum::Router;

mod dto;
pub mod handlers;
pub mod jwt;
pub mod password;
pub mod principal;

/// Public endpoints: registration and login.
pub fn router() -> Router<AppState> {
    handlers::auth_routes()
}

/// Current-user lookup, mounted under the protected /api subtree.
pub fn me_routes() -> Router<AppState> {
    handlers::me_routes()
}
