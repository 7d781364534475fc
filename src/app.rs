use std::net::SocketAddr;

use axum::{middleware, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::auth::principal::{require_auth, resolve_principal};
use crate::state::AppState;
use crate::{auth, error, posts, users};

pub fn build_app(state: AppState) -> Router {
    // Everything under /api sits behind the authorization boundary;
    // /auth/** stays public.
    let api = Router::new()
        .merge(users::router())
        .merge(posts::router())
        .merge(auth::me_routes())
        .layer(middleware::from_fn(require_auth));

    Router::new()
        .merge(auth::router())
        .nest("/api", api)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            resolve_principal,
        ))
        .layer(middleware::from_fn(error::error_envelope))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|req: &axum::http::Request<_>| {
                    let method = req.method().clone();
                    let uri = req.uri().clone();
                    tracing::info_span!("http_request", %method, uri = %uri)
                })
                .on_response(
                    |res: &axum::http::Response<_>,
                     _latency: std::time::Duration,
                     span: &tracing::Span| {
                        let status = res.status();
                        span.record("status", tracing::field::display(status));
                        if status.is_server_error() {
                            tracing::error!(%status, "response");
                        } else {
                            tracing::info!(%status, "response");
                        }
                    },
                ),
        )
}

pub async fn serve(app: Router) -> anyhow::Result<()> {
    let addr: SocketAddr = format!(
        "{}:{}",
        std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
        std::env::var("APP_PORT").unwrap_or_else(|_| "8080".into())
    )
    .parse()?;

    tracing::info!("listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
