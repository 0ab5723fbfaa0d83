//! HTTP front door: routes, handlers and the serve loop.

use std::future::Future;
use std::io;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use stockticker_lib::StockController;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use crate::{metrics, view};

#[derive(Clone)]
pub struct AppState {
    controller: Arc<StockController>,
}

impl AppState {
    pub fn new(controller: StockController) -> Self {
        Self {
            controller: Arc::new(controller),
        }
    }
}

pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route("/liveness", get(liveness))
        .route("/readiness", get(readiness));

    Router::new()
        .route("/", get(stock))
        .route("/metrics", get(prometheus))
        .nest("/api/v1", api)
        .with_state(state)
}

async fn stock(State(state): State<AppState>) -> (StatusCode, Html<String>) {
    match state.controller.stock().await {
        Ok(view) => (
            StatusCode::OK,
            Html(view::render_stock(state.controller.symbol(), &view)),
        ),
        Err(e) => {
            tracing::error!("Failed to retrieve stock data: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, Html(view::render_error()))
        }
    }
}

async fn liveness() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

// Cache connectivity is not checked.
async fn readiness() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn prometheus(State(state): State<AppState>) -> impl IntoResponse {
    let body = metrics::render(&state.controller.metrics().snapshot());
    ([(header::CONTENT_TYPE, metrics::CONTENT_TYPE)], body)
}

/// Serves `app` until `shutdown` resolves, then drains in-flight requests for
/// at most `drain`.
pub async fn serve<F>(
    listener: TcpListener,
    app: Router,
    shutdown: F,
    drain: Duration,
) -> io::Result<()>
where
    F: Future<Output = ()> + Send,
{
    let (stop_tx, stop_rx) = oneshot::channel::<()>();
    let mut server = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = stop_rx.await;
            })
            .await
    });

    tokio::select! {
        result = &mut server => return result.map_err(io::Error::other)?,
        _ = shutdown => {}
    }

    tracing::info!("Shutting down HTTP server");
    let _ = stop_tx.send(());

    match tokio::time::timeout(drain, server).await {
        Ok(result) => result.map_err(io::Error::other)?,
        Err(_) => {
            tracing::warn!(
                "Failed to gracefully shut down server: requests still running after {:?}",
                drain
            );
            Ok(())
        }
    }
}
