use std::net::SocketAddr;

use axum::{Router, routing::get};
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::error::panic_response;
use crate::handlers::{
    fallback::not_found,
    greeting::{greeting, greeting_world},
    health::health_check,
    metrics::metrics_handler,
};
use crate::middleware::MetricsLayer;
use crate::state::AppState;

/// Creates the application router with its full middleware stack.
pub fn create_router(state: AppState) -> Router {
    let routes = Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_handler))
        .route("/greeting", get(greeting_world))
        .route("/greeting/{name}", get(greeting))
        .fallback(not_found);

    with_middleware(routes, state)
}

/// Applies the request metrics, panic and tracing layers to `routes`.
///
/// Layers added through `Router::layer` run after routing, which is what
/// gives the metrics layer the matched route template.
pub fn with_middleware(routes: Router<AppState>, state: AppState) -> Router {
    let request_stack = ServiceBuilder::new()
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id());

    let metrics_layer = MetricsLayer::new(state.recorder().clone())
        .disable_duration_metric(state.duration_metric_disabled());

    routes
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(metrics_layer)
        .layer(request_stack)
        .with_state(state)
}

/// Runs the server with the given state.
pub async fn run_server(addr: SocketAddr, state: AppState) -> Result<(), std::io::Error> {
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
