//! Axum adapter for failure normalization
//!
//! Handlers return [`ApiResult`]; the [`normalize_errors`] layer turns every
//! attached [`Failure`](faultline_core::Failure) into its envelope. Extractor
//! rejections, unrouted requests and panics take the same path.

#[cfg(feature = "downstream")]
mod downstream;
mod error;
mod extract;
mod fallback;
mod health;
mod middleware;
mod rejection;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use faultline_config::Config;
use faultline_core::Translator;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

#[cfg(feature = "downstream")]
pub use downstream::{DownstreamClient, DownstreamError};
pub use error::{ApiError, ApiResult};
pub use extract::{PathParam, ValidForm, ValidJson, ValidQuery};
pub use fallback::{method_not_allowed, panic_response, route_not_found};
pub use middleware::{normalize_errors, render};

/// Route every failure produced by `router` through `translator`
///
/// Adds the not-found and method-not-allowed fallbacks and catches handler
/// panics, so nothing leaves the router without an envelope.
pub fn normalize(router: Router, translator: Translator) -> Router {
    router
        .fallback(route_not_found)
        .method_not_allowed_fallback(method_not_allowed)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(axum::middleware::from_fn_with_state(Arc::new(translator), normalize_errors))
}

/// Assembled server with application routes and error normalization
pub struct Server {
    router: Router,
    listen_address: SocketAddr,
}

impl Server {
    /// Build the server around the application's routes
    pub fn new(config: &Config, routes: Router) -> Self {
        let listen_address = config
            .server
            .listen_address
            .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 8080)));

        let mut app = routes;

        // Health check
        if config.server.health.enabled {
            app = app.route(&config.server.health.path, axum::routing::get(health::health_handler));
        }

        let translator = Translator::new(config.service.error_label());
        tracing::debug!(error_label = translator.error_label(), "error normalization enabled");

        let app = normalize(app, translator).layer(TraceLayer::new_for_http());

        Self {
            router: app,
            listen_address,
        }
    }

    /// Get the configured listen address
    #[must_use]
    pub const fn listen_address(&self) -> SocketAddr {
        self.listen_address
    }

    /// Consume the server and return the inner router
    ///
    /// Useful for testing when the caller manages the listener
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Start serving requests
    ///
    /// Blocks until the cancellation token is triggered.
    ///
    /// # Errors
    ///
    /// Returns an error if binding the TCP listener or serving fails
    pub async fn serve(self, shutdown: tokio_util::sync::CancellationToken) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(self.listen_address).await?;
        let local_addr = listener.local_addr()?;
        tracing::info!(%local_addr, "server listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.cancelled().await;
                tracing::info!("graceful shutdown initiated");
            })
            .await?;

        Ok(())
    }
}
