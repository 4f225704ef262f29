use std::sync::Arc;

use axum::{
	http::StatusCode,
	response::IntoResponse,
	routing::any,
	Router,
};
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::{
	endpoints::{
		github::{
			projects::index::handler as github_projects_handler,
			readme::index::handler as github_readme_handler,
		},
		hello::index::handler as hello_handler,
	},
	readme::ReadmeSource,
};

/// State shared read-only by every request.
pub struct AppState {
	pub readme_source: Arc<dyn ReadmeSource>,
}

impl AppState {
	pub fn new(readme_source: Arc<dyn ReadmeSource>) -> Self {
		Self { readme_source }
	}
}

/// Endpoints answer every method; only the path selects a handler.
pub fn build_router(state: Arc<AppState>) -> Router {
	Router::new()
		.route("/hello", any(hello_handler))
		.route("/readme", any(github_readme_handler))
		.route("/projects", any(github_projects_handler))
		.fallback(not_found)
		.layer(TraceLayer::new_for_http())
		.with_state(state)
}

async fn not_found() -> impl IntoResponse {
	(StatusCode::NOT_FOUND, "404 page not found\n")
}

/// Resolves on Ctrl+C, or SIGTERM on unix.
pub async fn shutdown_signal() {
	let ctrl_c = async {
		if let Err(err) = signal::ctrl_c().await {
			tracing::error!("Failed to listen for Ctrl+C: {err}");
			std::future::pending::<()>().await;
		}
	};

	#[cfg(unix)]
	let terminate = async {
		match signal::unix::signal(signal::unix::SignalKind::terminate()) {
			Ok(mut sigterm) => {
				sigterm.recv().await;
			}
			Err(err) => {
				tracing::error!("Failed to install SIGTERM handler: {err}");
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

	info!("Shutdown signal received");
}
