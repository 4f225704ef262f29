use std::sync::Arc;

use anyhow::Result;
use axum::serve;
use projects_readme_links::{
	config::{default_listen_addr, Config},
	readme::GitHubReadmeSource,
	server::{build_router, shutdown_signal, AppState},
};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum MainError {
	#[error("TracingInit: {source}")]
	TracingInit {
		#[source]
		source: utils_trace::TracingInitError,
	},
	#[error("TcpListenerBind: {source}")]
	TcpListenerBind {
		#[source]
		source: std::io::Error,
	},
	#[error("Serve: {source}")]
	Serve {
		#[source]
		source: std::io::Error,
	}
}

#[tokio::main]
async fn main() -> Result<(), MainError> {
	let dotenv = dotenvy::dotenv();

	utils_trace::init("info")
		.map_err(|source| MainError::TracingInit { source })?;

	if let Err(err) = dotenv {
		if !err.not_found() {
			warn!("Ignoring unreadable .env file: {err}");
		}
	}

	let config_path = Config::path_from_env();

	// Only the listen address is taken at startup; README requests reload the file.
	let listen_addr = match Config::from_file(&config_path) {
		Ok(config) => {
			if config.github_access_token.trim().is_empty() {
				warn!("github_access_token is empty in {config_path}; README requests will fail");
			}
			config.listen_addr
		}
		Err(err) => {
			warn!("Config unavailable ({err}); README requests will fail until it is fixed");
			default_listen_addr()
		}
	};

	let readme_source = GitHubReadmeSource::new(&config_path);
	info!("Reading config from {}", readme_source.config_path().display());

	let state = Arc::new(AppState::new(Arc::new(readme_source)));
	let app = build_router(state);

	let listener = tokio::net::TcpListener::bind(listen_addr)
		.await
		.map_err(|source| MainError::TcpListenerBind { source })?;

	info!("Server running on addr: {}", listen_addr);

	serve(listener, app)
		.with_graceful_shutdown(shutdown_signal())
		.await
		.map_err(|source| MainError::Serve { source })?;

	info!("Server stopped");

	Ok(())
}
