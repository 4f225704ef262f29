use std::path::PathBuf;

use async_trait::async_trait;
use interfaces_github_readme::index::{fetch_repo_readme, DecodeReadmeError, FetchRepoReadmeError};
use reqwest::Client;
use thiserror::Error;
use tracing::info;

use crate::config::{Config, LoadConfigError};

#[derive(Debug, Error)]
pub enum GetReadmeError {
	#[error("LoadConfig: {source}")]
	LoadConfig {
		#[from]
		source: LoadConfigError,
	},
	#[error("FetchRepoReadme: {source}")]
	FetchRepoReadme {
		#[from]
		source: FetchRepoReadmeError,
	},
	#[error("DecodeReadme: {source}")]
	DecodeReadme {
		#[from]
		source: DecodeReadmeError,
	},
}

/// Anything able to hand back the README text the endpoints work on.
#[async_trait]
pub trait ReadmeSource: Send + Sync {
	async fn get_readme(&self) -> Result<String, GetReadmeError>;
}

/// Reads the README of the configured repository through the GitHub API.
///
/// The config file is read again on every call, so a token or repository
/// change applies to the next request.
#[derive(Debug, Clone)]
pub struct GitHubReadmeSource {
	client: Client,
	config_path: PathBuf,
}

impl GitHubReadmeSource {
	pub fn new(config_path: impl Into<PathBuf>) -> Self {
		Self::with_client(Client::new(), config_path)
	}

	pub fn with_client(client: Client, config_path: impl Into<PathBuf>) -> Self {
		Self {
			client,
			config_path: config_path.into(),
		}
	}

	pub fn config_path(&self) -> &PathBuf {
		&self.config_path
	}
}

#[async_trait]
impl ReadmeSource for GitHubReadmeSource {
	async fn get_readme(&self) -> Result<String, GetReadmeError> {
		let config = Config::from_file(&self.config_path)?;

		info!(
			owner = %config.github_repo_owner,
			name = %config.github_repo_name,
			"Fetching README"
		);

		let readme = fetch_repo_readme(
			&self.client,
			&config.github_api_url,
			&config.github_access_token,
			&config.github_repo_owner,
			&config.github_repo_name,
		)
		.await?;

		if let Some(html_url) = &readme.html_url {
			info!(%html_url, "Fetched README");
		}

		Ok(readme.decoded_content()?)
	}
}
