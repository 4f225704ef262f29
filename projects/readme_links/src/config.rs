use std::{net::SocketAddr, path::Path};

use interfaces_github_readme::index::DEFAULT_API_URL;
use serde::Deserialize;
use thiserror::Error;

pub const CONFIG_PATH_ENV: &str = "README_LINKS_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "config.json";

/// Settings read from the JSON config file.
///
/// An empty access token is accepted here; the README fetch reports it.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
	#[serde(default)]
	pub github_access_token: String,
	#[serde(default = "default_repo_owner")]
	pub github_repo_owner: String,
	#[serde(default = "default_repo_name")]
	pub github_repo_name: String,
	#[serde(default = "default_api_url")]
	pub github_api_url: String,
	#[serde(default = "default_listen_addr")]
	pub listen_addr: SocketAddr,
}

fn default_repo_owner() -> String {
	"avelino".to_string()
}

fn default_repo_name() -> String {
	"awesome-go".to_string()
}

fn default_api_url() -> String {
	DEFAULT_API_URL.to_string()
}

pub fn default_listen_addr() -> SocketAddr {
	SocketAddr::from(([0, 0, 0, 0], 8080))
}

impl Config {
	pub fn from_file(path: impl AsRef<Path>) -> Result<Self, LoadConfigError> {
		let path = path.as_ref();
		let content = std::fs::read_to_string(path).map_err(|source| LoadConfigError::Read {
			path: path.display().to_string(),
			source,
		})?;

		Self::from_json(&content)
	}

	pub fn from_json(json: &str) -> Result<Self, LoadConfigError> {
		serde_json::from_str(json).map_err(|source| LoadConfigError::Parse { source })
	}

	/// Path named by `README_LINKS_CONFIG`, else `config.json`.
	pub fn path_from_env() -> String {
		std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string())
	}
}

#[derive(Debug, Error)]
pub enum LoadConfigError {
	#[error("Read {path}: {source}")]
	Read {
		path: String,
		source: std::io::Error,
	},

	#[error("Parse: {source}")]
	Parse {
		source: serde_json::Error,
	},
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::Write;

	#[test]
	fn loads_all_keys_from_file() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		write!(
			file,
			r#"{{
				"github_access_token": "ghp_test",
				"github_repo_owner": "rust-unofficial",
				"github_repo_name": "awesome-rust",
				"github_api_url": "http://127.0.0.1:9999",
				"listen_addr": "127.0.0.1:3000"
			}}"#
		)
		.unwrap();

		let config = Config::from_file(file.path()).unwrap();

		assert_eq!(config.github_access_token, "ghp_test");
		assert_eq!(config.github_repo_owner, "rust-unofficial");
		assert_eq!(config.github_repo_name, "awesome-rust");
		assert_eq!(config.github_api_url, "http://127.0.0.1:9999");
		assert_eq!(config.listen_addr, "127.0.0.1:3000".parse().unwrap());
	}

	#[test]
	fn missing_optional_keys_fall_back_to_defaults() {
		let config = Config::from_json(r#"{"github_access_token": "t"}"#).unwrap();

		assert_eq!(config.github_repo_owner, "avelino");
		assert_eq!(config.github_repo_name, "awesome-go");
		assert_eq!(config.github_api_url, "https://api.github.com");
		assert_eq!(config.listen_addr.port(), 8080);
	}

	#[test]
	fn missing_token_is_not_a_load_error() {
		let config = Config::from_json("{}").unwrap();

		assert!(config.github_access_token.is_empty());
	}

	#[test]
	fn missing_file_is_a_read_error() {
		let dir = tempfile::tempdir().unwrap();

		let err = Config::from_file(dir.path().join("absent.json")).unwrap_err();

		assert!(matches!(err, LoadConfigError::Read { .. }));
	}

	#[test]
	fn wrong_types_are_a_parse_error() {
		let err = Config::from_json(r#"{"github_access_token": 42}"#).unwrap_err();

		assert!(matches!(err, LoadConfigError::Parse { .. }));
	}
}
