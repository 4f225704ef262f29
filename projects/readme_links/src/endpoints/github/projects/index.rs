use std::sync::Arc;

use axum::{
	extract::{rejection::QueryRejection, Query, State},
	http::{header, StatusCode},
	response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::{debug, error, warn};

use crate::{
	readme::GetReadmeError,
	server::AppState,
	utils::projects::{extract_projects, filter_projects_by_name, jsonify_projects, trim_name_query},
};

#[derive(Debug, Error)]
pub enum HandlerError {
	#[error("GetReadme: {source}")]
	GetReadme {
		#[from]
		source: GetReadmeError,
	},
	#[error("EncodeJson: {source}")]
	EncodeJson {
		#[from]
		source: serde_json::Error,
	},
}

impl IntoResponse for HandlerError {
	fn into_response(self) -> Response {
		match self {
			HandlerError::GetReadme { source } => {
				error!("Error fetching README: {source}");
				(StatusCode::INTERNAL_SERVER_ERROR, "Error fetching README").into_response()
			}
			HandlerError::EncodeJson { source } => {
				error!("Error encoding JSON: {source}");
				(StatusCode::INTERNAL_SERVER_ERROR, "Error encoding JSON").into_response()
			}
		}
	}
}

/// First `name` value of the query string, empty when absent.
fn first_name_param(pairs: &[(String, String)]) -> &str {
	pairs
		.iter()
		.find(|(key, _)| key == "name")
		.map(|(_, value)| value.as_str())
		.unwrap_or_default()
}

/// Axum handler: GET /projects?name=<q>
pub async fn handler(
	State(state): State<Arc<AppState>>,
	query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Response, HandlerError> {
	let pairs = query.map(|Query(pairs)| pairs).unwrap_or_else(|rejection| {
		warn!("Ignoring unreadable query string: {rejection}");
		Vec::new()
	});

	let readme = state.readme_source.get_readme().await?;

	let projects = extract_projects(&readme);
	let name = trim_name_query(first_name_param(&pairs));
	let projects = filter_projects_by_name(projects, name);
	debug!(count = projects.len(), name, "Extracted projects");

	let json = jsonify_projects(&projects)?;

	Ok((
		StatusCode::OK,
		[(header::CONTENT_TYPE, "application/json")],
		json,
	)
		.into_response())
}
