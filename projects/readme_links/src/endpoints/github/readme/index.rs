use std::sync::Arc;

use axum::{
	extract::State,
	http::{header, StatusCode},
	response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

use crate::{readme::GetReadmeError, server::AppState};

#[derive(Debug, Error)]
pub enum HandlerError {
	#[error("GetReadme: {source}")]
	GetReadme {
		#[from]
		source: GetReadmeError,
	},
}

impl IntoResponse for HandlerError {
	fn into_response(self) -> Response {
		error!("Error fetching README: {self}");
		match self {
			HandlerError::GetReadme { .. } => {
				(StatusCode::INTERNAL_SERVER_ERROR, "Error fetching README").into_response()
			}
		}
	}
}

/// Axum handler: GET /readme
pub async fn handler(State(state): State<Arc<AppState>>) -> Result<Response, HandlerError> {
	let readme = state.readme_source.get_readme().await?;

	Ok((
		StatusCode::OK,
		[(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
		format!("{readme}\n"),
	)
		.into_response())
}
