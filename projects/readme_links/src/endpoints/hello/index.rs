use axum::{
	http::{header, StatusCode},
	response::IntoResponse,
};

/// Axum handler: GET /hello
pub async fn handler() -> impl IntoResponse {
	(
		StatusCode::OK,
		[(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
		"Hello world!\n",
	)
}
