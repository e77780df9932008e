use axum::{
	Json, Router,
	extract::{Path, State},
	http::StatusCode,
	response::{IntoResponse, Response},
	routing::{get, post},
};
use serde::Serialize;

use rtsearch_domain::Ticket;
use rtsearch_service::{SearchRequest, SearchResponse};

use crate::state::AppState;

pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(health))
		.route("/api/search", post(search))
		.route("/api/ticket/{id}", get(ticket))
		.with_state(state)
}

async fn health() -> StatusCode {
	StatusCode::OK
}

async fn search(
	State(state): State<AppState>,
	Json(payload): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, ApiError> {
	let response = state
		.service
		.search(payload)
		.await
		.map_err(|err| ApiError::upstream("Failed to search tickets", &err))?;

	Ok(Json(response))
}

async fn ticket(
	State(state): State<AppState>,
	Path(ticket_id): Path<i64>,
) -> Result<Json<Ticket>, ApiError> {
	let ticket = state
		.service
		.get_ticket(ticket_id)
		.await
		.map_err(|err| ApiError::upstream("Failed to fetch ticket details", &err))?;
	let Some(ticket) = ticket else {
		return Err(ApiError::not_found(format!("Ticket with ID {ticket_id} not found")));
	};

	Ok(Json(ticket))
}

#[derive(Debug, Serialize)]
struct ErrorBody {
	status: &'static str,
	message: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	error: Option<String>,
}

#[derive(Debug)]
pub struct ApiError {
	status: StatusCode,
	message: String,
	/// Underlying cause string; never includes upstream credentials or query
	/// bodies.
	error: Option<String>,
}
impl ApiError {
	fn not_found(message: impl Into<String>) -> Self {
		Self { status: StatusCode::NOT_FOUND, message: message.into(), error: None }
	}

	fn upstream(message: impl Into<String>, err: &rtsearch_service::ServiceError) -> Self {
		Self {
			status: StatusCode::INTERNAL_SERVER_ERROR,
			message: message.into(),
			error: Some(err.to_string()),
		}
	}
}

impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let body = ErrorBody { status: "error", message: self.message, error: self.error };

		(self.status, Json(body)).into_response()
	}
}
