use axum::{
	Json, Router,
	extract::{Path, Query, State},
	http::StatusCode,
	response::{IntoResponse, Response},
	routing::get,
};
use serde::{Deserialize, Serialize};

use matchbook_service::{
	AdvisersForDealRequest, AdvisersForDealResponse, DealsForAdviserRequest,
	DealsForAdviserResponse, Error as ServiceError,
};

use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct LimitParams {
	pub limit: Option<u32>,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
	error_code: String,
	message: String,
}

#[derive(Debug)]
pub struct ApiError {
	status: StatusCode,
	error_code: String,
	message: String,
}
impl ApiError {
	fn new(status: StatusCode, error_code: impl Into<String>, message: impl Into<String>) -> Self {
		Self { status, error_code: error_code.into(), message: message.into() }
	}
}
impl From<ServiceError> for ApiError {
	fn from(err: ServiceError) -> Self {
		match err {
			ServiceError::InvalidRequest { message } =>
				Self::new(StatusCode::BAD_REQUEST, "invalid_request", message),
			ServiceError::Storage { message } => {
				tracing::error!(error = %message, "Query failed.");

				Self::new(StatusCode::INTERNAL_SERVER_ERROR, "storage_error", message)
			},
			ServiceError::Source(err) =>
				Self::new(StatusCode::INTERNAL_SERVER_ERROR, "source_error", err.to_string()),
		}
	}
}
impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let body = ErrorBody { error_code: self.error_code, message: self.message };

		(self.status, Json(body)).into_response()
	}
}

pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(health))
		.route("/v1/deals/{deal_id}/advisers", get(advisers_for_deal))
		.route("/v1/advisers/{adviser_id}/deals", get(deals_for_adviser))
		.with_state(state)
}

async fn health() -> StatusCode {
	StatusCode::OK
}

async fn advisers_for_deal(
	State(state): State<AppState>,
	Path(deal_id): Path<String>,
	Query(params): Query<LimitParams>,
) -> Result<Json<AdvisersForDealResponse>, ApiError> {
	let response = state
		.service
		.advisers_for_deal(AdvisersForDealRequest { deal_id, limit: params.limit })
		.await?;

	Ok(Json(response))
}

async fn deals_for_adviser(
	State(state): State<AppState>,
	Path(adviser_id): Path<String>,
	Query(params): Query<LimitParams>,
) -> Result<Json<DealsForAdviserResponse>, ApiError> {
	let response = state
		.service
		.deals_for_adviser(DealsForAdviserRequest { adviser_id, limit: params.limit })
		.await?;

	Ok(Json(response))
}
