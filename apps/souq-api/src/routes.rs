use axum::{
	Json, Router,
	extract::{Query, State},
	http::StatusCode,
	response::{IntoResponse, Response},
	routing::{get, post},
};
use serde::{Deserialize, Serialize};

use souq_domain::geo::Coordinate;
use souq_engine::{EngineError, FeedCursor, RefreshReport, SearchItem, SearchRequest, SortMode};

use crate::state::AppState;

pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(health))
		.route("/v1/feed/refresh", post(refresh))
		.route("/v1/feed/search", post(search))
		.route("/v1/feed/page", post(page))
		.route("/v1/history", get(history))
		.route("/v1/history/submit", post(submit_history))
		.route("/v1/geocode", get(geocode))
		.with_state(state)
}

async fn health() -> StatusCode {
	StatusCode::OK
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RefreshPayload {
	force: bool,
}

async fn refresh(
	State(state): State<AppState>,
	Json(payload): Json<RefreshPayload>,
) -> Result<Json<RefreshReport>, ApiError> {
	let report = state.engine.refresh(payload.force).await?;
	Ok(Json(report))
}

/// Search input in consumer form: a free-text place instead of a coordinate.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SearchPayload {
	query: Option<String>,
	min_price: Option<String>,
	max_price: Option<String>,
	place: Option<String>,
	radius_miles: Option<f64>,
	sort: Option<SortMode>,
}

#[derive(Debug, Serialize)]
struct PageBody {
	items: Vec<SearchItem>,
	cursor: FeedCursor,
	end_of_list: bool,
	total: usize,
	narrowed_to: Option<souq_domain::listing::SourceKind>,
	center: Option<Coordinate>,
}

async fn search(
	State(state): State<AppState>,
	Json(payload): Json<SearchPayload>,
) -> Result<Json<PageBody>, ApiError> {
	let center = match payload.place.as_deref() {
		Some(place) => state.engine.resolve_center(place).await,
		None => None,
	};
	let request = SearchRequest {
		query: payload.query,
		min_price: payload.min_price,
		max_price: payload.max_price,
		center,
		radius_miles: payload.radius_miles,
		sort: payload.sort,
	};
	let response = state.engine.search(&request)?;
	let cursor = FeedCursor::new(state.engine.cfg.pagination.initial_visible, response.len());

	Ok(Json(page_body(&response.items, cursor, response.narrowed_to, center)))
}

#[derive(Debug, Deserialize)]
struct PagePayload {
	request: SearchRequest,
	cursor: FeedCursor,
}

async fn page(
	State(state): State<AppState>,
	Json(payload): Json<PagePayload>,
) -> Result<Json<PageBody>, ApiError> {
	let response = state.engine.search(&payload.request)?;
	let mut cursor = payload.cursor;

	// The result set may have shifted since the cursor was handed out.
	if cursor.total() != response.len() {
		cursor.reset(state.engine.cfg.pagination.initial_visible, response.len());
	} else {
		cursor.advance(state.engine.cfg.pagination.increment);
	}

	Ok(Json(page_body(&response.items, cursor, response.narrowed_to, payload.request.center)))
}

fn page_body(
	items: &[SearchItem],
	cursor: FeedCursor,
	narrowed_to: Option<souq_domain::listing::SourceKind>,
	center: Option<Coordinate>,
) -> PageBody {
	PageBody {
		items: items[..cursor.visible()].to_vec(),
		end_of_list: cursor.end_of_list(),
		total: cursor.total(),
		cursor,
		narrowed_to,
		center,
	}
}

#[derive(Debug, Serialize)]
struct HistoryBody {
	terms: Vec<String>,
}

async fn history(State(state): State<AppState>) -> Json<HistoryBody> {
	Json(HistoryBody { terms: state.engine.history_terms() })
}

#[derive(Debug, Deserialize)]
struct SubmitHistoryPayload {
	term: String,
	#[serde(default)]
	radius_miles: Option<f64>,
	#[serde(default)]
	identity: Option<String>,
}

async fn submit_history(
	State(state): State<AppState>,
	Json(payload): Json<SubmitHistoryPayload>,
) -> Json<HistoryBody> {
	state.engine.submit_search_term(&payload.term, payload.radius_miles, payload.identity);
	Json(HistoryBody { terms: state.engine.history_terms() })
}

#[derive(Debug, Deserialize)]
struct GeocodeParams {
	place: String,
}

#[derive(Debug, Serialize)]
struct GeocodeBody {
	center: Option<Coordinate>,
}

async fn geocode(
	State(state): State<AppState>,
	Query(params): Query<GeocodeParams>,
) -> Json<GeocodeBody> {
	Json(GeocodeBody { center: state.engine.resolve_center(&params.place).await })
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
impl From<EngineError> for ApiError {
	fn from(err: EngineError) -> Self {
		match err {
			EngineError::InvalidRequest { message } =>
				Self::new(StatusCode::BAD_REQUEST, "invalid_request", message),
			EngineError::Source { message } =>
				Self::new(StatusCode::BAD_GATEWAY, "source_unavailable", message),
		}
	}
}
impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let body = ErrorBody { error_code: self.error_code, message: self.message };

		(self.status, Json(body)).into_response()
	}
}
