//! Create, draft-create and list endpoints.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::{
    CreateRequestBody, CreatedKey, RequestListResponse, RequestSummary,
};
use crate::validate::validate;
use crate::AppState;

/// PUT /createrequest/create - Create a fully validated request.
pub async fn create_request(
    State(state): State<AppState>,
    Json(body): Json<CreateRequestBody>,
) -> Result<(StatusCode, Json<CreatedKey>), AppError> {
    store_request(&state, body, false)
}

/// PUT /createdraftrequest/draft - Create a draft with relaxed validation.
pub async fn create_draft_request(
    State(state): State<AppState>,
    Json(body): Json<CreateRequestBody>,
) -> Result<(StatusCode, Json<CreatedKey>), AppError> {
    store_request(&state, body, true)
}

fn store_request(
    state: &AppState,
    body: CreateRequestBody,
    draft: bool,
) -> Result<(StatusCode, Json<CreatedKey>), AppError> {
    let errors = validate(&body, !draft);
    if !errors.is_empty() {
        tracing::debug!(count = errors.len(), draft, "rejecting create request");
        return Err(AppError::Validation(errors));
    }

    let record = state.store.create(body, draft);
    tracing::info!(key = %record.key, status = record.status.as_str(), "stored request");

    Ok((
        StatusCode::CREATED,
        Json(CreatedKey { key: record.key }),
    ))
}

/// Query parameters of GET /requests.
#[derive(Debug, Default, Deserialize)]
pub struct ListRequestsQuery {
    pub status: Option<String>,
    pub pkey: Option<String>,
}

/// GET /requests - List stored requests with optional filtering.
pub async fn list_requests(
    State(state): State<AppState>,
    Query(query): Query<ListRequestsQuery>,
) -> Json<RequestListResponse> {
    let requests: Vec<RequestSummary> = state
        .store
        .list(query.status.as_deref())
        .into_iter()
        .filter(|r| query.pkey.as_deref().map_or(true, |p| r.pkey == p))
        .map(|r| RequestSummary {
            key: r.key,
            summary: r.summary,
            status: r.status.as_str().to_string(),
            applicant: r.applicant,
            created_at: r.created_at,
        })
        .collect();

    let count = requests.len();
    Json(RequestListResponse { requests, count })
}
