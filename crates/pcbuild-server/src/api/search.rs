use axum::{
    extract::{Path, State},
    Extension, Json,
};
use pcbuild_scraper::AggregateResponse;

use crate::middleware::RequestId;

use super::{ApiError, AppState};

/// `GET /search/{query}`: searches every retailer for `query`.
///
/// Upstream failures only shrink the product list; an error response is
/// reserved for the search itself failing to complete.
pub(super) async fn search(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(query): Path<String>,
) -> Result<Json<AggregateResponse>, ApiError> {
    state.aggregator.aggregate(&query).await.map(Json).map_err(|e| {
        tracing::error!(
            request_id = %req_id.0,
            query = %query,
            error = %e,
            "price search failed"
        );
        ApiError::internal("Failed to fetch search results", e.to_string())
    })
}
