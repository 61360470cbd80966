use axum::{
    Json,
    extract::{Query, State, rejection::JsonRejection, rejection::QueryRejection},
};
use tracing::{debug, info};
use wt_api_types::{
    AddWishRequest, AddWishResponse, DEFAULT_RECENT_LIMIT, Envelope, RecentWishesQuery,
    RecentWishesResponse, StatsResponse, validate_wish_text,
};

use crate::{ApiResult, AppState, bad_request, internal_error};

pub(crate) const WISH_ADDED_MESSAGE: &str = "Ornament added to the tree!";
const MAX_RECENT_LIMIT: usize = 100;

pub(crate) async fn add_wish(
    State(state): State<AppState>,
    payload: Result<Json<AddWishRequest>, JsonRejection>,
) -> ApiResult<AddWishResponse> {
    let Json(request) = payload.map_err(|rejection| bad_request(&rejection.body_text()))?;
    let text = validate_wish_text(&request.text).map_err(|err| bad_request(&err.to_string()))?;

    let wish = state.store.add_wish(text).await.map_err(internal_error)?;
    info!(wish_id = ?wish.id, color = %wish.color, "wish added");

    Ok(Json(Envelope::ok(AddWishResponse {
        wish,
        message: Some(WISH_ADDED_MESSAGE.to_owned()),
    })))
}

/// An unreadable `limit` falls back to the default instead of failing the request.
pub(crate) async fn recent_wishes(
    State(state): State<AppState>,
    query: Result<Query<RecentWishesQuery>, QueryRejection>,
) -> ApiResult<RecentWishesResponse> {
    let requested = match query {
        Ok(Query(query)) => query.limit,
        Err(rejection) => {
            debug!("ignoring bad recent-wishes query: {}", rejection.body_text());
            None
        }
    };
    let limit = requested
        .unwrap_or(DEFAULT_RECENT_LIMIT)
        .clamp(1, MAX_RECENT_LIMIT);

    let wishes = state
        .store
        .recent_wishes(limit)
        .await
        .map_err(internal_error)?;

    Ok(Json(Envelope::ok(RecentWishesResponse {
        count: wishes.len(),
        wishes,
    })))
}

pub(crate) async fn stats(State(state): State<AppState>) -> ApiResult<StatsResponse> {
    let total_wishes = state.store.wish_count().await.map_err(internal_error)?;
    Ok(Json(Envelope::ok(StatsResponse { total_wishes })))
}
