use axum::{Json, extract::State};
use wt_api_types::{Envelope, PredictionResponse};

use crate::{ApiResult, AppState, internal_error, not_found};

pub(crate) async fn random_prediction(State(state): State<AppState>) -> ApiResult<PredictionResponse> {
    let prediction = state
        .store
        .random_prediction()
        .await
        .map_err(internal_error)?
        .ok_or_else(|| not_found("No predictions found"))?;

    Ok(Json(Envelope::ok(PredictionResponse { prediction })))
}
