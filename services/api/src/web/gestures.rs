//! services/api/src/web/gestures.rs
//!
//! One-shot gesture recognition over REST.

use crate::web::dto::{EstimateRequest, EstimateResponse, GestureListResponse, GestureMatchResponse};
use crate::web::state::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use handspeak_core::gesture::HandLandmarks;
use std::sync::Arc;

/// List the names of the built-in signs.
#[utoipa::path(
    get,
    path = "/api/gestures",
    responses(
        (status = 200, description = "Recognisable sign names", body = GestureListResponse)
    )
)]
pub async fn list_gestures_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(GestureListResponse {
        gestures: state.estimator.names().map(str::to_string).collect(),
    })
}

/// Score one set of hand landmarks against the sign library.
#[utoipa::path(
    post,
    path = "/api/gestures/estimate",
    request_body = EstimateRequest,
    responses(
        (status = 200, description = "Matches at or above the threshold, best first", body = EstimateResponse),
        (status = 400, description = "Wrong landmark count or non-finite coordinate")
    )
)]
pub async fn estimate_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<EstimateRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let hand = HandLandmarks::new(&req.landmarks)
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;
    let min_confidence = req
        .min_confidence
        .unwrap_or(state.config.gesture_min_confidence);

    let estimation = state.estimator.estimate(&hand, min_confidence);
    let best = estimation.best().cloned().map(GestureMatchResponse::from);

    Ok(Json(EstimateResponse {
        gestures: estimation
            .gestures
            .into_iter()
            .map(GestureMatchResponse::from)
            .collect(),
        best,
    }))
}
