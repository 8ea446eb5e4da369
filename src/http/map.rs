use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::http::response::ApiError;
use crate::http::server::AppState;
use crate::samples::{filter_markers, Coordinate, MapMarker};

#[derive(Debug, Default, Deserialize)]
pub struct MapParams {
    pub location: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MapResponse {
    pub success: bool,
    pub location: String,
    pub center: Coordinate,
    pub markers: Vec<MapMarker>,
}

/// Fixed map view; `location` is echoed, `type` filters markers.
pub async fn map_data(
    State(state): State<AppState>,
    params: Result<Query<MapParams>, QueryRejection>,
) -> Result<Json<MapResponse>, ApiError> {
    let Query(params) = params?;
    let data = state.samples.map_data();
    let kind = params.kind.as_deref().filter(|k| !k.is_empty());

    Ok(Json(MapResponse {
        success: true,
        location: params
            .location
            .filter(|l| !l.trim().is_empty())
            .unwrap_or(data.location),
        center: data.center,
        markers: filter_markers(data.markers, kind),
    }))
}
