use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::Value;

use crate::http::response::ApiError;
use crate::http::server::AppState;
use crate::places::PlacesQuery;

#[derive(Debug, Default, Deserialize)]
pub struct PlacesParams {
    pub destination: Option<String>,
    pub category: Option<String>,
}

pub async fn search_places(
    State(state): State<AppState>,
    params: Result<Query<PlacesParams>, QueryRejection>,
) -> Result<Json<Value>, ApiError> {
    let Query(params) = params?;
    let destination = params
        .destination
        .filter(|d| !d.trim().is_empty())
        .ok_or_else(|| ApiError::Validation("Missing required parameter 'destination'".into()))?;

    let query = PlacesQuery {
        destination,
        category: params.category,
    };
    tracing::debug!(text = %query.text(), "Places search");

    let body = state.places.search(&query).await?;
    Ok(Json(body))
}
