use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::header,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use serde::Deserialize;

use crate::archive::{archive_filename, SnapshotKind};
use crate::http::response::ApiError;
use crate::http::server::AppState;
use crate::observability::metrics;

const GZIP_MIME: &str = "application/gzip";

#[derive(Debug, Default, Deserialize)]
pub struct DownloadParams {
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

/// Build a snapshot on demand and return it as an attachment.
pub async fn download(
    State(state): State<AppState>,
    params: Result<Query<DownloadParams>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(params) = params?;
    let kind: SnapshotKind = params
        .kind
        .as_deref()
        .ok_or_else(|| ApiError::Validation("Missing type. Use 'source' or 'build'".into()))?
        .parse()
        .map_err(ApiError::Validation)?;

    let filename = archive_filename(&state.project_name, kind, Utc::now());
    tracing::info!(kind = %kind, filename = %filename, "Building download archive");

    let bytes = match state.archiver.archive(kind).await {
        Ok(bytes) => {
            metrics::record_archive(kind.as_str(), Some(bytes.len()));
            bytes
        }
        Err(e) => {
            metrics::record_archive(kind.as_str(), None);
            tracing::error!(kind = %kind, error = %e, "Archive failed");
            return Err(e.into());
        }
    };

    let headers = [
        (header::CONTENT_TYPE, GZIP_MIME.to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", filename),
        ),
        (header::CONTENT_LENGTH, bytes.len().to_string()),
    ];
    Ok((headers, bytes).into_response())
}
