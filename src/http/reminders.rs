//! Reminder listing and (non-persistent) reminder actions.

use axum::{
    body::Bytes,
    extract::{
        rejection::{BytesRejection, QueryRejection},
        Query, State,
    },
    Json,
};
use serde::{Deserialize, Serialize};

use crate::http::response::ApiError;
use crate::http::server::AppState;
use crate::samples::{filter_reminders, ReminderAction, ReminderRecord};

#[derive(Debug, Default, Deserialize)]
pub struct ReminderParams {
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RemindersResponse {
    pub success: bool,
    pub reminders: Vec<ReminderRecord>,
    pub total: usize,
}

pub async fn list_reminders(
    State(state): State<AppState>,
    params: Result<Query<ReminderParams>, QueryRejection>,
) -> Result<Json<RemindersResponse>, ApiError> {
    let Query(params) = params?;
    let kind = params.kind.as_deref().filter(|k| !k.is_empty());
    let reminders = filter_reminders(state.samples.reminders(), kind);

    Ok(Json(RemindersResponse {
        success: true,
        total: reminders.len(),
        reminders,
    }))
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderActionRequest {
    pub reminder_id: Option<String>,
    pub action: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderActionResponse {
    pub success: bool,
    pub message: String,
    pub reminder_id: String,
}

/// Acknowledge an action. Nothing is stored; the fixture is unchanged.
pub async fn update_reminder(
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<ReminderActionResponse>, ApiError> {
    let body = body?;
    let request: ReminderActionRequest = serde_json::from_slice(&body)
        .map_err(|e| ApiError::Validation(format!("Invalid JSON body: {}", e)))?;

    let (reminder_id, action) = match (
        request.reminder_id.filter(|s| !s.is_empty()),
        request.action.filter(|s| !s.is_empty()),
    ) {
        (Some(id), Some(action)) => (id, action),
        _ => {
            return Err(ApiError::Validation(
                "Missing required fields: reminderId and action".into(),
            ))
        }
    };

    let action: ReminderAction = action.parse().map_err(ApiError::Validation)?;
    tracing::info!(reminder_id = %reminder_id, action = %action, "Reminder action acknowledged");

    Ok(Json(ReminderActionResponse {
        success: true,
        message: action.message().to_string(),
        reminder_id,
    }))
}
