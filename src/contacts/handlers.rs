use super::types::{ContactResponse, ContactSubmission, ErrorResponse};
use crate::notify::mailer;
use crate::state::AppState;
use axum::Json;
use axum::extract::Extension;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use std::sync::Arc;

pub async fn handle_submit_contact(
    Extension(state): Extension<Arc<AppState>>,
    Json(submission): Json<ContactSubmission>,
) -> Response {
    let missing = submission.missing_fields();
    if !missing.is_empty() {
        return error_response(
            StatusCode::BAD_REQUEST,
            &format!("Missing required fields: {}", missing.join(", ")),
        );
    }

    let record = submission.into_record();
    let filename = state.contacts.filename_for(&record.name);
    if let Err(e) = state.contacts.write(&filename, &record).await {
        tracing::error!("Contact form error: {}", e);
        return error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Server error while submitting contact",
        );
    }

    tracing::info!("Contact form submitted: {}", filename);

    // The send never gates the response; its outcome is logged only.
    if let Some(transport) = state.mailer.clone() {
        mailer::spawn_confirmation(transport, record);
    } else {
        tracing::warn!(
            "SMTP not configured; skipping confirmation email for {}",
            record.email
        );
    }

    (StatusCode::OK, Json(ContactResponse { success: true })).into_response()
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
        .into_response()
}
