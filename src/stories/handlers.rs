use super::types::{
    ErrorResponse, StoryRecord, StorySubmission, SubmitStoryResponse, UploadedImage,
};
use crate::state::AppState;
use axum::Json;
use axum::extract::multipart::{Multipart, MultipartError};
use axum::extract::Extension;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Redirect, Response};
use std::sync::Arc;

/// Destination for browsers that posted the plain HTML form.
const THANK_YOU_PAGE: &str = "/thank-you.html";

pub async fn handle_submit_story(
    Extension(state): Extension<Arc<AppState>>,
    headers: HeaderMap,
    multipart: Multipart,
) -> Response {
    let mut submission = match collect_fields(multipart).await {
        Ok(submission) => submission,
        Err(e) => {
            tracing::warn!("Malformed story upload: {}", e);
            return error_response(StatusCode::BAD_REQUEST, "Malformed form upload");
        }
    };

    let missing = submission.missing_fields();
    if !missing.is_empty() {
        return error_response(
            StatusCode::BAD_REQUEST,
            &format!("Missing required fields: {}", missing.join(", ")),
        );
    }

    // Attachment first: the record only ever references bytes already on disk.
    let image = match submission.image.take() {
        Some(upload) => {
            match state
                .attachments
                .save(&upload.original_name, &upload.bytes)
                .await
            {
                Ok(stored) => Some(format!("/uploads/{}", stored)),
                Err(e) => {
                    tracing::error!("Error saving photo: {}", e);
                    return error_response(StatusCode::INTERNAL_SERVER_ERROR, "Error saving story");
                }
            }
        }
        None => None,
    };

    let record = submission.into_record(image);
    let filename = state.stories.filename_for(&record.name);
    if let Err(e) = state.stories.write(&filename, &record).await {
        tracing::error!("Error saving story: {}", e);
        return error_response(StatusCode::INTERNAL_SERVER_ERROR, "Error saving story");
    }

    tracing::info!("Story saved: {}", filename);

    if accepts_json(&headers) {
        Json(SubmitStoryResponse {
            message: "Story submitted successfully".to_string(),
        })
        .into_response()
    } else {
        Redirect::to(THANK_YOU_PAGE).into_response()
    }
}

pub async fn handle_list_stories(Extension(state): Extension<Arc<AppState>>) -> Response {
    match state.stories.read_all::<StoryRecord>().await {
        Ok(records) => (StatusCode::OK, Json(records)).into_response(),
        Err(e) => {
            tracing::error!("Failed to read stories: {}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to read stories")
        }
    }
}

/// Drains the multipart stream into plain fields. The photo part may arrive
/// under either `image` or `photo`; both frontends exist in the wild. An
/// empty file part counts as no photo.
async fn collect_fields(mut multipart: Multipart) -> Result<StorySubmission, MultipartError> {
    let mut submission = StorySubmission::default();

    while let Some(field) = multipart.next_field().await? {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        match name.as_str() {
            "image" | "photo" => {
                let original_name = field.file_name().unwrap_or("upload").to_string();
                let bytes = field.bytes().await?;
                if !bytes.is_empty() {
                    submission.image = Some(UploadedImage {
                        original_name,
                        bytes,
                    });
                }
            }
            "name" => submission.name = Some(field.text().await?),
            "email" => submission.email = Some(field.text().await?),
            "city" => submission.city = Some(field.text().await?),
            "country" => submission.country = Some(field.text().await?),
            "story" => submission.story = Some(field.text().await?),
            _ => {}
        }
    }

    Ok(submission)
}

/// A caller that declares `application/json` acceptable gets the machine
/// payload; everyone else (plain form posts) gets the redirect.
pub(crate) fn accepts_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|value| value.to_str().ok())
        .map_or(false, |value| value.contains("application/json"))
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
