//! Image upload route.
//!
//! Operators can replace a scraped product image before publishing: the file
//! lands under the configured upload directory and the response carries the
//! URL to reference it by. Response shapes (including the miss messages)
//! match the legacy frontend contract, which expects HTTP 200 with
//! `success: false` rather than an error status.

use std::path::Path;

use axum::{extract::Multipart, extract::State, Json};
use serde::Serialize;

use super::AppState;

#[derive(Debug, Serialize)]
pub(super) struct UploadResponse {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'static str>,
    #[serde(rename = "imageUrl", skip_serializing_if = "Option::is_none")]
    image_url: Option<String>,
}

impl UploadResponse {
    fn failure(message: &'static str) -> Self {
        Self {
            success: false,
            message: Some(message),
            image_url: None,
        }
    }

    fn success(image_url: String) -> Self {
        Self {
            success: true,
            message: None,
            image_url: Some(image_url),
        }
    }
}

/// `POST /api/v1/images` — store a multipart `image` field on disk.
pub(super) async fn upload_image(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Json<UploadResponse> {
    while let Ok(Some(field)) = multipart.next_field().await {
        if field.name() != Some("image") {
            continue;
        }

        let Some(filename) = field.file_name().map(sanitize_filename) else {
            return Json(UploadResponse::failure("No selected file"));
        };
        if filename.is_empty() {
            return Json(UploadResponse::failure("No selected file"));
        }

        let Ok(bytes) = field.bytes().await else {
            return Json(UploadResponse::failure("Upload failed"));
        };

        let dir = &state.config.upload_dir;
        if tokio::fs::create_dir_all(dir).await.is_err() {
            tracing::error!(dir = %dir.display(), "failed to create upload directory");
            return Json(UploadResponse::failure("Upload failed"));
        }

        let destination = dir.join(&filename);
        if let Err(e) = tokio::fs::write(&destination, &bytes).await {
            tracing::error!(path = %destination.display(), error = %e, "failed to store uploaded image");
            return Json(UploadResponse::failure("Upload failed"));
        }

        tracing::info!(path = %destination.display(), bytes = bytes.len(), "stored uploaded image");
        return Json(UploadResponse::success(format!(
            "/{}/{}",
            state.config.upload_dir.display(),
            filename
        )));
    }

    Json(UploadResponse::failure("No file part"))
}

/// Keeps only the final path component of a client-supplied filename, so an
/// upload cannot escape the upload directory.
fn sanitize_filename(raw: &str) -> String {
    Path::new(raw)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
