//! FAQ management routes.
//!
//! The editor draft lives in the page controller; these routes open,
//! edit, upload into and submit it.

use axum::{
    Json,
    extract::{Multipart, Path},
};
use flashfood_admin_core::FaqId;
use tracing::instrument;

use super::PageBody;
use crate::api::ImageUpload;
use crate::error::AppError;
use crate::middleware::RequireSession;
use crate::pages::FaqsView;
use crate::pages::faqs::DraftUpdate;

/// Multipart field carrying the image.
const UPLOAD_FIELD: &str = "file";

/// GET /faqs
#[instrument(skip_all)]
pub async fn index(RequireSession(dashboard): RequireSession) -> Json<FaqsView> {
    Json(dashboard.faqs.snapshot().await)
}

/// POST /faqs/page
#[instrument(skip(dashboard))]
pub async fn page(
    RequireSession(dashboard): RequireSession,
    Json(body): Json<PageBody>,
) -> Json<FaqsView> {
    dashboard.faqs.go_to_page(body.page).await;
    Json(dashboard.faqs.snapshot().await)
}

/// POST /faqs/draft
#[instrument(skip_all)]
pub async fn open_add(RequireSession(dashboard): RequireSession) -> Json<FaqsView> {
    dashboard.faqs.open_add().await;
    Json(dashboard.faqs.snapshot().await)
}

/// POST /faqs/{id}/draft
///
/// # Errors
///
/// Returns `AppError::BadRequest` if the FAQ is not on the current page.
#[instrument(skip(dashboard))]
pub async fn open_edit(
    RequireSession(dashboard): RequireSession,
    Path(id): Path<FaqId>,
) -> Result<Json<FaqsView>, AppError> {
    dashboard.faqs.open_edit(&id).await?;
    Ok(Json(dashboard.faqs.snapshot().await))
}

/// PUT /faqs/draft
///
/// # Errors
///
/// Returns `AppError::Conflict` if no draft is open.
#[instrument(skip_all)]
pub async fn update(
    RequireSession(dashboard): RequireSession,
    Json(update): Json<DraftUpdate>,
) -> Result<Json<FaqsView>, AppError> {
    dashboard.faqs.update_draft(update).await?;
    Ok(Json(dashboard.faqs.snapshot().await))
}

/// POST /faqs/draft/latest
///
/// # Errors
///
/// Returns `AppError::Conflict` if no draft is open, or
/// `AppError::BadRequest` if the draft edits an existing FAQ.
#[instrument(skip_all)]
pub async fn apply_latest(
    RequireSession(dashboard): RequireSession,
) -> Result<Json<FaqsView>, AppError> {
    dashboard.faqs.apply_latest().await?;
    Ok(Json(dashboard.faqs.snapshot().await))
}

/// POST /faqs/draft/answers/{index}/image
///
/// # Errors
///
/// Returns `AppError::BadRequest` if the form has no `file` field or the
/// block does not exist, or the backend error if the upload fails.
#[instrument(skip(dashboard, multipart))]
pub async fn upload_image(
    RequireSession(dashboard): RequireSession,
    Path(index): Path<usize>,
    mut multipart: Multipart,
) -> Result<Json<FaqsView>, AppError> {
    let upload = read_upload(&mut multipart).await?;
    tracing::info!(file_name = %upload.file_name, size = upload.bytes.len(), "Uploading FAQ image");
    dashboard.faqs.upload_image(index, upload).await?;
    Ok(Json(dashboard.faqs.snapshot().await))
}

/// POST /faqs/draft/submit
///
/// # Errors
///
/// Returns `AppError::BadRequest` for a blank question, `AppError::Conflict`
/// if no draft is open, or the backend error if saving fails.
#[instrument(skip_all)]
pub async fn submit(RequireSession(dashboard): RequireSession) -> Result<Json<FaqsView>, AppError> {
    dashboard.faqs.submit().await?;
    Ok(Json(dashboard.faqs.snapshot().await))
}

/// DELETE /faqs/draft
#[instrument(skip_all)]
pub async fn close(RequireSession(dashboard): RequireSession) -> Json<FaqsView> {
    dashboard.faqs.close_draft().await;
    Json(dashboard.faqs.snapshot().await)
}

/// DELETE /faqs/toasts/{id}
#[instrument(skip(dashboard))]
pub async fn dismiss_toast(
    RequireSession(dashboard): RequireSession,
    Path(id): Path<u64>,
) -> Json<FaqsView> {
    dashboard.faqs.dismiss_toast(id).await;
    Json(dashboard.faqs.snapshot().await)
}

async fn read_upload(multipart: &mut Multipart) -> Result<ImageUpload, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.body_text()))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        let file_name = field.file_name().unwrap_or("upload").to_string();
        let content_type = field.content_type().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;
        if bytes.is_empty() {
            return Err(AppError::BadRequest("Uploaded file is empty".to_string()));
        }
        return Ok(ImageUpload {
            file_name,
            content_type,
            bytes: bytes.to_vec(),
        });
    }
    Err(AppError::BadRequest(format!(
        "Missing multipart field '{UPLOAD_FIELD}'"
    )))
}
