//! Image upload endpoint.

use flashfood_admin_core::{ImageRef, UploadedImage};
use reqwest::multipart::{Form, Part};
use tracing::instrument;

use super::{ApiClient, ApiError};

/// A file to upload.
#[derive(Clone)]
pub struct ImageUpload {
    /// Original file name.
    pub file_name: String,
    /// MIME type, if known.
    pub content_type: Option<String>,
    /// File contents.
    pub bytes: Vec<u8>,
}

impl std::fmt::Debug for ImageUpload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageUpload")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

impl ApiClient {
    /// Upload one image as multipart field `file`.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails, the backend reports `EC != 0`, or
    /// the response lacks `url` or `public_id`.
    #[instrument(skip(self, upload), fields(file_name = %upload.file_name, len = upload.bytes.len()))]
    pub async fn upload_image(&self, upload: ImageUpload) -> Result<ImageRef, ApiError> {
        let mut part = Part::bytes(upload.bytes).file_name(upload.file_name);
        if let Some(content_type) = upload.content_type.as_deref() {
            part = part.mime_str(content_type)?;
        }
        let form = Form::new().part("file", part);

        let uploaded: Option<UploadedImage> = self.post_multipart("upload/image", form).await?;
        uploaded
            .and_then(UploadedImage::into_image_ref)
            .ok_or(ApiError::InvalidUpload)
    }
}
