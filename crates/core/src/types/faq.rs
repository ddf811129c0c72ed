//! FAQ entries and their block-structured answers.
//!
//! An answer is an ordered sequence of blocks. On the wire each block is
//! `{type, value}` where `value` is a string for `text`, `{url, key}` for
//! `image` and `[{url, key}]` for `image_row`. A block whose type was just
//! switched in the editor carries `value: ""` until it is filled in, so
//! decoding is lenient about mismatched values.

use serde::{Deserialize, Serialize};

use super::common::{EpochSeconds, ImageRef, PersonSnapshot};
use super::id::FaqId;
use super::status::{FaqStatus, FaqType, TargetUser};

/// Kind of an answer block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AnswerKind {
    #[default]
    Text,
    Image,
    ImageRow,
}

/// One block of an FAQ answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "WireBlock", into = "WireBlock")]
pub enum AnswerBlock {
    /// Paragraph of text.
    Text(String),
    /// A single image; `None` until one is uploaded.
    Image(Option<ImageRef>),
    /// A row of images, in upload order.
    ImageRow(Vec<ImageRef>),
}

impl Default for AnswerBlock {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

impl AnswerBlock {
    /// Text block.
    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Empty block of the given kind.
    #[must_use]
    pub const fn empty(kind: AnswerKind) -> Self {
        match kind {
            AnswerKind::Text => Self::Text(String::new()),
            AnswerKind::Image => Self::Image(None),
            AnswerKind::ImageRow => Self::ImageRow(Vec::new()),
        }
    }

    /// The block's kind.
    #[must_use]
    pub const fn kind(&self) -> AnswerKind {
        match self {
            Self::Text(_) => AnswerKind::Text,
            Self::Image(_) => AnswerKind::Image,
            Self::ImageRow(_) => AnswerKind::ImageRow,
        }
    }

    /// Store an uploaded image into this block.
    ///
    /// Image rows accumulate; every other block becomes a single image.
    pub fn attach_image(&mut self, image: ImageRef) {
        match self {
            Self::ImageRow(images) => images.push(image),
            other => *other = Self::Image(Some(image)),
        }
    }
}

#[derive(Serialize, Deserialize)]
struct WireBlock {
    #[serde(rename = "type")]
    kind: AnswerKind,
    #[serde(default)]
    value: serde_json::Value,
}

impl From<WireBlock> for AnswerBlock {
    fn from(wire: WireBlock) -> Self {
        match wire.kind {
            AnswerKind::Text => Self::Text(match wire.value {
                serde_json::Value::String(text) => text,
                _ => String::new(),
            }),
            AnswerKind::Image => Self::Image(serde_json::from_value(wire.value).ok()),
            AnswerKind::ImageRow => {
                Self::ImageRow(serde_json::from_value(wire.value).unwrap_or_default())
            }
        }
    }
}

impl From<AnswerBlock> for WireBlock {
    fn from(block: AnswerBlock) -> Self {
        let kind = block.kind();
        let value = match block {
            AnswerBlock::Text(text) => serde_json::Value::String(text),
            AnswerBlock::Image(Some(image)) => serde_json::json!({
                "url": image.url,
                "key": image.key,
            }),
            AnswerBlock::Image(None) => serde_json::Value::String(String::new()),
            AnswerBlock::ImageRow(images) => serde_json::Value::Array(
                images
                    .into_iter()
                    .map(|image| serde_json::json!({"url": image.url, "key": image.key}))
                    .collect(),
            ),
        };
        Self { kind, value }
    }
}

/// An FAQ entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Faq {
    pub id: FaqId,
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub answer: Vec<AnswerBlock>,
    #[serde(rename = "type", default)]
    pub faq_type: FaqType,
    #[serde(default)]
    pub status: FaqStatus,
    #[serde(default)]
    pub target_user: Vec<TargetUser>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<PersonSnapshot>,
    #[serde(default)]
    pub created_at: Option<EpochSeconds>,
    #[serde(default)]
    pub updated_at: Option<EpochSeconds>,
}

/// Body sent when creating or updating an FAQ.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqPayload {
    pub question: String,
    pub answer: Vec<AnswerBlock>,
    #[serde(rename = "type")]
    pub faq_type: FaqType,
    pub status: FaqStatus,
    pub target_user: Vec<TargetUser>,
}

impl From<&Faq> for FaqPayload {
    fn from(faq: &Faq) -> Self {
        Self {
            question: faq.question.clone(),
            answer: faq.answer.clone(),
            faq_type: faq.faq_type,
            status: faq.status,
            target_user: faq.target_user.clone(),
        }
    }
}

/// Result of an image upload (`{url, public_id}`).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UploadedImage {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub public_id: String,
}

impl UploadedImage {
    /// Convert to an image reference, if both fields are present.
    #[must_use]
    pub fn into_image_ref(self) -> Option<ImageRef> {
        if self.url.is_empty() || self.public_id.is_empty() {
            None
        } else {
            Some(ImageRef::new(self.url, self.public_id))
        }
    }
}
