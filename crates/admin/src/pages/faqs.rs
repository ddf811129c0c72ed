//! FAQ management page.
//!
//! Paginated FAQ table plus one editor draft at a time, either a new FAQ or
//! a copy of an existing one. The draft is edited locally; submitting sends
//! the whole payload, closes the editor and refetches the table. Submit and
//! upload outcomes are reported as toasts.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use flashfood_admin_core::{
    AnswerBlock, AnswerKind, Faq, FaqId, FaqPayload, FaqStatus, FaqType, TargetUser,
};
use futures::FutureExt;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use super::list::{FetchOutcome, PaginatedList};
use super::{PageError, PageSettings, Pagination};
use crate::api::{ApiError, DashboardApi, ImageUpload};
use crate::components::data_table::{DataTableConfig, FaqRow, faqs_table_config};

/// Most toasts kept on screen.
const TOAST_LIMIT: usize = 5;

/// Whether the draft creates or edits an FAQ.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", content = "faq_id", rename_all = "snake_case")]
pub enum DraftMode {
    Add,
    Edit(FaqId),
}

/// The FAQ being edited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FaqDraft {
    #[serde(flatten)]
    pub mode: DraftMode,
    pub question: String,
    pub answer: Vec<AnswerBlock>,
    #[serde(rename = "type")]
    pub faq_type: FaqType,
    pub status: FaqStatus,
    pub target_user: Vec<TargetUser>,
    pub submitting: bool,
}

impl FaqDraft {
    /// Blank draft for a new FAQ: one empty text block, general, active,
    /// shown to customers.
    #[must_use]
    pub fn blank() -> Self {
        Self {
            mode: DraftMode::Add,
            question: String::new(),
            answer: vec![AnswerBlock::default()],
            faq_type: FaqType::General,
            status: FaqStatus::Active,
            target_user: vec![TargetUser::Customer],
            submitting: false,
        }
    }

    /// Draft editing a copy of `faq`.
    #[must_use]
    pub fn editing(faq: &Faq) -> Self {
        Self {
            mode: DraftMode::Edit(faq.id.clone()),
            question: faq.question.clone(),
            answer: faq.answer.clone(),
            faq_type: faq.faq_type,
            status: faq.status,
            target_user: faq.target_user.clone(),
            submitting: false,
        }
    }

    /// Copy the content of `faq` into this draft, keeping its mode.
    pub fn copy_content(&mut self, faq: &Faq) {
        self.question.clone_from(&faq.question);
        self.answer.clone_from(&faq.answer);
        self.faq_type = faq.faq_type;
        self.status = faq.status;
        self.target_user.clone_from(&faq.target_user);
    }

    /// Body sent to the backend.
    #[must_use]
    pub fn payload(&self) -> FaqPayload {
        FaqPayload {
            question: self.question.clone(),
            answer: self.answer.clone(),
            faq_type: self.faq_type,
            status: self.status,
            target_user: self.target_user.clone(),
        }
    }

    fn block_mut(&mut self, index: usize) -> Result<&mut AnswerBlock, PageError> {
        self.answer
            .get_mut(index)
            .ok_or_else(|| PageError::Validation(format!("No answer row at index {index}")))
    }
}

/// Partial update of the draft; absent fields are left alone.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DraftUpdate {
    pub question: Option<String>,
    pub answer: Option<Vec<AnswerBlock>>,
    #[serde(rename = "type")]
    pub faq_type: Option<FaqType>,
    pub status: Option<FaqStatus>,
    pub target_user: Option<Vec<TargetUser>>,
}

/// Toast severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ToastKind {
    Success,
    Error,
}

/// A transient notice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub title: &'static str,
    pub description: &'static str,
}

/// Everything the FAQ page renders.
#[derive(Debug, Clone, Serialize)]
pub struct FaqsView {
    pub table: DataTableConfig,
    pub rows: Vec<FaqRow>,
    pub pagination: Pagination,
    pub loading: bool,
    pub draft: Option<FaqDraft>,
    pub toasts: Vec<Toast>,
}

/// FAQ page controller.
pub struct FaqsPage {
    api: Arc<dyn DashboardApi>,
    list: PaginatedList<Faq>,
    draft: RwLock<Option<FaqDraft>>,
    /// Bumped, under the `draft` lock, whenever the editor opens or closes.
    draft_generation: AtomicU64,
    toasts: RwLock<Vec<Toast>>,
    next_toast: AtomicU64,
}

impl FaqsPage {
    /// Create the page; rows are empty until [`load`](Self::load) runs.
    #[must_use]
    pub fn new(api: Arc<dyn DashboardApi>, settings: PageSettings) -> Self {
        let list_api = Arc::clone(&api);
        Self {
            api,
            list: PaginatedList::new("faqs", settings.page_size, move |request| {
                let api = Arc::clone(&list_api);
                async move { api.faqs_page(request).await }.boxed()
            }),
            draft: RwLock::new(None),
            draft_generation: AtomicU64::new(0),
            toasts: RwLock::new(Vec::new()),
            next_toast: AtomicU64::new(1),
        }
    }

    /// Load the current page with the loading indicator.
    pub async fn load(&self) -> FetchOutcome {
        self.list.reload().await
    }

    /// Change page.
    pub async fn go_to_page(&self, page: u32) -> FetchOutcome {
        self.list.go_to_page(page).await
    }

    /// Open the editor with a blank draft.
    pub async fn open_add(&self) {
        self.replace_draft(Some(FaqDraft::blank())).await;
    }

    /// Open the editor on a copy of an FAQ from the current page.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::Validation`] if the FAQ is not on the current page.
    pub async fn open_edit(&self, id: &FaqId) -> Result<(), PageError> {
        let faq = self
            .list
            .items()
            .await
            .into_iter()
            .find(|faq| &faq.id == id)
            .ok_or_else(|| PageError::Validation(format!("FAQ {id} is not on the current page")))?;

        self.replace_draft(Some(FaqDraft::editing(&faq))).await;
        Ok(())
    }

    /// Close the editor, discarding the draft.
    pub async fn close_draft(&self) {
        self.replace_draft(None).await;
    }

    /// Replace the given draft fields.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::NoDraft`] if the editor is closed.
    pub async fn update_draft(&self, update: DraftUpdate) -> Result<(), PageError> {
        self.with_draft(|draft| {
            if let Some(question) = update.question {
                draft.question = question;
            }
            if let Some(answer) = update.answer {
                draft.answer = answer;
            }
            if let Some(faq_type) = update.faq_type {
                draft.faq_type = faq_type;
            }
            if let Some(status) = update.status {
                draft.status = status;
            }
            if let Some(target_user) = update.target_user {
                draft.target_user = target_user;
            }
            Ok(())
        })
        .await
    }

    /// Append an empty text block.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::NoDraft`] if the editor is closed.
    pub async fn add_answer_row(&self) -> Result<(), PageError> {
        self.with_draft(|draft| {
            draft.answer.push(AnswerBlock::default());
            Ok(())
        })
        .await
    }

    /// Remove the block at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::NoDraft`] if the editor is closed, or
    /// [`PageError::Validation`] if there is no such block.
    pub async fn remove_answer_row(&self, index: usize) -> Result<(), PageError> {
        self.with_draft(|draft| {
            draft.block_mut(index)?;
            draft.answer.remove(index);
            Ok(())
        })
        .await
    }

    /// Change the kind of the block at `index`, clearing its value.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::NoDraft`] if the editor is closed, or
    /// [`PageError::Validation`] if there is no such block.
    pub async fn set_answer_kind(&self, index: usize, kind: AnswerKind) -> Result<(), PageError> {
        self.with_draft(|draft| {
            *draft.block_mut(index)? = AnswerBlock::empty(kind);
            Ok(())
        })
        .await
    }

    /// Set the text of the block at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::NoDraft`] if the editor is closed, or
    /// [`PageError::Validation`] if there is no such block.
    pub async fn set_answer_text(&self, index: usize, text: &str) -> Result<(), PageError> {
        self.with_draft(|draft| {
            *draft.block_mut(index)? = AnswerBlock::text(text);
            Ok(())
        })
        .await
    }

    /// Copy the last FAQ on the current page into a new-FAQ draft.
    ///
    /// Returns `false` when the page is empty.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::NoDraft`] if the editor is closed, or
    /// [`PageError::Validation`] if the draft edits an existing FAQ.
    pub async fn apply_latest(&self) -> Result<bool, PageError> {
        let latest = self.list.items().await.pop();
        self.with_draft(|draft| {
            if draft.mode != DraftMode::Add {
                return Err(PageError::Validation(
                    "Only a new FAQ can copy the latest entry".to_string(),
                ));
            }
            Ok(latest.as_ref().is_some_and(|faq| {
                draft.copy_content(faq);
                true
            }))
        })
        .await
    }

    /// Upload an image into the block at `index`.
    ///
    /// Image rows gain one more image; any other block becomes a single
    /// image block.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::NoDraft`] if the editor is closed,
    /// [`PageError::Validation`] if there is no such block,
    /// [`PageError::Api`] if the upload fails (an error toast is shown), or
    /// [`PageError::Superseded`] if the editor was closed or reopened while
    /// uploading (the image is not attached anywhere).
    pub async fn upload_image(&self, index: usize, upload: ImageUpload) -> Result<(), PageError> {
        let ((), generation) = self
            .with_open_draft(|draft| draft.block_mut(index).map(|_| ()))
            .await?;

        let image = match self.api.upload_image(upload).await {
            Ok(image) => image,
            Err(e) => {
                tracing::error!(index, error = %e, "Image upload failed");
                if self.is_current_draft(generation).await {
                    let description = if e.is_transport() {
                        "An unexpected error occurred during image upload."
                    } else {
                        "Image upload failed."
                    };
                    self.toast(ToastKind::Error, "Error", description).await;
                }
                return Err(e.into());
            }
        };

        self.with_draft_at(generation, |draft| {
            draft.block_mut(index)?.attach_image(image);
            Ok(())
        })
        .await
        .inspect_err(|e| tracing::warn!(index, error = %e, "Dropping uploaded image"))
    }

    /// Send the draft to the backend.
    ///
    /// On success the editor closes, a success toast is shown and the table
    /// is refetched. On failure an error toast is shown and the editor stays
    /// open.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::NoDraft`] if the editor is closed,
    /// [`PageError::Validation`] if the question is blank (nothing is sent),
    /// or [`PageError::Api`] if the backend call fails.
    ///
    /// If the editor was closed or reopened while the request was in flight,
    /// the newer editor is left alone and no toast is shown.
    pub async fn submit(&self) -> Result<(), PageError> {
        let ((mode, payload), generation) = self
            .with_open_draft(|draft| {
                if draft.question.trim().is_empty() {
                    return Err(PageError::Validation("Question is required".to_string()));
                }
                draft.submitting = true;
                Ok((draft.mode.clone(), draft.payload()))
            })
            .await?;

        let result = match &mode {
            DraftMode::Add => self.api.create_faq(&payload).await,
            DraftMode::Edit(id) => self.api.update_faq(id, &payload).await,
        };

        match result {
            Ok(()) => {
                if self.close_draft_at(generation).await {
                    let description = match mode {
                        DraftMode::Add => "FAQ created successfully.",
                        DraftMode::Edit(_) => "FAQ updated successfully.",
                    };
                    self.toast(ToastKind::Success, "Success", description).await;
                } else {
                    tracing::info!(?mode, "FAQ saved after its editor was replaced");
                }
                self.list.reload().await;
                Ok(())
            }
            Err(e) => {
                tracing::error!(?mode, error = %e, "Failed to save FAQ");
                let reopened = self
                    .with_draft_at(generation, |draft| {
                        draft.submitting = false;
                        Ok(())
                    })
                    .await
                    .is_ok();
                if reopened {
                    self.toast(ToastKind::Error, "Error", failure_description(&mode, &e))
                        .await;
                }
                Err(e.into())
            }
        }
    }

    /// Remove a toast.
    pub async fn dismiss_toast(&self, id: u64) {
        self.toasts.write().await.retain(|toast| toast.id != id);
    }

    /// Render the page.
    pub async fn snapshot(&self) -> FaqsView {
        let list = self.list.snapshot().await;
        FaqsView {
            table: faqs_table_config(),
            rows: list.items.iter().map(FaqRow::project).collect(),
            pagination: Pagination::from(&list),
            loading: list.loading,
            draft: self.draft.read().await.clone(),
            toasts: self.toasts.read().await.clone(),
        }
    }

    async fn with_draft<R>(
        &self,
        edit: impl FnOnce(&mut FaqDraft) -> Result<R, PageError>,
    ) -> Result<R, PageError> {
        self.with_open_draft(edit).await.map(|(result, _)| result)
    }

    /// Edit the open draft. Returns the edit's result and the draft's
    /// generation.
    async fn with_open_draft<R>(
        &self,
        edit: impl FnOnce(&mut FaqDraft) -> Result<R, PageError>,
    ) -> Result<(R, u64), PageError> {
        let mut guard = self.draft.write().await;
        let draft = guard.as_mut().ok_or(PageError::NoDraft)?;
        let result = edit(draft)?;
        Ok((result, self.draft_generation.load(Ordering::SeqCst)))
    }

    /// Edit the draft only if it is still the one opened as `generation`.
    async fn with_draft_at(
        &self,
        generation: u64,
        edit: impl FnOnce(&mut FaqDraft) -> Result<(), PageError>,
    ) -> Result<(), PageError> {
        let mut guard = self.draft.write().await;
        if self.draft_generation.load(Ordering::SeqCst) != generation {
            return Err(PageError::Superseded);
        }
        edit(guard.as_mut().ok_or(PageError::NoDraft)?)
    }

    async fn replace_draft(&self, draft: Option<FaqDraft>) {
        let mut guard = self.draft.write().await;
        self.draft_generation.fetch_add(1, Ordering::SeqCst);
        *guard = draft;
    }

    /// Close the editor if it is still the one opened as `generation`.
    async fn close_draft_at(&self, generation: u64) -> bool {
        let mut guard = self.draft.write().await;
        if self.draft_generation.load(Ordering::SeqCst) != generation {
            return false;
        }
        self.draft_generation.fetch_add(1, Ordering::SeqCst);
        *guard = None;
        true
    }

    async fn is_current_draft(&self, generation: u64) -> bool {
        let _guard = self.draft.read().await;
        self.draft_generation.load(Ordering::SeqCst) == generation
    }

    async fn toast(&self, kind: ToastKind, title: &'static str, description: &'static str) {
        let id = self.next_toast.fetch_add(1, Ordering::SeqCst);
        let mut toasts = self.toasts.write().await;
        toasts.push(Toast {
            id,
            kind,
            title,
            description,
        });
        let overflow = toasts.len().saturating_sub(TOAST_LIMIT);
        toasts.drain(..overflow);
    }
}

const fn failure_description(mode: &DraftMode, error: &ApiError) -> &'static str {
    if error.is_transport() {
        return "An unexpected error occurred.";
    }
    match mode {
        DraftMode::Add => "Failed to create FAQ.",
        DraftMode::Edit(_) => "Failed to update FAQ.",
    }
}

impl std::fmt::Debug for FaqsPage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FaqsPage")
            .field("list", &self.list)
            .finish_non_exhaustive()
    }
}
