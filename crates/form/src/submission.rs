//! Create-actor form: owns the draft and runs the submit pipeline.
//!
//! A submit runs validation, image resolution and the remote create call in
//! sequence and stops at the first failure. Every failure is turned into one
//! user-visible notification; the draft survives so the user can retry.
//!
//! ```text
//! Idle -> Validating -> ResolvingImage -> Submitting -> Done
//!   ^          |               |              |
//!   +----------+               +--> Failed <--+
//! ```
//!
//! Only `Idle` and `Failed` accept a new submit, which keeps at most one
//! submission outstanding per form.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio_util::sync::CancellationToken;

use dressup_backend::ActorStore;
use dressup_core::actor::DraftActor;
use dressup_core::types::RecordId;

use crate::error::SubmitError;
use crate::picker::ImagePicker;
use crate::{Navigator, Notifier};

/// Message shown when the host denies photo library access.
pub const PERMISSION_DENIED_MESSAGE: &str = "Permission to access photos is required!";

/// Where the form is in the submit pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitPhase {
    Idle,
    Validating,
    ResolvingImage,
    Submitting,
    Done,
    Failed,
}

impl SubmitPhase {
    fn accepts_submit(self) -> bool {
        matches!(self, Self::Idle | Self::Failed)
    }
}

struct FormState {
    draft: DraftActor,
    phase: SubmitPhase,
}

/// One create-actor form session.
///
/// Share it behind an `Arc` between the input handlers and the submit
/// button. [`ActorForm::close`] abandons any in-flight submission.
pub struct ActorForm {
    store: Arc<dyn ActorStore>,
    navigator: Arc<dyn Navigator>,
    notifier: Arc<dyn Notifier>,
    state: Mutex<FormState>,
    cancel: CancellationToken,
}

impl ActorForm {
    pub fn new(
        store: Arc<dyn ActorStore>,
        navigator: Arc<dyn Navigator>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            store,
            navigator,
            notifier,
            state: Mutex::new(FormState {
                draft: DraftActor::new(),
                phase: SubmitPhase::Idle,
            }),
            cancel: CancellationToken::new(),
        }
    }

    pub fn phase(&self) -> SubmitPhase {
        self.lock().phase
    }

    /// Snapshot of the current draft.
    pub fn draft(&self) -> DraftActor {
        self.lock().draft.clone()
    }

    /// Apply field edits to the draft.
    ///
    /// ```ignore
    /// form.edit(|d| {
    ///     d.set_name("Jane");
    ///     d.toggle_genre(Genre::Comedic);
    /// });
    /// ```
    pub fn edit<R>(&self, f: impl FnOnce(&mut DraftActor) -> R) -> R {
        f(&mut self.lock().draft)
    }

    /// Ask the host picker for an image and attach it to the draft.
    ///
    /// Returns `true` if the draft's image changed. A denied permission is
    /// reported to the user; a cancelled pick keeps the current image.
    pub async fn pick_image(&self, picker: &dyn ImagePicker) -> bool {
        if !picker.request_permission().await {
            tracing::info!("Photo library permission denied");
            self.notifier.notify(PERMISSION_DENIED_MESSAGE);
            return false;
        }

        match picker.pick().await {
            Some(picked) => {
                tracing::info!(uri = %picked.uri, "Image selected");
                self.edit(|d| d.set_image(picked));
                true
            }
            None => {
                tracing::info!("Image selection canceled");
                false
            }
        }
    }

    /// Validate the draft, upload the image and create the actor.
    ///
    /// On success the draft is cleared and the navigator is asked to go back
    /// exactly once. On failure the user is notified (except for
    /// [`SubmitError::Busy`] and [`SubmitError::Cancelled`]) and the draft
    /// is left untouched. A future dropped before it resolves leaves the
    /// form in [`SubmitPhase::Failed`], ready for another submit.
    pub async fn submit(&self) -> Result<RecordId, SubmitError> {
        if self.cancel.is_cancelled() {
            return Err(SubmitError::Cancelled);
        }

        let draft = {
            let mut state = self.lock();
            if !state.phase.accepts_submit() {
                tracing::debug!(phase = ?state.phase, "Submit ignored");
                return Err(SubmitError::Busy);
            }
            state.phase = SubmitPhase::Validating;
            state.draft.clone()
        };
        let guard = InFlight {
            form: self,
            armed: true,
        };

        let outcome = self.run_pipeline(&draft).await;
        guard.disarm();

        match outcome {
            Ok(id) => {
                {
                    let mut state = self.lock();
                    state.phase = SubmitPhase::Done;
                    state.draft = DraftActor::new();
                }
                tracing::info!(actor_id = %id, "Actor submitted");
                self.navigator.go_back();
                Ok(id)
            }
            Err(err) => {
                let phase = match err {
                    SubmitError::PrepareUpload(_) | SubmitError::Remote(_) => SubmitPhase::Failed,
                    _ => SubmitPhase::Idle,
                };
                self.set_phase(phase);

                match err.user_message() {
                    Some(message) => {
                        tracing::warn!(error = %err, "Actor submission failed");
                        self.notifier.notify(&message);
                    }
                    None => tracing::debug!(error = %err, "Actor submission stopped"),
                }
                Err(err)
            }
        }
    }

    /// User-initiated cancel: abandon any in-flight submission and leave.
    pub fn close(&self) {
        self.cancel.cancel();
        self.navigator.go_back();
    }

    async fn run_pipeline(&self, draft: &DraftActor) -> Result<RecordId, SubmitError> {
        let options = draft.options()?;

        let name = draft.trimmed_name();
        if name.is_empty() {
            return Err(SubmitError::EmptyName);
        }

        let picked = draft.image().ok_or(SubmitError::MissingImage)?;

        self.set_phase(SubmitPhase::ResolvingImage);
        let payload = dressup_core::image::resolve(picked)?;

        self.set_phase(SubmitPhase::Submitting);
        tracing::info!(name = %name, image = %payload.name, "Uploading actor");

        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => Err(SubmitError::Cancelled),
            created = self.store.create_actor(name, &payload, &options) => Ok(created?),
        }
    }

    fn set_phase(&self, phase: SubmitPhase) {
        self.lock().phase = phase;
    }

    fn lock(&self) -> MutexGuard<'_, FormState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Resets the phase if a submit future is dropped before it finishes,
/// e.g. when the host times out or aborts the task running it. The draft
/// is left as it was so the user can retry.
struct InFlight<'a> {
    form: &'a ActorForm,
    armed: bool,
}

impl InFlight<'_> {
    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let mut state = self.form.lock();
        tracing::warn!(phase = ?state.phase, "Actor submission abandoned");
        state.phase = SubmitPhase::Failed;
    }
}
