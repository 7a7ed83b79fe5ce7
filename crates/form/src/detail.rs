//! Detail screens: fetch one record by id and hold it for display.

use std::future::Future;

use dressup_backend::{ActorStore, StoreError};
use dressup_core::record::{ActorWithImage, OutfitWithImage};
use dressup_core::types::RecordId;

#[derive(Debug, Clone, PartialEq)]
pub enum DetailState<T> {
    /// Fetch in progress; the screen shows a spinner.
    Loading,
    Loaded(T),
    /// Fetch failed. The screen renders empty; the message is for logs.
    Failed(String),
}

/// State behind one record detail screen.
#[derive(Debug, Clone)]
pub struct DetailView<T> {
    id: RecordId,
    state: DetailState<T>,
}

impl<T> DetailView<T> {
    pub fn new(id: impl Into<RecordId>) -> Self {
        Self {
            id: id.into(),
            state: DetailState::Loading,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn state(&self) -> &DetailState<T> {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, DetailState::Loading)
    }

    pub fn record(&self) -> Option<&T> {
        match &self.state {
            DetailState::Loaded(record) => Some(record),
            _ => None,
        }
    }

    /// Run `fetch` for this view's id and store the outcome.
    ///
    /// Errors never escape; they are logged and kept as [`DetailState::Failed`].
    pub async fn load_with<F, Fut>(&mut self, fetch: F)
    where
        F: FnOnce(RecordId) -> Fut,
        Fut: Future<Output = Result<T, StoreError>>,
    {
        self.state = DetailState::Loading;
        self.state = match fetch(self.id.clone()).await {
            Ok(record) => DetailState::Loaded(record),
            Err(e) => {
                tracing::error!(id = %self.id, error = %e, "Error fetching record");
                DetailState::Failed(e.to_string())
            }
        };
    }
}

impl DetailView<ActorWithImage> {
    pub async fn load_actor(store: &dyn ActorStore, id: impl Into<RecordId>) -> Self {
        let mut view = Self::new(id);
        view.load_with(|id| async move { store.get_actor(&id).await })
            .await;
        view
    }
}

impl DetailView<OutfitWithImage> {
    pub async fn load_outfit(store: &dyn ActorStore, id: impl Into<RecordId>) -> Self {
        let mut view = Self::new(id);
        view.load_with(|id| async move { store.get_outfit(&id).await })
            .await;
        view
    }
}
