//! Shared fakes for form integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;

use dressup_backend::{ActorStore, StoreError};
use dressup_core::actor::ActorOptions;
use dressup_core::image::{PickedImage, ResolvedImagePayload};
use dressup_core::record::{ActorRecord, ActorWithImage, OutfitRecord, OutfitWithImage, WithImage};
use dressup_core::types::RecordId;
use dressup_form::picker::ImagePicker;
use dressup_form::{ActorForm, Navigator, Notifier};

/// One recorded `create_actor` call.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateCall {
    pub name: String,
    pub image: ResolvedImagePayload,
    pub options: ActorOptions,
}

/// In-memory store that records create calls.
///
/// With `gate` set, `create_actor` parks until the test calls
/// `release()`, which lets tests observe the form mid-submission.
#[derive(Default)]
pub struct MemoryStore {
    pub calls: Mutex<Vec<CreateCall>>,
    pub reject: bool,
    gate: Option<Arc<Notify>>,
}

impl MemoryStore {
    pub fn rejecting() -> Self {
        Self {
            reject: true,
            ..Default::default()
        }
    }

    pub fn gated() -> Self {
        Self {
            gate: Some(Arc::new(Notify::new())),
            ..Default::default()
        }
    }

    pub fn release(&self) {
        if let Some(gate) = &self.gate {
            gate.notify_one();
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl ActorStore for MemoryStore {
    async fn create_actor(
        &self,
        name: &str,
        image: &ResolvedImagePayload,
        options: &ActorOptions,
    ) -> Result<RecordId, StoreError> {
        let id = {
            let mut calls = self.calls.lock().unwrap();
            calls.push(CreateCall {
                name: name.to_string(),
                image: image.clone(),
                options: options.clone(),
            });
            format!("act_{}", calls.len())
        };

        if let Some(gate) = &self.gate {
            gate.notified().await;
        }

        if self.reject {
            return Err(StoreError::Api {
                status: 503,
                body: "service unavailable".into(),
            });
        }
        Ok(id)
    }

    async fn get_actor(&self, id: &str) -> Result<ActorWithImage, StoreError> {
        if id != "act_1" {
            return Err(StoreError::NotFound {
                entity: "Actor",
                id: id.to_string(),
            });
        }
        Ok(WithImage {
            record: ActorRecord {
                id: id.to_string(),
                name: "Jane".into(),
                image_id: "file_1".into(),
                bio: None,
                age: Some(30),
                height: None,
                weight: None,
                gender: None,
                genre: None,
                created_at: None,
            },
            image_url: "memory://file_1".into(),
        })
    }

    async fn get_outfit(&self, id: &str) -> Result<OutfitWithImage, StoreError> {
        if id != "out_1" {
            return Err(StoreError::NotFound {
                entity: "Outfit",
                id: id.to_string(),
            });
        }
        Ok(WithImage {
            record: OutfitRecord {
                id: id.to_string(),
                outfit_name: "Tropical shirt".into(),
                image_id: "file_2".into(),
                created_at: None,
            },
            image_url: "memory://file_2".into(),
        })
    }
}

#[derive(Default)]
pub struct CountingNavigator {
    backs: AtomicUsize,
}

impl CountingNavigator {
    pub fn backs(&self) -> usize {
        self.backs.load(Ordering::SeqCst)
    }
}

impl Navigator for CountingNavigator {
    fn go_back(&self) {
        self.backs.fetch_add(1, Ordering::SeqCst);
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}

/// Picker returning a fixed outcome.
pub struct StaticPicker {
    pub granted: bool,
    pub image: Option<PickedImage>,
}

#[async_trait]
impl ImagePicker for StaticPicker {
    async fn request_permission(&self) -> bool {
        self.granted
    }

    async fn pick(&self) -> Option<PickedImage> {
        self.image.clone()
    }
}

pub fn valid_image() -> PickedImage {
    PickedImage::new("file:///data/picks/IMG_0042.jpg")
        .with_size(4096)
        .with_mime_type("image/jpeg")
}

/// A form wired to the given store plus fresh recording collaborators.
pub struct Harness {
    pub form: Arc<ActorForm>,
    pub store: Arc<MemoryStore>,
    pub navigator: Arc<CountingNavigator>,
    pub notifier: Arc<RecordingNotifier>,
}

pub fn harness(store: MemoryStore) -> Harness {
    let store = Arc::new(store);
    let navigator = Arc::new(CountingNavigator::default());
    let notifier = Arc::new(RecordingNotifier::default());
    let form = Arc::new(ActorForm::new(
        store.clone(),
        navigator.clone(),
        notifier.clone(),
    ));
    Harness {
        form,
        store,
        navigator,
        notifier,
    }
}
