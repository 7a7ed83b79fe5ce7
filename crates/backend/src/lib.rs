//! Remote persistence for actors and outfits.
//!
//! [`ActorStore`] is the seam the form layer depends on; [`AppwriteStore`]
//! implements it against the Appwrite storage and database REST API.

pub mod appwrite;
pub mod config;
pub mod error;

use async_trait::async_trait;
use dressup_core::actor::ActorOptions;
use dressup_core::image::ResolvedImagePayload;
use dressup_core::record::{ActorWithImage, OutfitWithImage};
use dressup_core::types::RecordId;

pub use appwrite::AppwriteStore;
pub use config::{BackendConfig, ConfigError};
pub use error::StoreError;

/// Record-creation and record-fetch operations of the hosted backend.
#[async_trait]
pub trait ActorStore: Send + Sync {
    /// Upload the image and create an actor document referencing it.
    ///
    /// Only the populated fields of `options` are written.
    async fn create_actor(
        &self,
        name: &str,
        image: &ResolvedImagePayload,
        options: &ActorOptions,
    ) -> Result<RecordId, StoreError>;

    async fn get_actor(&self, id: &str) -> Result<ActorWithImage, StoreError>;

    async fn get_outfit(&self, id: &str) -> Result<OutfitWithImage, StoreError>;
}
