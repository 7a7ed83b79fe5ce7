//! REST client for the Appwrite storage and database endpoints.
//!
//! Creating an actor is two calls: upload the portrait to the storage
//! bucket, then create a document that references the uploaded file id.
//! If the document is refused, the uploaded file is deleted again.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use url::Url;

use dressup_core::actor::ActorOptions;
use dressup_core::image::ResolvedImagePayload;
use dressup_core::record::{ActorRecord, ActorWithImage, OutfitRecord, OutfitWithImage, WithImage};
use dressup_core::types::RecordId;

use crate::config::BackendConfig;
use crate::error::StoreError;
use crate::ActorStore;

const PROJECT_HEADER: &str = "X-Appwrite-Project";
const KEY_HEADER: &str = "X-Appwrite-Key";

/// Minimal view of any Appwrite resource: just its id.
#[derive(Debug, Deserialize)]
struct ResourceRef {
    #[serde(rename = "$id")]
    id: RecordId,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateDocument<'a, T> {
    document_id: &'a str,
    data: T,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ActorDocument<'a> {
    name: &'a str,
    image_id: &'a str,
    #[serde(flatten)]
    options: &'a ActorOptions,
}

/// [`ActorStore`] backed by an Appwrite project.
pub struct AppwriteStore {
    client: reqwest::Client,
    config: BackendConfig,
    /// Parsed `config.endpoint`; always usable as a base for path segments.
    base: Url,
}

impl AppwriteStore {
    /// Create a store with its own HTTP client using the configured timeout.
    pub fn new(config: BackendConfig) -> Result<Self, StoreError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Self::with_client(client, config)
    }

    /// Create a store reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, config: BackendConfig) -> Result<Self, StoreError> {
        let invalid = |reason: String| StoreError::InvalidEndpoint {
            endpoint: config.endpoint.clone(),
            reason,
        };
        let base = Url::parse(&config.endpoint).map_err(|e| invalid(e.to_string()))?;
        if base.cannot_be_a_base() {
            return Err(invalid("not a hierarchical URL".into()));
        }
        Ok(Self {
            client,
            config,
            base,
        })
    }

    /// Public view URL of a stored file.
    pub fn image_url(&self, file_id: &str) -> String {
        let bucket = self.config.bucket_id.as_str();
        let mut url = self.url(&["storage", "buckets", bucket, "files", file_id, "view"]);
        url.query_pairs_mut()
            .append_pair("project", &self.config.project_id);
        url.into()
    }

    /// Upload the image bytes to the bucket and return the new file id.
    pub async fn upload_image(&self, image: &ResolvedImagePayload) -> Result<RecordId, StoreError> {
        let bytes = self.read_source(&image.uri).await?;
        let file_id = new_id();

        tracing::debug!(
            file_id = %file_id,
            name = %image.name,
            size = image.size,
            mime = %image.mime_type,
            "Uploading image",
        );

        let part = Part::bytes(bytes)
            .file_name(image.name.clone())
            .mime_str(&image.mime_type)?;
        let form = Form::new().text("fileId", file_id).part("file", part);

        let url = self.url(&["storage", "buckets", self.config.bucket_id.as_str(), "files"]);
        let response = self.request(Method::POST, url).multipart(form).send().await?;
        let created: ResourceRef = Self::parse_response(response).await?;
        Ok(created.id)
    }

    /// Remove a stored file from the bucket.
    pub async fn delete_image(&self, file_id: &str) -> Result<(), StoreError> {
        let bucket = self.config.bucket_id.as_str();
        let url = self.url(&["storage", "buckets", bucket, "files", file_id]);
        let response = self.request(Method::DELETE, url).send().await?;
        Self::ensure_success(response).await?;
        tracing::debug!(file_id = %file_id, "Image deleted");
        Ok(())
    }

    // ---- private helpers ----

    /// Endpoint URL extended with `segments`, each percent-encoded as a
    /// single path segment.
    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let builder = self
            .client
            .request(method, url)
            .header(PROJECT_HEADER, &self.config.project_id);
        match &self.config.api_key {
            Some(key) => builder.header(KEY_HEADER, key),
            None => builder,
        }
    }

    fn documents_url(&self, collection_id: &str, document_id: Option<&str>) -> Url {
        let mut segments = vec![
            "databases",
            self.config.database_id.as_str(),
            "collections",
            collection_id,
            "documents",
        ];
        segments.extend(document_id);
        self.url(&segments)
    }

    async fn create_document<T: Serialize + Send + Sync>(
        &self,
        collection_id: &str,
        data: T,
    ) -> Result<RecordId, StoreError> {
        let document_id = new_id();
        let body = CreateDocument {
            document_id: &document_id,
            data,
        };
        let response = self
            .request(Method::POST, self.documents_url(collection_id, None))
            .json(&body)
            .send()
            .await?;
        let created: ResourceRef = Self::parse_response(response).await?;
        Ok(created.id)
    }

    async fn get_document<T: DeserializeOwned>(
        &self,
        entity: &'static str,
        collection_id: &str,
        id: &str,
    ) -> Result<T, StoreError> {
        let url = self.documents_url(collection_id, Some(id));
        let response = self.request(Method::GET, url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(StoreError::NotFound {
                entity,
                id: id.to_string(),
            });
        }
        Self::parse_response(response).await
    }

    /// Load the bytes behind an upload locator. `file://` locators are read
    /// from disk; `http(s)://` locators are downloaded.
    async fn read_source(&self, uri: &str) -> Result<Vec<u8>, StoreError> {
        let source_err = |reason: String| StoreError::Source {
            uri: uri.to_string(),
            reason,
        };
        let url = Url::parse(uri).map_err(|e| source_err(e.to_string()))?;

        match url.scheme() {
            "file" => {
                let path = url
                    .to_file_path()
                    .map_err(|_| source_err("not a local path".into()))?;
                tokio::fs::read(&path)
                    .await
                    .map_err(|e| source_err(e.to_string()))
            }
            "http" | "https" => {
                let response = self.client.get(url).send().await?;
                let response = Self::ensure_success(response).await?;
                Ok(response.bytes().await?.to_vec())
            }
            other => Err(source_err(format!("unsupported scheme '{other}'"))),
        }
    }

    /// Ensure the response has a success status code, or turn it into
    /// [`StoreError::Api`] carrying the status and body text.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, StoreError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(StoreError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    async fn parse_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, StoreError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl ActorStore for AppwriteStore {
    async fn create_actor(
        &self,
        name: &str,
        image: &ResolvedImagePayload,
        options: &ActorOptions,
    ) -> Result<RecordId, StoreError> {
        let image_id = self.upload_image(image).await?;
        let document = ActorDocument {
            name,
            image_id: &image_id,
            options,
        };
        let id = match self
            .create_document(&self.config.actor_collection_id, document)
            .await
        {
            Ok(id) => id,
            Err(err) => {
                if let Err(cleanup) = self.delete_image(&image_id).await {
                    tracing::warn!(
                        image_id = %image_id,
                        error = %cleanup,
                        "Failed to delete image of rejected actor",
                    );
                }
                return Err(err);
            }
        };
        tracing::info!(actor_id = %id, image_id = %image_id, "Actor created");
        Ok(id)
    }

    async fn get_actor(&self, id: &str) -> Result<ActorWithImage, StoreError> {
        let record: ActorRecord = self
            .get_document("Actor", &self.config.actor_collection_id, id)
            .await?;
        let image_url = self.image_url(&record.image_id);
        Ok(WithImage { record, image_url })
    }

    async fn get_outfit(&self, id: &str) -> Result<OutfitWithImage, StoreError> {
        let record: OutfitRecord = self
            .get_document("Outfit", &self.config.outfit_collection_id, id)
            .await?;
        let image_url = self.image_url(&record.image_id);
        Ok(WithImage { record, image_url })
    }
}

/// Fresh client-side id. Appwrite ids are at most 36 chars of `[a-zA-Z0-9_]`.
fn new_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}
