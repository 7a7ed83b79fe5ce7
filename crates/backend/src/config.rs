use validator::Validate;

/// Default HTTP request timeout in seconds.
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Backend connection settings loaded from environment variables.
#[derive(Debug, Clone, Validate)]
pub struct BackendConfig {
    /// API base URL including the version prefix, e.g. `https://cloud.appwrite.io/v1`.
    #[validate(url)]
    pub endpoint: String,
    #[validate(length(min = 1))]
    pub project_id: String,
    /// Server API key. Optional for public collections.
    pub api_key: Option<String>,
    #[validate(length(min = 1))]
    pub database_id: String,
    #[validate(length(min = 1))]
    pub actor_collection_id: String,
    #[validate(length(min = 1))]
    pub outfit_collection_id: String,
    /// Storage bucket holding actor and outfit images.
    #[validate(length(min = 1))]
    pub bucket_id: String,
    #[validate(range(min = 1))]
    pub request_timeout_secs: u64,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} environment variable is required")]
    Missing(&'static str),

    #[error("{var} is invalid: {reason}")]
    Invalid { var: &'static str, reason: String },

    #[error("Invalid backend configuration: {0}")]
    Validation(#[from] validator::ValidationErrors),
}

impl BackendConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var                         | Default |
    /// |---------------------------------|---------|
    /// | `APPWRITE_ENDPOINT`             | --      |
    /// | `APPWRITE_PROJECT_ID`           | --      |
    /// | `APPWRITE_API_KEY`              | unset   |
    /// | `APPWRITE_DATABASE_ID`          | --      |
    /// | `APPWRITE_ACTOR_COLLECTION_ID`  | --      |
    /// | `APPWRITE_OUTFIT_COLLECTION_ID` | --      |
    /// | `APPWRITE_BUCKET_ID`            | --      |
    /// | `REQUEST_TIMEOUT_SECS`          | `30`    |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |var: &'static str| -> Result<String, ConfigError> {
            lookup(var)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or(ConfigError::Missing(var))
        };

        let request_timeout_secs = match lookup("REQUEST_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
                var: "REQUEST_TIMEOUT_SECS",
                reason: format!("'{raw}' is not a whole number of seconds"),
            })?,
            None => DEFAULT_REQUEST_TIMEOUT_SECS,
        };

        let config = Self {
            endpoint: required("APPWRITE_ENDPOINT")?
                .trim_end_matches('/')
                .to_string(),
            project_id: required("APPWRITE_PROJECT_ID")?,
            api_key: lookup("APPWRITE_API_KEY").filter(|k| !k.trim().is_empty()),
            database_id: required("APPWRITE_DATABASE_ID")?,
            actor_collection_id: required("APPWRITE_ACTOR_COLLECTION_ID")?,
            outfit_collection_id: required("APPWRITE_OUTFIT_COLLECTION_ID")?,
            bucket_id: required("APPWRITE_BUCKET_ID")?,
            request_timeout_secs,
        };
        config.validate()?;
        Ok(config)
    }
}
