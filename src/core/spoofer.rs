use crate::adapters::http::{HttpSpooferApi, DEFAULT_TIMEOUT};
use crate::adapters::storage::LocalStorage;
use crate::domain::collection::{OutputFormat, ResultCollection};
use crate::domain::model::{SpoofedPossibilities, SpoofingResult};
use crate::domain::ports::{ConfigProvider, SpooferApi, Storage};
use crate::domain::query::CollectionQuery;
use crate::utils::error::{Result, SpooferError};
use crate::utils::validation::validate_file_stem;
use serde_json::Value;
use std::path::PathBuf;
use std::time::Duration;

/// Member list key of a collection page.
pub const MEMBER_KEY: &str = "hydra:member";

/// Query facade over the Spoofer API.
///
/// Every operation performs at most one request and at most one file
/// write. A transport failure surfaces as [`SpooferError::NoData`].
pub struct Spoofer<A: SpooferApi, S: Storage> {
    api: A,
    storage: S,
    timeout: Duration,
}

impl Spoofer<HttpSpooferApi, LocalStorage> {
    pub fn from_config<C: ConfigProvider>(config: &C) -> Self {
        Self::new(
            HttpSpooferApi::new(config.api_endpoint()),
            LocalStorage::new(config.output_path()),
        )
        .with_timeout(config.request_timeout())
    }
}

impl<A: SpooferApi, S: Storage> Spoofer<A, S> {
    pub fn new(api: A, storage: S) -> Self {
        Self {
            api,
            storage,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    async fn request(&self, url: String) -> Result<Value> {
        let response = self.api.get_json(&url, self.timeout).await;
        response.map_err(|source| SpooferError::NoData { url, source })
    }

    /// Fetches one raw collection page.
    pub async fn fetch_collection(&self, query: &CollectionQuery) -> Result<Value> {
        if query.items_per_page <= 0 {
            return Err(SpooferError::argument(format!(
                "Items per page must be greater than 0, got {}",
                query.items_per_page
            )));
        }

        let url = self
            .api
            .collection_url(query.items_per_page, &query.filters());
        tracing::debug!("Collection URL: {}", url);
        self.request(url).await
    }

    /// Fetches one raw session object.
    pub async fn fetch_session(&self, id: i64) -> Result<Value> {
        let url = self.api.session_url(&id.to_string());
        self.request(url).await
    }

    /// Fetches a collection page and maps every member.
    pub async fn collect(&self, query: &CollectionQuery) -> Result<ResultCollection> {
        let page = self.fetch_collection(query).await?;
        let members = page
            .get(MEMBER_KEY)
            .and_then(Value::as_array)
            .ok_or_else(|| SpooferError::MalformedResponse {
                message: format!("collection page has no '{}' list", MEMBER_KEY),
            })?;

        let collection = ResultCollection::from_members(members);
        tracing::debug!("Mapped {} sessions", collection.len());
        Ok(collection)
    }

    /// Writes one collection page to `<output dir>/<file_name>.<ext>` and
    /// returns the path written.
    pub async fn write_collection(
        &self,
        file_name: &str,
        format: OutputFormat,
        query: &CollectionQuery,
    ) -> Result<PathBuf> {
        validate_file_stem("file_name", file_name)?;

        let collection = self.collect(query).await?;
        let data = collection.to_bytes(format)?;
        let path = format!("{}.{}", file_name, format.extension());

        let written = self.storage.write_file(&path, &data).await?;
        tracing::info!(
            "Wrote {} sessions to {}",
            collection.len(),
            written.display()
        );
        Ok(written)
    }

    pub async fn session_result(&self, id: i64) -> Result<SpoofingResult> {
        let session = self.fetch_session(id).await?;
        Ok(SpoofingResult::from_response(&session))
    }

    /// `version` 4 or 6 selects one address family; 0 (and any value
    /// other than 4 or 6) returns both.
    pub async fn obtain_spoofed_possibilities(
        &self,
        id: i64,
        version: u8,
    ) -> Result<SpoofedPossibilities> {
        let result = self.session_result(id).await?;
        Ok(SpoofedPossibilities::select(result, version))
    }

    pub async fn obtain_spoofed_possibilities_ipv4(&self, id: i64) -> Result<SpoofedPossibilities> {
        self.obtain_spoofed_possibilities(id, 4).await
    }

    pub async fn obtain_spoofed_possibilities_ipv6(&self, id: i64) -> Result<SpoofedPossibilities> {
        self.obtain_spoofed_possibilities(id, 6).await
    }
}
