use crate::domain::query::{build_collection_url, build_session_url};
use crate::utils::error::{Result, TransportResult};
use async_trait::async_trait;
use serde_json::Value;
use std::path::PathBuf;
use std::time::Duration;

pub trait Storage: Send + Sync {
    /// Writes `data` to `path` relative to the storage root and returns the
    /// full path written.
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<PathBuf>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn api_endpoint(&self) -> &str;
    fn output_path(&self) -> &str;
    fn timeout_seconds(&self) -> u64;

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds())
    }
}

/// Transport seam to the Spoofer sessions endpoint.
///
/// Implementations issue exactly one GET per `get_json` call and never
/// follow pagination links.
#[async_trait]
pub trait SpooferApi: Send + Sync {
    /// The sessions collection endpoint, without a trailing slash.
    fn base_url(&self) -> &str;

    async fn get_json(&self, url: &str, timeout: Duration) -> TransportResult<Value>;

    fn collection_url(&self, items_per_page: i64, filters: &[(&'static str, String)]) -> String {
        build_collection_url(self.base_url(), items_per_page, filters)
    }

    fn session_url(&self, id: &str) -> String {
        build_session_url(self.base_url(), id)
    }
}
