pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{http::HttpSpooferApi, storage::LocalStorage};
pub use config::SpooferConfig;
pub use core::spoofer::Spoofer;
pub use domain::collection::{OutputFormat, ResultCollection};
pub use domain::model::{IpVersion, SpoofedPossibilities, SpooferRecord, SpoofingResult};
pub use domain::query::CollectionQuery;
pub use utils::error::{Result, SpooferError, TransportError};
