pub mod spoofer;

pub use crate::domain::collection::{OutputFormat, ResultCollection};
pub use crate::domain::model::{IpVersion, SpoofedPossibilities, SpooferRecord, SpoofingResult};
pub use crate::domain::ports::{ConfigProvider, SpooferApi, Storage};
pub use crate::domain::query::CollectionQuery;
pub use crate::utils::error::Result;
