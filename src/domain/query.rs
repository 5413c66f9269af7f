use chrono::NaiveDate;
use url::form_urlencoded;

pub const DEFAULT_ITEMS_PER_PAGE: i64 = 5;

// Keys are stored already percent-encoded; the API matches them verbatim.
pub const ASN_KEY: &str = "asn";
pub const BEFORE_KEY: &str = "timestamp%5Bbefore%5D";
pub const STRICTLY_BEFORE_KEY: &str = "timestamp%5Bstrictly_before%5D";
pub const AFTER_KEY: &str = "timestamp%5Bafter%5D";
pub const STRICTLY_AFTER_KEY: &str = "timestamp%5Bstrictly_after%5D";

/// Parameters of one collection (`/sessions`) request.
///
/// `date_after` has no implicit value here. Callers wanting only recent
/// sessions resolve "today" themselves through [`CollectionQuery::recent`]
/// with a date of their choosing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionQuery {
    pub items_per_page: i64,
    pub asn: Option<u32>,
    pub date_before: Option<String>,
    pub date_after: Option<String>,
    pub date_strict_before: Option<String>,
    pub date_strict_after: Option<String>,
}

impl Default for CollectionQuery {
    fn default() -> Self {
        Self {
            items_per_page: DEFAULT_ITEMS_PER_PAGE,
            asn: None,
            date_before: None,
            date_after: None,
            date_strict_before: None,
            date_strict_after: None,
        }
    }
}

impl CollectionQuery {
    pub fn new(items_per_page: i64) -> Self {
        Self {
            items_per_page,
            ..Self::default()
        }
    }

    /// Query scoped to sessions on or after `today`.
    pub fn recent(items_per_page: i64, today: NaiveDate) -> Self {
        Self::new(items_per_page).after(today.format("%Y-%m-%d").to_string())
    }

    pub fn with_asn(mut self, asn: u32) -> Self {
        self.asn = Some(asn);
        self
    }

    pub fn before(mut self, date: impl Into<String>) -> Self {
        self.date_before = Some(date.into());
        self
    }

    pub fn after(mut self, date: impl Into<String>) -> Self {
        self.date_after = Some(date.into());
        self
    }

    pub fn strictly_before(mut self, date: impl Into<String>) -> Self {
        self.date_strict_before = Some(date.into());
        self
    }

    pub fn strictly_after(mut self, date: impl Into<String>) -> Self {
        self.date_strict_after = Some(date.into());
        self
    }

    /// Filters carrying a value, as `(encoded key, raw value)` pairs.
    /// Blank strings and the reserved ASN 0 count as unset.
    pub fn filters(&self) -> Vec<(&'static str, String)> {
        let dates = [
            (BEFORE_KEY, &self.date_before),
            (STRICTLY_BEFORE_KEY, &self.date_strict_before),
            (AFTER_KEY, &self.date_after),
            (STRICTLY_AFTER_KEY, &self.date_strict_after),
        ];

        self.asn
            .filter(|asn| *asn != 0)
            .map(|asn| (ASN_KEY, asn.to_string()))
            .into_iter()
            .chain(dates.into_iter().filter_map(|(key, value)| {
                value
                    .as_deref()
                    .filter(|v| !v.trim().is_empty())
                    .map(|v| (key, v.to_string()))
            }))
            .collect()
    }
}

/// `<base>?itemsPerPage=N` followed by every set filter.
pub fn build_collection_url(
    base_url: &str,
    items_per_page: i64,
    filters: &[(&'static str, String)],
) -> String {
    let mut url = format!("{}?itemsPerPage={}", base_url, items_per_page);
    for (key, value) in filters {
        let encoded: String = form_urlencoded::byte_serialize(value.as_bytes()).collect();
        url.push('&');
        url.push_str(key);
        url.push('=');
        url.push_str(&encoded);
    }
    url
}

pub fn build_session_url(base_url: &str, id: &str) -> String {
    format!("{}/{}", base_url, id)
}
