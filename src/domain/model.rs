use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IpVersion {
    #[serde(rename = "IPv4")]
    V4,
    #[serde(rename = "IPv6")]
    V6,
}

impl IpVersion {
    pub fn as_str(&self) -> &'static str {
        match self {
            IpVersion::V4 => "IPv4",
            IpVersion::V6 => "IPv6",
        }
    }
}

impl fmt::Display for IpVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Spoofing test outcome for one address family of a session.
///
/// Every field except `version` is optional because the service omits
/// whatever it did not measure. An absent value serializes as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpooferRecord {
    pub session: Option<i64>,
    pub country: Option<String>,
    pub timestamp: Option<String>,
    pub asn: Option<u32>,
    pub client: Option<String>,
    pub nat: Option<bool>,
    pub privatespoof: Option<String>,
    pub routedspoof: Option<String>,
    pub version: IpVersion,
}

impl SpooferRecord {
    pub const CSV_HEADER: &'static str =
        "version,session,country,timestamp,asn,client,nat,privatespoof,routedspoof";

    pub fn empty(version: IpVersion) -> Self {
        Self {
            session: None,
            country: None,
            timestamp: None,
            asn: None,
            client: None,
            nat: None,
            privatespoof: None,
            routedspoof: None,
            version,
        }
    }

    /// Cells in `CSV_HEADER` order. Absent values become empty cells.
    pub fn csv_fields(&self) -> [String; 9] {
        fn cell<T: ToString>(value: &Option<T>) -> String {
            value.as_ref().map(ToString::to_string).unwrap_or_default()
        }

        [
            self.version.to_string(),
            cell(&self.session),
            cell(&self.country),
            cell(&self.timestamp),
            cell(&self.asn),
            cell(&self.client),
            cell(&self.nat),
            cell(&self.privatespoof),
            cell(&self.routedspoof),
        ]
    }

    pub fn to_csv_row(&self) -> String {
        self.csv_fields().join(",")
    }
}

/// Both address-family results of one session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpoofingResult {
    ipv4: SpooferRecord,
    ipv6: SpooferRecord,
}

impl SpoofingResult {
    pub(crate) fn new(ipv4: SpooferRecord, ipv6: SpooferRecord) -> Self {
        debug_assert_eq!(ipv4.version, IpVersion::V4);
        debug_assert_eq!(ipv6.version, IpVersion::V6);
        Self { ipv4, ipv6 }
    }

    pub fn ipv4(&self) -> &SpooferRecord {
        &self.ipv4
    }

    pub fn ipv6(&self) -> &SpooferRecord {
        &self.ipv6
    }

    /// IPv4 row then IPv6 row, newline-terminated.
    pub fn to_csv_rows(&self) -> String {
        format!("{}\n{}\n", self.ipv4.to_csv_row(), self.ipv6.to_csv_row())
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// What a single-session lookup yields for a requested IP version.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SpoofedPossibilities {
    Both(SpoofingResult),
    Single(SpooferRecord),
}

impl SpoofedPossibilities {
    /// `4` and `6` select one family; `0` and anything else keep both.
    pub fn select(result: SpoofingResult, version: u8) -> Self {
        match version {
            4 => Self::Single(result.ipv4),
            6 => Self::Single(result.ipv6),
            0 => Self::Both(result),
            other => {
                tracing::warn!(
                    "Unrecognized IP version {}, returning both address families",
                    other
                );
                Self::Both(result)
            }
        }
    }
}
