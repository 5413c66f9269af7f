use crate::domain::model::{SpooferRecord, SpoofingResult};
use crate::utils::error::{Result, SpooferError};
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Csv,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
        }
    }
}

/// Ordered, append-only set of session results from one collection query.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ResultCollection {
    results: Vec<SpoofingResult>,
}

impl ResultCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Maps every element of a collection page's member list.
    pub fn from_members(members: &[Value]) -> Self {
        Self {
            results: members.iter().map(SpoofingResult::from_response).collect(),
        }
    }

    pub fn add(&mut self, result: SpoofingResult) {
        self.results.push(result);
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SpoofingResult> {
        self.results.iter()
    }

    pub fn to_json_bytes(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }

    /// One header line, then an IPv4 and an IPv6 row per result. Cells are
    /// written unquoted; the service only emits simple tokens.
    pub fn to_csv_bytes(&self) -> Result<Vec<u8>> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .quote_style(csv::QuoteStyle::Never)
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(Vec::new());

        writer.write_record(SpooferRecord::CSV_HEADER.split(','))?;
        for result in &self.results {
            writer.write_record(&result.ipv4().csv_fields())?;
            writer.write_record(&result.ipv6().csv_fields())?;
        }

        writer
            .into_inner()
            .map_err(|e| SpooferError::Io(e.into_error()))
    }

    pub fn to_bytes(&self, format: OutputFormat) -> Result<Vec<u8>> {
        match format {
            OutputFormat::Json => self.to_json_bytes(),
            OutputFormat::Csv => self.to_csv_bytes(),
        }
    }
}

impl<'a> IntoIterator for &'a ResultCollection {
    type Item = &'a SpoofingResult;
    type IntoIter = std::slice::Iter<'a, SpoofingResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn session(id: i64, nat4: Option<bool>) -> Value {
        let mut value = json!({
            "session": id,
            "country": "usa",
            "timestamp": "2024-03-01T00:00:00+00:00",
            "asn4": 7018,
            "client4": "12.0.0.0/24",
            "privatespoof": "blocked",
            "routedspoof": "blocked",
            "privatespoof6": "unknown",
            "routedspoof6": "unknown"
        });
        if let Some(nat) = nat4 {
            value["nat4"] = json!(nat);
        }
        value
    }

    #[test]
    fn test_empty_collection_csv_is_header_only() {
        let csv = String::from_utf8(ResultCollection::new().to_csv_bytes().unwrap()).unwrap();
        assert_eq!(csv, format!("{}\n", SpooferRecord::CSV_HEADER));
    }

    #[test]
    fn test_csv_has_two_rows_per_result_in_order() {
        let members = vec![session(1, Some(true)), session(2, None), session(3, Some(false))];
        let collection = ResultCollection::from_members(&members);
        let csv = String::from_utf8(collection.to_csv_bytes().unwrap()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 1 + 2 * members.len());
        assert_eq!(
            lines[0],
            "version,session,country,timestamp,asn,client,nat,privatespoof,routedspoof"
        );
        assert_eq!(
            lines[1],
            "IPv4,1,usa,2024-03-01T00:00:00+00:00,7018,12.0.0.0/24,true,blocked,blocked"
        );
        assert_eq!(lines[2], "IPv6,1,usa,2024-03-01T00:00:00+00:00,,,,unknown,unknown");
        assert!(lines[3].starts_with("IPv4,2,"));
        assert!(lines[4].starts_with("IPv6,2,"));
        assert!(lines[5].starts_with("IPv4,3,"));
        assert!(lines[6].starts_with("IPv6,3,"));
        assert_eq!(lines[3].split(',').nth(6), Some(""));
    }

    #[test]
    fn test_json_is_single_array_document() {
        let collection = ResultCollection::from_members(&[session(10, Some(true)), session(11, None)]);
        let parsed: Value = serde_json::from_slice(&collection.to_json_bytes().unwrap()).unwrap();

        let array = parsed.as_array().unwrap();
        assert_eq!(array.len(), 2);
        assert_eq!(array[0]["ipv4"]["session"], 10);
        assert_eq!(array[0]["ipv4"]["nat"], true);
        assert!(array[1]["ipv4"]["nat"].is_null());
        assert_eq!(array[1]["ipv6"]["version"], "IPv6");
    }

    #[test]
    fn test_add_preserves_insertion_order() {
        let mut collection = ResultCollection::new();
        for id in [30, 10, 20] {
            collection.add(SpoofingResult::from_response(&session(id, None)));
        }
        let ids: Vec<Option<i64>> = collection.iter().map(|r| r.ipv4().session).collect();
        assert_eq!(ids, vec![Some(30), Some(10), Some(20)]);
        assert_eq!(collection.len(), 3);
    }

    #[test]
    fn test_per_result_rows_match_collection_rows() {
        let result = SpoofingResult::from_response(&session(5, Some(false)));
        let mut collection = ResultCollection::new();
        collection.add(result.clone());

        let csv = String::from_utf8(collection.to_csv_bytes().unwrap()).unwrap();
        let body = csv.split_once('\n').unwrap().1;
        assert_eq!(body, result.to_csv_rows());
    }
}
