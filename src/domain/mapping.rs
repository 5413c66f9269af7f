use crate::domain::model::{IpVersion, SpooferRecord, SpoofingResult};
use serde_json::Value;

/// Response keys that differ between the two address families.
struct FamilyKeys {
    version: IpVersion,
    asn: &'static str,
    client: &'static str,
    nat: &'static str,
    privatespoof: &'static str,
    routedspoof: &'static str,
}

const IPV4_KEYS: FamilyKeys = FamilyKeys {
    version: IpVersion::V4,
    asn: "asn4",
    client: "client4",
    nat: "nat4",
    privatespoof: "privatespoof",
    routedspoof: "routedspoof",
};

const IPV6_KEYS: FamilyKeys = FamilyKeys {
    version: IpVersion::V6,
    asn: "asn6",
    client: "client6",
    nat: "nat6",
    privatespoof: "privatespoof6",
    routedspoof: "routedspoof6",
};

fn string_field(response: &Value, key: &str) -> Option<String> {
    response.get(key).and_then(Value::as_str).map(str::to_string)
}

impl SpoofingResult {
    /// Maps one raw session object into its IPv4/IPv6 pair.
    ///
    /// Missing keys, `null`s and values of an unexpected JSON type all map
    /// to `None`; this never fails.
    pub fn from_response(response: &Value) -> Self {
        let session = response.get("session").and_then(Value::as_i64);
        let country = string_field(response, "country");
        let timestamp = string_field(response, "timestamp");

        let family = |keys: &FamilyKeys| SpooferRecord {
            session,
            country: country.clone(),
            timestamp: timestamp.clone(),
            asn: response
                .get(keys.asn)
                .and_then(Value::as_u64)
                .and_then(|asn| u32::try_from(asn).ok()),
            client: string_field(response, keys.client),
            nat: response.get(keys.nat).and_then(Value::as_bool),
            privatespoof: string_field(response, keys.privatespoof),
            routedspoof: string_field(response, keys.routedspoof),
            version: keys.version,
        };

        SpoofingResult::new(family(&IPV4_KEYS), family(&IPV6_KEYS))
    }
}
