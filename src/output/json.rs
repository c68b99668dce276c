//! JSON output formatting
//!
//! Every JSON document fleetop prints has the same envelope: the payload under
//! `data`, plus a `meta` block. Lists also carry their length so scripts don't
//! have to count.

use chrono::{SecondsFormat, Utc};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct JsonOutput<'a, T: ?Sized> {
    pub data: &'a T,
    pub meta: Metadata,
}

#[derive(Debug, Serialize)]
pub struct Metadata {
    /// When the document was produced (RFC 3339, UTC)
    pub generated_at: String,

    /// fleetop version that produced it
    pub version: &'static str,

    /// Number of records, for list payloads
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
}

impl Metadata {
    fn now(count: Option<usize>) -> Self {
        Self {
            generated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            version: env!("CARGO_PKG_VERSION"),
            count,
        }
    }
}

/// Pretty-print a single value in the envelope.
pub fn format_json<T: Serialize + ?Sized>(data: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&JsonOutput {
        data,
        meta: Metadata::now(None),
    })
}

/// Pretty-print a list in the envelope, recording its length.
pub fn format_json_list<T: Serialize>(items: &[T]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&JsonOutput {
        data: items,
        meta: Metadata::now(Some(items.len())),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[derive(Serialize)]
    struct Plate {
        plate: &'static str,
    }

    #[test]
    fn test_single_value_has_no_count() {
        let output = format_json(&Plate { plate: "FLT-1" }).unwrap();
        let value: Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["data"]["plate"], "FLT-1");
        assert_eq!(value["meta"]["version"], env!("CARGO_PKG_VERSION"));
        assert!(value["meta"]["generated_at"].as_str().unwrap().ends_with('Z'));
        assert!(value["meta"].get("count").is_none());
    }

    #[test]
    fn test_list_records_count() {
        let plates = [Plate { plate: "A" }, Plate { plate: "B" }];
        let value: Value = serde_json::from_str(&format_json_list(&plates).unwrap()).unwrap();

        assert_eq!(value["meta"]["count"], 2);
        assert_eq!(value["data"][1]["plate"], "B");

        let empty: [Plate; 0] = [];
        let value: Value = serde_json::from_str(&format_json_list(&empty).unwrap()).unwrap();
        assert_eq!(value["meta"]["count"], 0);
        assert_eq!(value["data"], serde_json::json!([]));
    }
}
