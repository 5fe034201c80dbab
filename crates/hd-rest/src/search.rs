//! Unified search results.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One hit of a unified search; `result_type` tells which resource it is.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct SearchHit {
    pub result_type: String,
    #[serde(default)]
    pub id: Option<u64>,
    /// Remaining fields of the record.
    #[serde(flatten)]
    pub record: serde_json::Map<String, Value>,
}

impl SearchHit {
    /// Deserialize the hit as a concrete record type.
    pub fn decode<T: serde::de::DeserializeOwned>(&self) -> serde_json::Result<T> {
        let mut record = self.record.clone();
        if let Some(id) = self.id {
            record.insert("id".to_string(), Value::from(id));
        }
        serde_json::from_value(Value::Object(record))
    }
}
