//! Side-load resolution: stitching sibling collections of an envelope into
//! the primary records by key.

use serde_json::{Map, Value};

/// One join rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SideLoadMapping {
    /// Join-key field on the primary record.
    pub field: String,
    /// Destination field populated on the primary record.
    pub name: String,
    /// Top-level envelope key holding the sibling records.
    pub dataset: String,
    /// Field on the sibling records compared against `field`.
    pub key: String,
    /// Attach every match instead of the first one.
    pub array: bool,
    /// Attach the whole dataset without filtering.
    pub all: bool,
}

impl SideLoadMapping {
    /// Single-record join on the sibling `id`.
    pub fn new(
        field: impl Into<String>,
        name: impl Into<String>,
        dataset: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            name: name.into(),
            dataset: dataset.into(),
            key: "id".to_string(),
            array: false,
            all: false,
        }
    }

    /// Compare against a sibling field other than `id`.
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// Attach all matching sibling records as an array.
    pub fn array(mut self) -> Self {
        self.array = true;
        self
    }

    /// Attach the entire dataset.
    pub fn all(mut self) -> Self {
        self.all = true;
        self
    }
}

/// Apply `mappings` to `primary`, looking siblings up in `envelope`.
///
/// `primary` may be a single record or an array of records; anything that is
/// not a JSON object is skipped. A destination is only written when the
/// record has the join field and the envelope has the dataset.
pub fn resolve(primary: &mut Value, envelope: &Value, mappings: &[SideLoadMapping]) {
    if mappings.is_empty() {
        return;
    }

    match primary {
        Value::Array(records) => {
            for record in records.iter_mut() {
                if let Value::Object(record) = record {
                    resolve_record(record, envelope, mappings);
                }
            }
        }
        Value::Object(record) => resolve_record(record, envelope, mappings),
        _ => {}
    }
}

fn resolve_record(record: &mut Map<String, Value>, envelope: &Value, mappings: &[SideLoadMapping]) {
    for mapping in mappings {
        let Some(join_value) = record.get(&mapping.field) else {
            continue;
        };
        let Some(dataset) = envelope.get(&mapping.dataset) else {
            continue;
        };

        let populated = if mapping.all {
            dataset.clone()
        } else {
            let siblings = dataset.as_array().map(Vec::as_slice).unwrap_or_default();
            let mut matches = siblings
                .iter()
                .filter(|sibling| {
                    sibling
                        .get(&mapping.key)
                        .is_some_and(|key| same_join_value(key, join_value))
                });

            if mapping.array {
                Value::Array(matches.cloned().collect())
            } else {
                matches.next().cloned().unwrap_or(Value::Null)
            }
        };

        record.insert(mapping.name.clone(), populated);
    }
}

/// JSON equality, except that numbers compare by value so `10` matches `10.0`.
fn same_join_value(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => {
            if let (Some(x), Some(y)) = (x.as_u64(), y.as_u64()) {
                x == y
            } else if let (Some(x), Some(y)) = (x.as_i64(), y.as_i64()) {
                x == y
            } else {
                x.as_f64() == y.as_f64()
            }
        }
        _ => a == b,
    }
}
