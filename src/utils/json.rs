use crate::errors::QueryError;
use crate::types::{Collection, Record};

/// Convert a serde_json::Value that must be an object into a record.
///
/// # Errors
/// Returns `InvalidRecord` on anything other than a JSON object.
pub fn json_value_to_record(val: &serde_json::Value) -> Result<Record, QueryError> {
    let obj = val
        .as_object()
        .ok_or_else(|| QueryError::InvalidRecord("expected JSON object".into()))?;
    Record::try_from(obj.clone()).map_err(|e| QueryError::InvalidRecord(e.to_string()))
}

/// Parse a JSON string holding a top-level array of objects into a collection.
///
/// # Errors
/// Returns an error if the JSON is malformed, not an array, or holds a non-object element.
pub fn parse_json_collection(json: &str) -> Result<Collection, QueryError> {
    let val: serde_json::Value = serde_json::from_str(json)?;
    let items = val
        .as_array()
        .ok_or_else(|| QueryError::InvalidCollection("expected JSON array".into()))?;
    items.iter().map(json_value_to_record).collect()
}

/// Render a collection as a JSON array.
///
/// # Errors
/// Returns an error if a value has no JSON representation.
pub fn collection_to_json(collection: &[Record]) -> Result<serde_json::Value, QueryError> {
    Ok(serde_json::to_value(collection)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::values_equal;
    use bson::Bson;

    #[test]
    fn json_to_collection_success() {
        let c = parse_json_collection("[{\"a\":1,\"b\":\"x\"},{\"a\":2}]").unwrap();
        assert_eq!(c.len(), 2);
        assert!(values_equal(c[0].get("a").unwrap(), &Bson::Int32(1)));
        assert_eq!(c[0].get_str("b").unwrap(), "x");
    }

    #[test]
    fn json_collection_rejects_object_root() {
        let e = parse_json_collection("{\"a\":1}").unwrap_err();
        assert!(matches!(e, QueryError::InvalidCollection(_)));
    }

    #[test]
    fn json_collection_rejects_scalar_element() {
        let e = parse_json_collection("[{\"a\":1}, 3]").unwrap_err();
        assert!(matches!(e, QueryError::InvalidRecord(_)));
    }

    #[test]
    fn collection_renders_back_to_json() {
        let c = parse_json_collection("[{\"name\":\"a\",\"age\":10}]").unwrap();
        let v = collection_to_json(&c).unwrap();
        assert_eq!(v, serde_json::json!([{"name": "a", "age": 10}]));
    }
}
