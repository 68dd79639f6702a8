pub mod capacity;
pub mod recency_cache;
pub mod store;

use serde_json::Value;

use crate::core::ShapeError;

pub use capacity::CapacityChecker;
pub use recency_cache::RecencyCache;
pub use store::StoreChecker;

/// What a single checker run did. Failures are already logged by the checker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckOutcome {
    /// Number of notifications handed to the notifier.
    Notified(usize),
    Quiet,
    Failed,
}

/// The list under the top-level `data` key. A missing `data` is an empty
/// listing; anything else that is not a list, `null` included, is a shape error.
pub(crate) fn data_list<'a>(
    body: &'a Value,
    endpoint: &'static str,
) -> Result<&'a [Value], ShapeError> {
    let Some(object) = body.as_object() else {
        return Err(ShapeError {
            endpoint,
            detail: format!("expected an object at the top level, got {}", body),
        });
    };

    match object.get("data") {
        None => Ok(&[][..]),
        Some(Value::Array(items)) => Ok(items.as_slice()),
        Some(other) => Err(ShapeError {
            endpoint,
            detail: format!("'data' is not a list: {}", other),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_data_list_shapes() {
        assert_eq!(data_list(&json!({"data": [1, 2]}), "test").unwrap().len(), 2);
        assert!(data_list(&json!({}), "test").unwrap().is_empty());
        assert!(data_list(&json!({"data": null}), "test").is_err());
        assert!(data_list(&json!({"data": {"region": "x"}}), "test").is_err());
        assert!(data_list(&json!([1, 2]), "test").is_err());
    }
}
