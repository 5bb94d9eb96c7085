use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::errors::{Result, SanityError};

/// A successful query response.
///
/// Every field is optional: whatever subset of `ms`, `query` and `result` the
/// API returned is kept, anything else in the body is ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct QueryResult {
    /// Server-side execution time in milliseconds.
    #[serde(rename = "ms", default)]
    pub elapsed_ms: Option<f64>,

    /// The query as echoed back by the API.
    #[serde(default)]
    pub query: Option<String>,

    /// The query result. Any JSON value.
    #[serde(default)]
    pub result: Option<Value>,
}

impl QueryResult {
    /// Decode `result` into `T`. `Ok(None)` if the response had no result.
    pub fn deserialize_result<T: DeserializeOwned>(&self) -> Result<Option<T>> {
        match &self.result {
            Some(value) => Ok(Some(serde_json::from_value(value.clone())?)),
            None => Ok(None),
        }
    }
}

// ---------------------------------------------------------------------------
// Internal request/response helpers (not part of the public API surface)
// ---------------------------------------------------------------------------

/// Build the POST body for a query.
///
/// `params` must be a JSON object (or null). Empty objects are left out so the
/// body is identical to a call without params.
pub(crate) fn query_payload(query: &str, params: Option<&Value>) -> Result<Value> {
    let mut payload = json!({ "query": query });

    match params {
        None | Some(Value::Null) => {}
        Some(Value::Object(map)) if map.is_empty() => {}
        Some(Value::Object(map)) => {
            payload["params"] = Value::Object(map.clone());
        }
        Some(other) => {
            return Err(SanityError::InvalidArgument {
                message: format!("query params must be a JSON object, got {}", kind_of(other)),
            });
        }
    }

    Ok(payload)
}

/// Interpret a decoded body from a non-failing response.
///
/// Only a JSON object is accepted; any other shape is a decode error.
pub(crate) fn query_result_from_value(body: Value) -> Result<QueryResult> {
    let mut map = match body {
        Value::Object(map) => map,
        other => {
            return Err(SanityError::Decode(serde::de::Error::custom(format!(
                "expected a JSON object response body, got {}",
                kind_of(&other)
            ))));
        }
    };

    if let Some(error) = map.get_mut("error") {
        if is_truthy(error) {
            return Err(SanityError::RemoteQuery {
                error: error.take(),
            });
        }
    }

    Ok(serde_json::from_value(Value::Object(map))?)
}

/// Null, false, zero and empty strings/arrays/objects count as "no error".
pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
