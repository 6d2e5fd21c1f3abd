//! Response envelope normalization.
//!
//! Collection endpoints wrap their items in an object keyed by the
//! collection name, next to pagination metadata:
//!
//! ```json
//! { "notes": [...], "page": 1, "totalPages": 3, "count": 10, "total": 27 }
//! ```
//!
//! Single-resource endpoints return the object itself, sometimes nested in a
//! `data` field, or `null` when nothing matches. Both shapes are normalized
//! here so nothing downstream branches on payload shape.

use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use crate::error::{Error, MalformedResponse};
use crate::resource::Resource;

/// One page of a collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListResult<T> {
    /// Items in server order.
    pub items: Vec<T>,
    /// Always at least 1, even for an empty collection.
    pub total_pages: u32,
    pub current_page: u32,
    /// Items in the whole filtered collection, when reported.
    pub total: Option<u64>,
    /// Items on this page, when reported.
    pub count: Option<u64>,
}

impl<T> ListResult<T> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Unwrap a collection envelope into a typed page.
///
/// A missing or `null` collection key yields an empty page. Items that fail
/// to decode are skipped and logged; a body that is not an object, or a
/// collection key holding something other than an array, is malformed.
pub fn normalize_list<R: Resource>(
    endpoint: &str,
    requested_page: u32,
    body: Value,
) -> Result<ListResult<R>, Error> {
    let Value::Object(mut map) = body else {
        return Err(MalformedResponse::new(endpoint, "expected a JSON object envelope").into());
    };

    let key = R::KIND.envelope_key();
    let raw_items = match map.remove(key) {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items,
        Some(other) => {
            return Err(MalformedResponse::new(
                endpoint,
                format!("'{}' is {}, expected an array", key, type_name(&other)),
            )
            .into());
        }
    };

    let mut items = Vec::with_capacity(raw_items.len());
    for (index, raw) in raw_items.into_iter().enumerate() {
        match serde_json::from_value::<R>(raw) {
            Ok(item) => items.push(item),
            Err(e) => warn!(endpoint, index, error = %e, "Skipping undecodable item"),
        }
    }

    let current_page = read_u64(&map, "page")
        .and_then(|p| u32::try_from(p).ok())
        .filter(|p| *p >= 1)
        .unwrap_or(requested_page.max(1));
    let total_pages = read_u64(&map, "totalPages")
        .and_then(|p| u32::try_from(p).ok())
        .unwrap_or(1)
        .max(1);

    Ok(ListResult {
        items,
        total_pages,
        current_page,
        total: read_u64(&map, "total"),
        count: read_u64(&map, "count"),
    })
}

/// Unwrap a single-resource payload.
///
/// Returns `Ok(None)` when the payload is absent: `null`, an empty object, or
/// a `data` wrapper around `null`.
pub fn unwrap_detail(endpoint: &str, body: Value) -> Result<Option<Value>, Error> {
    match body {
        Value::Null => Ok(None),
        Value::Object(mut map) => {
            if map.contains_key("_id") || map.contains_key("id") {
                return Ok(Some(Value::Object(map)));
            }
            match map.remove("data") {
                Some(inner) => unwrap_detail(endpoint, inner),
                None if map.is_empty() => Ok(None),
                None => Ok(Some(Value::Object(map))),
            }
        }
        other => Err(MalformedResponse::new(
            endpoint,
            format!("expected an object, got {}", type_name(&other)),
        )
        .into()),
    }
}

/// Decode an unwrapped single-resource payload.
pub fn decode_detail<R: Resource>(endpoint: &str, value: Value) -> Result<R, Error> {
    serde_json::from_value(value).map_err(|e| MalformedResponse::new(endpoint, e.to_string()).into())
}

fn read_u64(map: &serde_json::Map<String, Value>, key: &str) -> Option<u64> {
    match map.get(key)? {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
