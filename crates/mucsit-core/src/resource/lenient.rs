//! Tolerant deserializers for loosely typed backend fields.
//!
//! The backend is not strict about types: years arrive as numbers or strings,
//! arrays arrive as `null`, and timestamps are occasionally garbage. None of
//! that should make an otherwise valid item undecodable.

use chrono::{DateTime, Utc};
use serde::de::{DeserializeOwned, Error as _};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serializer};
use serde_json::Value;

use crate::types::ResourceId;

/// Id keys as the backend sends them: `_id`, `id`, or both.
///
/// Used through `#[serde(flatten)]` so both keys reach the same field.
#[derive(Deserialize)]
struct RawId {
    #[serde(default, rename = "_id")]
    underscore: Option<Value>,
    #[serde(default)]
    id: Option<Value>,
}

impl RawId {
    /// `_id` wins; `id` is used when `_id` is absent, null, or blank.
    fn into_string(self) -> Option<String> {
        [self.underscore, self.id]
            .into_iter()
            .flatten()
            .find_map(|v| match v {
                Value::String(s) if !s.trim().is_empty() => Some(s),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
    }
}

/// Required resource id from `_id` or `id`.
pub(crate) fn resource_id<'de, D>(deserializer: D) -> Result<ResourceId, D::Error>
where
    D: Deserializer<'de>,
{
    let id = RawId::deserialize(deserializer)?
        .into_string()
        .ok_or_else(|| D::Error::missing_field("_id"))?;
    ResourceId::new(id).map_err(D::Error::custom)
}

/// Optional id from `_id` or `id`.
pub(crate) fn opt_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(RawId::deserialize(deserializer)?.into_string())
}

/// Writes a flattened id back as `_id`.
pub(crate) fn serialize_id<S>(id: &ResourceId, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let mut map = serializer.serialize_map(Some(1))?;
    map.serialize_entry("_id", id)?;
    map.end()
}

pub(crate) fn serialize_opt_id<S>(id: &Option<String>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let mut map = serializer.serialize_map(Some(usize::from(id.is_some())))?;
    if let Some(id) = id {
        map.serialize_entry("_id", id)?;
    }
    map.end()
}

/// Any value that does not decode as `T` becomes `None`.
pub(crate) fn opt_lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| serde_json::from_value(v).ok()))
}

/// Booleans, or the strings `"true"`/`"false"`; anything else is `false`.
pub(crate) fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Bool(b)) => b,
        Some(Value::String(s)) => s.trim().eq_ignore_ascii_case("true"),
        _ => false,
    })
}

/// `null` or absent becomes `T::default()`.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Blank strings become `None`.
pub(crate) fn opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// Integers, or strings holding integers; anything else is `None`.
pub(crate) fn opt_int<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

/// RFC 3339 timestamps; unparseable values are `None`.
pub(crate) fn opt_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => DateTime::parse_from_rfc3339(&s)
            .ok()
            .map(|dt| dt.with_timezone(&Utc)),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Loose {
        #[serde(default, deserialize_with = "opt_int")]
        year: Option<i64>,
        #[serde(default, deserialize_with = "opt_string")]
        subject: Option<String>,
        #[serde(default, deserialize_with = "opt_timestamp")]
        at: Option<DateTime<Utc>>,
        #[serde(default, deserialize_with = "null_as_default")]
        tags: Vec<String>,
    }

    #[test]
    fn tolerates_loose_types() {
        let loose: Loose = serde_json::from_str(
            r#"{"year": "2023", "subject": "  ", "at": "yesterday", "tags": null}"#,
        )
        .unwrap();
        assert_eq!(loose.year, Some(2023));
        assert_eq!(loose.subject, None);
        assert_eq!(loose.at, None);
        assert!(loose.tags.is_empty());
    }

    #[test]
    fn absent_fields_default() {
        let loose: Loose = serde_json::from_str("{}").unwrap();
        assert_eq!(loose.year, None);
        assert!(loose.tags.is_empty());
    }

    #[derive(Deserialize)]
    struct Keyed {
        #[serde(flatten, deserialize_with = "resource_id")]
        id: ResourceId,
        #[serde(default, deserialize_with = "flag")]
        featured: bool,
        #[serde(default, deserialize_with = "opt_lenient")]
        rank: Option<u8>,
    }

    #[test]
    fn id_from_either_key() {
        let both: Keyed = serde_json::from_str(r#"{"_id": "a", "id": "b"}"#).unwrap();
        assert_eq!(both.id.as_str(), "a");
        let legacy: Keyed = serde_json::from_str(r#"{"id": "b"}"#).unwrap();
        assert_eq!(legacy.id.as_str(), "b");
        let blank: Keyed = serde_json::from_str(r#"{"_id": null, "id": 42}"#).unwrap();
        assert_eq!(blank.id.as_str(), "42");
        assert!(serde_json::from_str::<Keyed>("{}").is_err());
        assert!(serde_json::from_str::<Keyed>(r#"{"_id": "a/b"}"#).is_err());
    }

    #[test]
    fn off_type_values_fall_back() {
        let k: Keyed =
            serde_json::from_str(r#"{"_id": "a", "featured": null, "rank": "high"}"#).unwrap();
        assert!(!k.featured);
        assert_eq!(k.rank, None);
        let k: Keyed =
            serde_json::from_str(r#"{"_id": "a", "featured": "true", "rank": 3}"#).unwrap();
        assert!(k.featured);
        assert_eq!(k.rank, Some(3));
    }

    #[test]
    fn parses_valid_timestamp() {
        let loose: Loose = serde_json::from_str(r#"{"at": "2024-05-01T10:00:00.000Z"}"#).unwrap();
        assert_eq!(
            loose.at.map(|t| t.to_rfc3339()),
            Some("2024-05-01T10:00:00+00:00".to_string())
        );
    }
}
