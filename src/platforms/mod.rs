pub use prenivdl_core::platforms::traits;
pub use prenivdl_core::platforms::Platform;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

pub mod applemusic;
pub mod bluesky;
pub mod capcut;
pub mod douyin;
pub mod facebook;
pub mod instagram;
pub mod pinterest;
pub mod rednote;
pub mod spotify;
pub mod threads;
pub mod tiktok;
pub mod twitter;
pub mod youtube;

/// Nested objects: `null` or a value of the wrong shape reads as the
/// default instead of rejecting the whole payload.
pub(crate) fn lenient_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).unwrap_or_default())
}

/// Optional scalars: a mistyped value is treated as absent.
pub(crate) fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).ok())
}

/// Lists keep the entries that decode and drop the rest. Anything other
/// than an array is an empty list.
pub(crate) fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| T::deserialize(item).ok())
            .collect(),
        _ => Vec::new(),
    })
}

pub(crate) fn has_text(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|s| !s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Default, Deserialize)]
    #[serde(default)]
    struct Sample {
        #[serde(deserialize_with = "lenient")]
        count: Option<u64>,
        #[serde(deserialize_with = "lenient_list")]
        tags: Vec<String>,
        #[serde(deserialize_with = "lenient_default")]
        nested: Nested,
    }

    #[derive(Debug, Default, Deserialize, PartialEq)]
    #[serde(default)]
    struct Nested {
        #[serde(deserialize_with = "lenient")]
        name: Option<String>,
    }

    #[test]
    fn mistyped_fields_read_as_absent() {
        let s: Sample = serde_json::from_value(json!({
            "count": 1.5,
            "tags": ["a", 7, null, "b"],
            "nested": "not an object"
        }))
        .unwrap();
        assert_eq!(s.count, None);
        assert_eq!(s.tags, ["a", "b"]);
        assert_eq!(s.nested, Nested::default());
    }

    #[test]
    fn well_typed_fields_are_kept() {
        let s: Sample = serde_json::from_value(json!({
            "count": 3,
            "tags": null,
            "nested": {"name": "x"}
        }))
        .unwrap();
        assert_eq!(s.count, Some(3));
        assert!(s.tags.is_empty());
        assert_eq!(s.nested.name.as_deref(), Some("x"));
    }
}
