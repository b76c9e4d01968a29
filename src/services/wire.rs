//! Lenient field decoders shared by the upstream wire types.

use serde::{Deserialize, Deserializer};

/// Accept a JSON string or number and keep it as text. `null` becomes empty.
pub(crate) fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
        Null,
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(text) => text,
        Raw::Number(number) => number.to_string(),
        Raw::Null => String::new(),
    })
}

/// Treat an explicit `null` like a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Keep a field only when it is a non-blank string; anything else is `None`.
pub(crate) fn optional_text<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(text) if !text.trim().is_empty() => Some(text),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Record {
        #[serde(deserialize_with = "string_or_number")]
        id: String,
        #[serde(default, deserialize_with = "optional_text")]
        note: Option<String>,
        #[serde(default, deserialize_with = "null_as_default")]
        tags: Vec<String>,
    }

    #[test]
    fn number_becomes_text() {
        let record: Record = serde_json::from_str(r#"{"id": 52}"#).unwrap();
        assert_eq!(record.id, "52");
        assert_eq!(record.note, None);
    }

    #[test]
    fn text_is_kept() {
        let record: Record = serde_json::from_str(r#"{"id": "52a", "note": "x"}"#).unwrap();
        assert_eq!(record.id, "52a");
        assert_eq!(record.note.as_deref(), Some("x"));
    }

    #[test]
    fn odd_values_are_dropped_not_fatal() {
        let record: Record =
            serde_json::from_str(r#"{"id": "1", "note": {"unexpected": true}}"#).unwrap();
        assert_eq!(record.note, None);

        let record: Record = serde_json::from_str(r#"{"id": "1", "note": "   "}"#).unwrap();
        assert_eq!(record.note, None);
    }

    #[test]
    fn null_is_not_fatal() {
        let record: Record =
            serde_json::from_str(r#"{"id": null, "note": null, "tags": null}"#).unwrap();
        assert_eq!(record.id, "");
        assert_eq!(record.note, None);
        assert!(record.tags.is_empty());

        let record: Record = serde_json::from_str(r#"{"id": 7, "tags": ["a"]}"#).unwrap();
        assert_eq!(record.tags, vec!["a".to_string()]);
    }
}
