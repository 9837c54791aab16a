// Host and link records exchanged with the network store
use serde::de::{self, Deserializer, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A directed, described edge between two hosts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Link {
    pub from: String,
    pub to: String,
    pub description: String,
}

/// Raw value of one request field. Any JSON value deserializes, so a
/// mistyped field reaches validation instead of failing the parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Field {
    Text(String),
    NotText,
}

/// Request to add a host. Fields are optional so that validation, not
/// deserialization, decides what is missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NewHost {
    #[serde(default)]
    pub name: Option<Field>,
    /// Keys outside the host schema
    #[serde(flatten)]
    pub unknown: BTreeMap<String, Field>,
}

/// Request to add (or re-describe) a link.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NewLink {
    #[serde(default)]
    pub from: Option<Field>,
    #[serde(default)]
    pub to: Option<Field>,
    #[serde(default)]
    pub description: Option<Field>,
    #[serde(flatten)]
    pub unknown: BTreeMap<String, Field>,
}

impl Link {
    #[inline]
    #[must_use]
    pub fn new(
        from: impl Into<String>,
        to: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            description: description.into(),
        }
    }
}

impl Field {
    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Field::Text(s) => Some(s),
            Field::NotText => None,
        }
    }
}

impl From<&str> for Field {
    fn from(s: &str) -> Self {
        Field::Text(s.to_string())
    }
}

impl From<String> for Field {
    fn from(s: String) -> Self {
        Field::Text(s)
    }
}

impl<'de> Deserialize<'de> for Field {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(FieldVisitor)
    }
}

struct FieldVisitor;

impl<'de> Visitor<'de> for FieldVisitor {
    type Value = Field;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("any JSON value")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Field, E> {
        Ok(Field::Text(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Field, E> {
        Ok(Field::Text(v))
    }

    fn visit_bool<E: de::Error>(self, _: bool) -> Result<Field, E> {
        Ok(Field::NotText)
    }

    fn visit_i64<E: de::Error>(self, _: i64) -> Result<Field, E> {
        Ok(Field::NotText)
    }

    fn visit_u64<E: de::Error>(self, _: u64) -> Result<Field, E> {
        Ok(Field::NotText)
    }

    fn visit_f64<E: de::Error>(self, _: f64) -> Result<Field, E> {
        Ok(Field::NotText)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Field, E> {
        Ok(Field::NotText)
    }

    fn visit_none<E: de::Error>(self) -> Result<Field, E> {
        Ok(Field::NotText)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Field, D::Error> {
        Field::deserialize(deserializer)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Field, A::Error> {
        while seq.next_element::<IgnoredAny>()?.is_some() {}
        Ok(Field::NotText)
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Field, A::Error> {
        while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
        Ok(Field::NotText)
    }
}

impl NewHost {
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(Field::Text(name.into())),
            unknown: BTreeMap::new(),
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_ref().and_then(Field::as_str)
    }
}

impl NewLink {
    #[inline]
    #[must_use]
    pub fn new(
        from: impl Into<String>,
        to: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            from: Some(Field::Text(from.into())),
            to: Some(Field::Text(to.into())),
            description: Some(Field::Text(description.into())),
            unknown: BTreeMap::new(),
        }
    }

    pub fn from_host(&self) -> Option<&str> {
        self.from.as_ref().and_then(Field::as_str)
    }

    pub fn to_host(&self) -> Option<&str> {
        self.to.as_ref().and_then(Field::as_str)
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_ref().and_then(Field::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_deserialize_as_none() {
        let link: NewLink = serde_json::from_str(r#"{"to":"test","from":"test2"}"#).unwrap();
        assert_eq!(link.from_host(), Some("test2"));
        assert_eq!(link.description, None);

        let host: NewHost = serde_json::from_str("{}").unwrap();
        assert_eq!(host, NewHost::default());
    }

    #[test]
    fn test_mistyped_and_unknown_fields_are_kept() {
        let host: NewHost =
            serde_json::from_str(r#"{"name":7,"extra":{"nested":[1,2]},"tag":"x"}"#).unwrap();
        assert_eq!(host.name, Some(Field::NotText));
        assert_eq!(host.name(), None);
        assert_eq!(
            host.unknown.keys().map(String::as_str).collect::<Vec<_>>(),
            vec!["extra", "tag"]
        );

        let link: NewLink =
            serde_json::from_str(r#"{"from":["a"],"to":true,"description":null}"#).unwrap();
        assert_eq!(link.from, Some(Field::NotText));
        assert_eq!(link.to, Some(Field::NotText));
        assert_eq!(link.description, None);
    }

    #[test]
    fn test_link_serializes_flat() {
        let json = serde_json::to_value(Link::new("A", "B", "scp")).unwrap();
        assert_eq!(json, serde_json::json!({"from": "A", "to": "B", "description": "scp"}));
    }
}
