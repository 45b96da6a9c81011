//! The extracted declaration record.

use serde::ser::{Serialize, SerializeMap, Serializer};

/// Output key prefix for annotation-supplied fields (`extend_alias`, ...).
pub const EXTEND_FIELD_PREFIX: &str = "extend_";

/// A metadata field attached by an `@sass-export-<tag>="..."` marker.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExtendField {
    /// The marker tag, e.g. `alias` for `@sass-export-alias`.
    pub tag: String,
    /// The marker literal with its surrounding quotes removed.
    pub value: String,
}

impl ExtendField {
    pub fn new(tag: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            value: value.into(),
        }
    }

    /// The key this field is exported under (`extend_<tag>`).
    pub fn key(&self) -> String {
        format!("{EXTEND_FIELD_PREFIX}{}", self.tag)
    }
}

/// One exported variable.
///
/// `value` always holds the flattened source text, even when the value is a
/// map literal and `map_value` carries its entries.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Declaration {
    pub name: String,
    pub value: String,
    /// Entries of a map literal value, in source order.
    pub map_value: Option<Vec<Declaration>>,
    /// Annotation fields in first-seen order.
    pub extends: Vec<ExtendField>,
}

impl Declaration {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            ..Default::default()
        }
    }

    /// Builder-style helper used mostly by tests.
    pub fn with_extend(mut self, tag: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_extend(tag, value);
        self
    }

    /// Builder-style helper used mostly by tests.
    pub fn with_map_value(mut self, entries: Vec<Declaration>) -> Self {
        self.map_value = Some(entries);
        self
    }

    /// Sets an extend field. A repeated tag overwrites the earlier value but
    /// keeps its position.
    pub fn set_extend(&mut self, tag: impl Into<String>, value: impl Into<String>) {
        let tag = tag.into();
        let value = value.into();
        match self.extends.iter_mut().find(|field| field.tag == tag) {
            Some(field) => field.value = value,
            None => self.extends.push(ExtendField { tag, value }),
        }
    }

    /// Looks up an extend field by tag (`alias`, not `extend_alias`).
    pub fn extend(&self, tag: &str) -> Option<&str> {
        self.extends
            .iter()
            .find(|field| field.tag == tag)
            .map(|field| field.value.as_str())
    }

    /// Map entries, or an empty slice when the value is not a map.
    pub fn entries(&self) -> &[Declaration] {
        self.map_value.as_deref().unwrap_or(&[])
    }

    pub fn is_map(&self) -> bool {
        self.map_value.is_some()
    }
}

impl Serialize for Declaration {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = 2 + self.extends.len() + usize::from(self.map_value.is_some());
        let mut map = serializer.serialize_map(Some(len))?;
        map.serialize_entry("name", &self.name)?;
        map.serialize_entry("value", &self.value)?;
        for field in &self.extends {
            map.serialize_entry(&field.key(), &field.value)?;
        }
        if let Some(entries) = &self.map_value {
            map.serialize_entry("mapValue", entries)?;
        }
        map.end()
    }
}
