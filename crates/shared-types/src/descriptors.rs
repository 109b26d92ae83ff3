//! Static descriptive content for hoverable diagram regions

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::errors::{PageFxError, PageFxResult};

/// Content shown in a tooltip for one diagram region
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RegionDescriptor {
    /// Value of the region's key attribute (e.g. `data-zone="nip"`)
    pub key: String,
    pub title: String,
    #[serde(default)]
    pub detail: String,
    /// Extra per-diagram fields such as `temp`, `params` or `indicator`
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub auxiliary: BTreeMap<String, String>,
}

impl RegionDescriptor {
    pub fn new(key: impl Into<String>, title: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
            detail: detail.into(),
            auxiliary: BTreeMap::new(),
        }
    }

    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.auxiliary.insert(name.into(), value.into());
        self
    }

    /// Resolve a named field. `title` and `detail` are built in, anything else
    /// is looked up among the auxiliary fields.
    pub fn field(&self, name: &str) -> Option<&str> {
        match name {
            "key" => Some(&self.key),
            "title" => Some(&self.title),
            "detail" => Some(&self.detail),
            other => self.auxiliary.get(other).map(String::as_str),
        }
    }
}

/// Immutable key -> descriptor mapping, built once at initialization.
///
/// Duplicate keys are rejected when the catalog is built, so a lookup either
/// finds exactly one descriptor or nothing.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(try_from = "Vec<RegionDescriptor>", into = "Vec<RegionDescriptor>")]
pub struct DescriptorCatalog {
    entries: BTreeMap<String, RegionDescriptor>,
}

impl DescriptorCatalog {
    pub fn from_descriptors(
        descriptors: impl IntoIterator<Item = RegionDescriptor>,
    ) -> PageFxResult<Self> {
        let mut entries = BTreeMap::new();
        for descriptor in descriptors {
            if entries.contains_key(&descriptor.key) {
                return Err(PageFxError::DuplicateRegionKey {
                    key: descriptor.key,
                });
            }
            entries.insert(descriptor.key.clone(), descriptor);
        }
        Ok(Self { entries })
    }

    pub fn get(&self, key: &str) -> Option<&RegionDescriptor> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl TryFrom<Vec<RegionDescriptor>> for DescriptorCatalog {
    type Error = PageFxError;

    fn try_from(descriptors: Vec<RegionDescriptor>) -> PageFxResult<Self> {
        Self::from_descriptors(descriptors)
    }
}

impl From<DescriptorCatalog> for Vec<RegionDescriptor> {
    fn from(catalog: DescriptorCatalog) -> Self {
        catalog.entries.into_values().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nip() -> RegionDescriptor {
        RegionDescriptor::new("nip", "Nip Point", "Highest temperature zone").with_field("temp", "~350°C")
    }

    #[test]
    fn test_lookup_and_fields() {
        let catalog = DescriptorCatalog::from_descriptors(vec![nip()]).unwrap();
        let found = catalog.get("nip").unwrap();
        assert_eq!(found.field("title"), Some("Nip Point"));
        assert_eq!(found.field("temp"), Some("~350°C"));
        assert_eq!(found.field("missing"), None);
        assert!(catalog.get("roller").is_none());
    }

    #[test]
    fn test_duplicate_keys_rejected() {
        let err = DescriptorCatalog::from_descriptors(vec![nip(), nip()]).unwrap_err();
        assert!(matches!(err, PageFxError::DuplicateRegionKey { ref key } if key == "nip"));
    }

    #[test]
    fn test_duplicate_keys_rejected_when_deserializing() {
        let json = r#"[{"key":"a","title":"A"},{"key":"a","title":"B"}]"#;
        let parsed: Result<DescriptorCatalog, _> = serde_json::from_str(json);
        assert!(parsed.is_err());
    }
}
