use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use crate::logic::features::{FeatureVector, TARGET_NAME};

/// Human-readable dataset row: features in layout order, target last.
///
/// Serializes as a JSON object whose keys keep that order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PreviewRow(Vec<(String, f64)>);

impl PreviewRow {
    pub fn get(&self, column: &str) -> Option<f64> {
        self.0.iter().find(|(name, _)| name == column).map(|(_, v)| *v)
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> + '_ {
        self.0.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for PreviewRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, value) in &self.0 {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

struct PreviewRowVisitor;

impl<'de> Visitor<'de> for PreviewRowVisitor {
    type Value = PreviewRow;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map of column name to number")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<PreviewRow, A::Error> {
        let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some(entry) = access.next_entry::<String, f64>()? {
            entries.push(entry);
        }
        Ok(PreviewRow(entries))
    }
}

impl<'de> Deserialize<'de> for PreviewRow {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(PreviewRowVisitor)
    }
}

/// One labelled training row
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TrainingRow {
    // Feature contract
    pub features: FeatureVector,

    // Measured 28-day strength
    pub strength_28d: f64,
}

impl TrainingRow {
    pub fn new(features: FeatureVector, strength_28d: f64) -> Self {
        Self { features, strength_28d }
    }

    pub fn to_preview(&self) -> PreviewRow {
        PreviewRow(
            self.features
                .named_values()
                .map(|(name, value)| (name.to_string(), value))
                .chain(std::iter::once((TARGET_NAME.to_string(), self.strength_28d)))
                .collect(),
        )
    }

    pub fn is_finite(&self) -> bool {
        self.strength_28d.is_finite() && self.features.values.iter().all(|v| v.is_finite())
    }
}
