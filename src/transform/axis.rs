//! Axis indexing: classification metadata → ordered, code-addressable axes.

use std::collections::HashMap;

use tracing::debug;

use crate::document::{ClassEntry, StatsDocument};
use crate::error::{EstatError, Result};

/// Axis ids used by the `getStatsData` classification metadata.
pub const TIME_AXIS: &str = "time";
pub const CATEGORY_AXIS: &str = "cat01";
pub const AREA_AXIS: &str = "area";

/// One code of an axis, with its published metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisEntry {
    pub code: String,
    pub name: String,
    /// Hierarchy level; absent on axes without a hierarchy.
    pub level: Option<i64>,
    pub parent_code: Option<String>,
}

impl AxisEntry {
    fn from_class(entry: &ClassEntry) -> Self {
        Self {
            code: entry.code.clone(),
            name: entry.name.clone(),
            level: entry
                .level
                .as_deref()
                .and_then(|level| level.trim().parse().ok()),
            parent_code: entry.parent_code.clone(),
        }
    }

    /// Level with the wire coercion applied: absent or non-numeric is 0.
    pub fn level_or_zero(&self) -> i64 {
        self.level.unwrap_or(0)
    }
}

/// An indexed axis: entries in metadata order plus a code lookup.
///
/// Metadata order is meaningful (the time axis is presumed chronological,
/// and the schema follows axis order), so entries live in a `Vec` and the
/// map only resolves codes to positions.
#[derive(Debug, Clone)]
pub struct Axis {
    id: String,
    entries: Vec<AxisEntry>,
    by_code: HashMap<String, usize>,
}

impl Axis {
    /// Index the classification group `id` out of `doc`.
    ///
    /// A missing group means the metadata is structurally invalid; this is
    /// the one fatal condition of the indexing stage.
    pub fn from_document(doc: &StatsDocument, id: &str) -> Result<Self> {
        let group = doc.class_group(id).ok_or_else(|| {
            EstatError::Schema(format!(
                "classification group `{}` missing from CLASS_INF",
                id
            ))
        })?;
        let entries: Vec<AxisEntry> = group.entries.iter().map(AxisEntry::from_class).collect();
        let by_code = entries
            .iter()
            .enumerate()
            .map(|(position, entry)| (entry.code.clone(), position))
            .collect();
        debug!(axis = id, codes = entries.len(), "indexed axis");
        Ok(Self {
            id: id.to_string(),
            entries,
            by_code,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Entries in metadata order.
    pub fn entries(&self) -> &[AxisEntry] {
        &self.entries
    }

    pub fn get(&self, code: &str) -> Option<&AxisEntry> {
        self.by_code.get(code).map(|&position| &self.entries[position])
    }

    pub fn contains(&self, code: &str) -> bool {
        self.by_code.contains_key(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc_with_area_group() -> StatsDocument {
        serde_json::from_value(json!({
            "GET_STATS_DATA": {
                "STATISTICAL_DATA": {
                    "CLASS_INF": { "CLASS_OBJ": [
                        { "@id": "area", "CLASS": [
                            { "@code": "00", "@name": "nation", "@level": "1" },
                            { "@code": "10", "@name": "pref",
                              "@level": "2", "@parentCode": "00" },
                            { "@code": "xx", "@name": "odd", "@level": "n/a" }
                        ]}
                    ]},
                    "DATA_INF": { "VALUE": [] }
                }
            }
        }))
        .unwrap()
    }

    #[test]
    fn preserves_metadata_order_and_resolves_codes() {
        let axis = Axis::from_document(&doc_with_area_group(), AREA_AXIS).unwrap();
        let codes: Vec<&str> = axis.entries().iter().map(|e| e.code.as_str()).collect();
        assert_eq!(codes, vec!["00", "10", "xx"]);
        assert_eq!(axis.get("10").unwrap().parent_code.as_deref(), Some("00"));
        assert!(axis.contains("00"));
        assert!(!axis.contains("99"));
    }

    #[test]
    fn levels_coerce_like_the_wire_format() {
        let axis = Axis::from_document(&doc_with_area_group(), AREA_AXIS).unwrap();
        assert_eq!(axis.get("00").unwrap().level, Some(1));
        // non-numeric level indexes as absent and filters as level 0
        assert_eq!(axis.get("xx").unwrap().level, None);
        assert_eq!(axis.get("xx").unwrap().level_or_zero(), 0);
    }

    #[test]
    fn missing_group_is_a_schema_error() {
        let err = Axis::from_document(&doc_with_area_group(), TIME_AXIS).unwrap_err();
        assert!(matches!(err, EstatError::Schema(_)));
    }
}
