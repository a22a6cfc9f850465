//! Wire types for the `getStatsData` response, treated as an opaque
//! boundary format: field names mirror the payload (`@`-prefixed attributes,
//! `$` for the observation itself) and nothing here interprets values.

use serde::{Deserialize, Deserializer};

use crate::error::Result;

/// Top-level `getStatsData` response.
#[derive(Debug, Clone, Deserialize)]
pub struct StatsDocument {
    #[serde(rename = "GET_STATS_DATA")]
    pub get_stats_data: GetStatsData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GetStatsData {
    #[serde(rename = "STATISTICAL_DATA")]
    pub statistical_data: StatisticalData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StatisticalData {
    #[serde(rename = "CLASS_INF")]
    pub class_inf: ClassInf,
    #[serde(rename = "DATA_INF")]
    pub data_inf: DataInf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClassInf {
    #[serde(rename = "CLASS_OBJ", deserialize_with = "one_or_many")]
    pub groups: Vec<ClassGroup>,
}

/// One classification group; `@id` is `"time"`, `"cat01"`, `"area"`, ...
#[derive(Debug, Clone, Deserialize)]
pub struct ClassGroup {
    #[serde(rename = "@id")]
    pub id: String,
    /// A group with exactly one entry arrives as a bare object; it is
    /// wrapped into a one-element list here so nothing downstream
    /// special-cases it.
    #[serde(rename = "CLASS", deserialize_with = "one_or_many")]
    pub entries: Vec<ClassEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClassEntry {
    #[serde(rename = "@code")]
    pub code: String,
    #[serde(rename = "@name")]
    pub name: String,
    /// Hierarchy level, published as a string. Absent on flat axes.
    #[serde(rename = "@level", default)]
    pub level: Option<String>,
    #[serde(rename = "@parentCode", default)]
    pub parent_code: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DataInf {
    #[serde(rename = "VALUE", deserialize_with = "one_or_many", default)]
    pub values: Vec<Observation>,
}

/// One observed cell of the statistical cube.
#[derive(Debug, Clone, Deserialize)]
pub struct Observation {
    #[serde(rename = "@time")]
    pub time: String,
    #[serde(rename = "@area")]
    pub area: String,
    #[serde(rename = "@cat01")]
    pub cat01: String,
    /// The observation as a numeric string; e-Stat publishes `"-"` for
    /// suppressed cells.
    #[serde(rename = "$")]
    pub value: String,
}

impl StatsDocument {
    /// Parse a raw `getStatsData` payload.
    pub fn from_json(body: &str) -> Result<Self> {
        Ok(serde_json::from_str(body)?)
    }

    /// First classification group with the given `@id`, if any.
    pub fn class_group(&self, id: &str) -> Option<&ClassGroup> {
        self.get_stats_data
            .statistical_data
            .class_inf
            .groups
            .iter()
            .find(|group| group.id == id)
    }

    pub fn observations(&self) -> &[Observation] {
        &self.get_stats_data.statistical_data.data_inf.values
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

fn one_or_many<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::Many(entries) => entries,
        OneOrMany::One(entry) => vec![entry],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn single_class_entry_is_wrapped() {
        let doc: StatsDocument = serde_json::from_value(json!({
            "GET_STATS_DATA": {
                "STATISTICAL_DATA": {
                    "CLASS_INF": { "CLASS_OBJ": [
                        { "@id": "cat01",
                          "CLASS": { "@code": "A1101", "@name": "population" } }
                    ]},
                    "DATA_INF": { "VALUE": [] }
                }
            }
        }))
        .unwrap();

        let group = doc.class_group("cat01").unwrap();
        assert_eq!(group.entries.len(), 1);
        assert_eq!(group.entries[0].code, "A1101");
        assert_eq!(group.entries[0].level, None);
        assert_eq!(group.entries[0].parent_code, None);
    }

    #[test]
    fn class_array_parses_in_order() {
        let doc: StatsDocument = serde_json::from_value(json!({
            "GET_STATS_DATA": {
                "STATISTICAL_DATA": {
                    "CLASS_INF": { "CLASS_OBJ": [
                        { "@id": "area", "CLASS": [
                            { "@code": "00", "@name": "nation", "@level": "1" },
                            { "@code": "10", "@name": "pref",
                              "@level": "2", "@parentCode": "00" }
                        ]}
                    ]},
                    "DATA_INF": { "VALUE": [] }
                }
            }
        }))
        .unwrap();

        let codes: Vec<&str> = doc
            .class_group("area")
            .unwrap()
            .entries
            .iter()
            .map(|entry| entry.code.as_str())
            .collect();
        assert_eq!(codes, vec!["00", "10"]);
    }

    #[test]
    fn single_observation_is_wrapped() {
        let doc: StatsDocument = serde_json::from_value(json!({
            "GET_STATS_DATA": {
                "STATISTICAL_DATA": {
                    "CLASS_INF": { "CLASS_OBJ": [] },
                    "DATA_INF": { "VALUE":
                        { "@time": "2012", "@area": "11",
                          "@cat01": "A1101", "$": "5.0" } }
                }
            }
        }))
        .unwrap();

        assert_eq!(doc.observations().len(), 1);
        assert_eq!(doc.observations()[0].value, "5.0");
    }

    #[test]
    fn unknown_group_is_none() {
        let doc: StatsDocument = serde_json::from_value(json!({
            "GET_STATS_DATA": {
                "STATISTICAL_DATA": {
                    "CLASS_INF": { "CLASS_OBJ": [] },
                    "DATA_INF": {}
                }
            }
        }))
        .unwrap();

        assert!(doc.class_group("time").is_none());
        assert!(doc.observations().is_empty());
    }
}
