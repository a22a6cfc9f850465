use serde::{Deserialize, Serialize};

/// One output row: an administrative area and its values in schema order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Area code, e.g. `"01105"`.
    pub id: String,
    /// Area name as published in the classification metadata.
    pub name: String,
    /// One value per schema column. Always `values.len() == schema.len()`;
    /// areas with any absent cell are never emitted.
    pub values: Vec<f64>,
}

/// A rectangular table: ordered column names plus one complete record per
/// surviving area.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataTable {
    /// Column names, `"{time_name}_{category_name}"`, time-major.
    pub schema: Vec<String>,
    pub records: Vec<Record>,
}

impl DataTable {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
