//! Cube-to-table transformation engine.
//!
//! A fetched [`StatsDocument`] is a cube indexed by time × area × category.
//! [`tabulate`] reshapes it into a rectangular [`DataTable`] in a fixed
//! stage order: axis indexing, time-range restriction, cube population,
//! area pruning, column pruning, schema build, row emission. Each stage is
//! a pure function over the previous stage's output; exclusion is monotonic
//! because a stage only ever sees its predecessor's survivors.
//!
//! The transform is single-threaded and synchronous over the fully
//! materialized document; the fetch collaborator has already completed by
//! the time it runs.

pub mod area;
pub mod axis;
pub mod columns;
pub mod cube;

use std::collections::HashSet;

use tracing::{debug, info};

use crate::document::StatsDocument;
use crate::error::Result;
use crate::table::{DataTable, Record};

use self::area::select_areas;
use self::axis::{Axis, AxisEntry, AREA_AXIS, CATEGORY_AXIS, TIME_AXIS};
use self::columns::{incomplete_columns, ColumnExclusions};
use self::cube::{TimeRange, ValueCube};

/// Switches of the cube-to-table transform.
#[derive(Debug, Clone)]
pub struct TableOptions {
    /// Hierarchy levels excluded from the area axis. Level 1 is the
    /// national aggregate.
    pub skip_level: HashSet<i64>,
    /// Drop areas that still have a child among the surviving areas.
    pub skip_parent_area: bool,
    /// Drop areas whose parent is among the surviving areas.
    pub skip_child_area: bool,
    /// Drop time/category columns incomplete for any surviving area.
    pub skip_nil_column: bool,
    /// Accepted for parity with the published option surface but never
    /// consulted: incomplete rows are always omitted at emission, which is
    /// what this switch appears to have been meant to control.
    pub skip_nil_row: bool,
    /// Restrict the eligible time codes before the cube is populated.
    pub time_range: Option<TimeRange>,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            skip_level: HashSet::from([1]),
            skip_parent_area: true,
            skip_child_area: false,
            skip_nil_column: true,
            skip_nil_row: false,
            time_range: None,
        }
    }
}

impl TableOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_skip_level(mut self, levels: impl IntoIterator<Item = i64>) -> Self {
        self.skip_level = levels.into_iter().collect();
        self
    }

    pub fn with_skip_parent_area(mut self, on: bool) -> Self {
        self.skip_parent_area = on;
        self
    }

    pub fn with_skip_child_area(mut self, on: bool) -> Self {
        self.skip_child_area = on;
        self
    }

    pub fn with_skip_nil_column(mut self, on: bool) -> Self {
        self.skip_nil_column = on;
        self
    }

    pub fn with_skip_nil_row(mut self, on: bool) -> Self {
        self.skip_nil_row = on;
        self
    }

    pub fn with_time_range(mut self, range: impl Into<TimeRange>) -> Self {
        self.time_range = Some(range.into());
        self
    }
}

/// Reshape a fetched statistical cube into a rectangular table.
///
/// Deterministic: the same document with the same options always yields the
/// same schema and records. Fails only on structurally invalid metadata
/// (missing axis group), before any row is processed.
pub fn tabulate(doc: &StatsDocument, options: &TableOptions) -> Result<DataTable> {
    let times = Axis::from_document(doc, TIME_AXIS)?;
    let categories = Axis::from_document(doc, CATEGORY_AXIS)?;
    let areas = Axis::from_document(doc, AREA_AXIS)?;

    // the metadata order of time codes is presumed chronological; the
    // range picks a contiguous run of it before the cube sees any value
    let eligible_times: Vec<&AxisEntry> = match options.time_range {
        Some(range) => {
            let span = range.resolve(times.entries().len());
            debug!(?span, "time range restriction");
            times.entries()[span].iter().collect()
        }
        None => times.entries().iter().collect(),
    };

    let eligible_codes: HashSet<&str> =
        eligible_times.iter().map(|time| time.code.as_str()).collect();
    let cube = ValueCube::build(doc.observations(), &eligible_codes);

    let surviving_areas = select_areas(
        areas.entries(),
        &options.skip_level,
        options.skip_parent_area,
        options.skip_child_area,
    );

    let all_categories: Vec<&AxisEntry> = categories.entries().iter().collect();
    let exclusions = if options.skip_nil_column {
        incomplete_columns(&cube, &surviving_areas, &eligible_times, &all_categories)
    } else {
        ColumnExclusions::default()
    };

    let surviving_times: Vec<&AxisEntry> = eligible_times
        .iter()
        .copied()
        .filter(|time| !exclusions.times.contains(&time.code))
        .collect();
    let surviving_categories: Vec<&AxisEntry> = all_categories
        .iter()
        .copied()
        .filter(|category| !exclusions.categories.contains(&category.code))
        .collect();

    let schema = build_schema(&surviving_times, &surviving_categories);
    let records = emit_records(
        &cube,
        &surviving_areas,
        &surviving_times,
        &surviving_categories,
    );
    info!(
        columns = schema.len(),
        records = records.len(),
        "tabulated statistical data"
    );
    Ok(DataTable { schema, records })
}

/// Column names: surviving times (outer) by surviving categories (inner),
/// both in metadata order.
fn build_schema(times: &[&AxisEntry], categories: &[&AxisEntry]) -> Vec<String> {
    let mut schema = Vec::with_capacity(times.len() * categories.len());
    for time in times {
        for category in categories {
            schema.push(format!("{}_{}", time.name, category.name));
        }
    }
    schema
}

/// One record per area whose row is fully populated. The row is assembled
/// in full first; a single absent cell then suppresses the whole record
/// rather than emitting a placeholder.
fn emit_records(
    cube: &ValueCube,
    areas: &[&AxisEntry],
    times: &[&AxisEntry],
    categories: &[&AxisEntry],
) -> Vec<Record> {
    let mut records = Vec::new();
    for area in areas {
        let mut row: Vec<Option<f64>> = Vec::with_capacity(times.len() * categories.len());
        for time in times {
            for category in categories {
                row.push(cube.value(&time.code, &area.code, &category.code));
            }
        }
        if row.iter().any(Option::is_none) {
            debug!(area = %area.code, "row incomplete, skipped");
            continue;
        }
        records.push(Record {
            id: area.code.clone(),
            name: area.name.clone(),
            values: row.into_iter().flatten().collect(),
        });
    }
    records
}
