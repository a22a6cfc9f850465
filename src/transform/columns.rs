//! Column pruning: time/category combinations incomplete for any surviving
//! area are excluded for every area, so the emitted table stays rectangular.

use std::collections::HashSet;

use tracing::debug;

use super::axis::AxisEntry;
use super::cube::ValueCube;

/// Time and category codes excluded because some surviving area lacks them.
#[derive(Debug, Default)]
pub struct ColumnExclusions {
    pub times: HashSet<String>,
    pub categories: HashSet<String>,
}

impl ColumnExclusions {
    pub fn is_empty(&self) -> bool {
        self.times.is_empty() && self.categories.is_empty()
    }
}

/// Scan every surviving area against every eligible time slice.
///
/// A (time, area) slice with no observations at all excludes the whole time;
/// otherwise each missing (time, area, category) cell excludes that
/// category. The result is the union of incompleteness across all surviving
/// areas: one area missing a cell hides the column for everyone.
pub fn incomplete_columns(
    cube: &ValueCube,
    areas: &[&AxisEntry],
    times: &[&AxisEntry],
    categories: &[&AxisEntry],
) -> ColumnExclusions {
    let mut exclusions = ColumnExclusions::default();
    for area in areas {
        for time in times {
            if !cube.has_slice(&time.code, &area.code) {
                exclusions.times.insert(time.code.clone());
                continue;
            }
            for category in categories {
                if cube.value(&time.code, &area.code, &category.code).is_none() {
                    exclusions.categories.insert(category.code.clone());
                }
            }
        }
    }
    debug!(
        times = exclusions.times.len(),
        categories = exclusions.categories.len(),
        "incomplete columns"
    );
    exclusions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Observation;
    use std::collections::HashSet;

    fn entry(code: &str) -> AxisEntry {
        AxisEntry {
            code: code.to_string(),
            name: code.to_string(),
            level: None,
            parent_code: None,
        }
    }

    fn cube_from(cells: &[(&str, &str, &str)]) -> ValueCube {
        let observations: Vec<Observation> = cells
            .iter()
            .map(|(time, area, cat)| {
                serde_json::from_value(serde_json::json!({
                    "@time": time, "@area": area, "@cat01": cat, "$": "1"
                }))
                .unwrap()
            })
            .collect();
        let eligible: HashSet<&str> = cells.iter().map(|(time, _, _)| *time).collect();
        ValueCube::build(&observations, &eligible)
    }

    #[test]
    fn one_areas_gap_excludes_the_category_for_all() {
        // "11" has A2 everywhere, "12" misses A2 at 2013: A2 goes away.
        let cube = cube_from(&[
            ("2012", "11", "A1"),
            ("2012", "11", "A2"),
            ("2013", "11", "A1"),
            ("2013", "11", "A2"),
            ("2012", "12", "A1"),
            ("2012", "12", "A2"),
            ("2013", "12", "A1"),
        ]);
        let areas = [entry("11"), entry("12")];
        let times = [entry("2012"), entry("2013")];
        let categories = [entry("A1"), entry("A2")];
        let exclusions = incomplete_columns(
            &cube,
            &areas.iter().collect::<Vec<_>>(),
            &times.iter().collect::<Vec<_>>(),
            &categories.iter().collect::<Vec<_>>(),
        );
        assert!(exclusions.times.is_empty());
        assert_eq!(
            exclusions.categories,
            HashSet::from(["A2".to_string()])
        );
    }

    #[test]
    fn empty_slice_excludes_the_time_not_its_categories() {
        // "12" has nothing at 2013: the 2013 slice is excluded wholesale and
        // its categories are not inspected for that area.
        let cube = cube_from(&[
            ("2012", "11", "A1"),
            ("2013", "11", "A1"),
            ("2012", "12", "A1"),
        ]);
        let areas = [entry("11"), entry("12")];
        let times = [entry("2012"), entry("2013")];
        let categories = [entry("A1")];
        let exclusions = incomplete_columns(
            &cube,
            &areas.iter().collect::<Vec<_>>(),
            &times.iter().collect::<Vec<_>>(),
            &categories.iter().collect::<Vec<_>>(),
        );
        assert_eq!(exclusions.times, HashSet::from(["2013".to_string()]));
        assert!(exclusions.categories.is_empty());
    }

    #[test]
    fn complete_cube_excludes_nothing() {
        let cube = cube_from(&[
            ("2012", "11", "A1"),
            ("2013", "11", "A1"),
        ]);
        let areas = [entry("11")];
        let times = [entry("2012"), entry("2013")];
        let categories = [entry("A1")];
        let exclusions = incomplete_columns(
            &cube,
            &areas.iter().collect::<Vec<_>>(),
            &times.iter().collect::<Vec<_>>(),
            &categories.iter().collect::<Vec<_>>(),
        );
        assert!(exclusions.is_empty());
    }
}
