//! Administrative-area pruning.
//!
//! Three stages in fixed order (level filter, then parent-presence, then
//! child-presence), each a pure function from the surviving set to a new
//! surviving set plus the codes it excluded. A stage only ever sees the
//! previous stage's survivors, so nothing re-enters once excluded.

use std::collections::HashSet;

use tracing::debug;

use super::axis::AxisEntry;

/// Apply the configured stages in fixed order. Enabling both the parent and
/// the child filter composes them sequentially (the child filter operates on
/// the parent filter's survivors), which is kept as-is even where the
/// combination looks redundant.
pub fn select_areas<'a>(
    areas: &'a [AxisEntry],
    skip_level: &HashSet<i64>,
    skip_parent_area: bool,
    skip_child_area: bool,
) -> Vec<&'a AxisEntry> {
    let surviving: Vec<&AxisEntry> = areas.iter().collect();

    let (surviving, excluded) = drop_levels(surviving, skip_level);
    debug!(
        stage = "level",
        excluded = excluded.len(),
        surviving = surviving.len(),
        "area filter"
    );

    let surviving = if skip_parent_area {
        let (surviving, excluded) = drop_parents(surviving);
        debug!(
            stage = "parent",
            excluded = excluded.len(),
            surviving = surviving.len(),
            "area filter"
        );
        surviving
    } else {
        surviving
    };

    if skip_child_area {
        let (surviving, excluded) = drop_children(surviving);
        debug!(
            stage = "child",
            excluded = excluded.len(),
            surviving = surviving.len(),
            "area filter"
        );
        surviving
    } else {
        surviving
    }
}

/// Drop areas whose level is in the skip set. An area without a numeric
/// level counts as level 0.
pub(crate) fn drop_levels<'a>(
    areas: Vec<&'a AxisEntry>,
    skip: &HashSet<i64>,
) -> (Vec<&'a AxisEntry>, Vec<String>) {
    partition_surviving(areas, |area| !skip.contains(&area.level_or_zero()))
}

/// Drop every area that is the parent of another present area, keeping only
/// leaves relative to the current surviving set.
pub(crate) fn drop_parents(areas: Vec<&AxisEntry>) -> (Vec<&AxisEntry>, Vec<String>) {
    let codes: HashSet<&str> = areas.iter().map(|area| area.code.as_str()).collect();
    let parents: HashSet<&str> = areas
        .iter()
        .filter_map(|area| area.parent_code.as_deref())
        .filter(|parent| codes.contains(parent))
        .collect();
    partition_surviving(areas, |area| !parents.contains(area.code.as_str()))
}

/// Drop every area whose parent is present, keeping only roots relative to
/// the current surviving set.
pub(crate) fn drop_children(areas: Vec<&AxisEntry>) -> (Vec<&AxisEntry>, Vec<String>) {
    let codes: HashSet<&str> = areas.iter().map(|area| area.code.as_str()).collect();
    partition_surviving(areas, |area| {
        !area
            .parent_code
            .as_deref()
            .map_or(false, |parent| codes.contains(parent))
    })
}

fn partition_surviving<'a>(
    areas: Vec<&'a AxisEntry>,
    keep: impl Fn(&AxisEntry) -> bool,
) -> (Vec<&'a AxisEntry>, Vec<String>) {
    let (kept, dropped): (Vec<&AxisEntry>, Vec<&AxisEntry>) =
        areas.into_iter().partition(|area| keep(area));
    let excluded = dropped.into_iter().map(|area| area.code.clone()).collect();
    (kept, excluded)
}
