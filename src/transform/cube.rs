//! The value cube: a flat lookup from (time, area, category) to the
//! observed value, plus the time-range restriction applied before it is
//! populated.

use std::collections::{HashMap, HashSet};
use std::ops::{Range, RangeInclusive};

use tracing::debug;

use crate::document::Observation;

/// Selects a contiguous run of the metadata-ordered time codes.
///
/// Both endpoints are inclusive and may be negative, counting from the end
/// of the list: `TimeRange::new(-2, -1)` keeps the last two codes. A start
/// past the end selects nothing; an end past the last code clamps to it; an
/// end before the start selects nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    start: isize,
    end: isize,
}

impl TimeRange {
    pub fn new(start: isize, end: isize) -> Self {
        Self { start, end }
    }

    /// Keep only the last `n` time codes.
    pub fn last(n: usize) -> Self {
        if n == 0 {
            return Self::empty();
        }
        Self {
            start: -(n as isize),
            end: -1,
        }
    }

    /// Keep only the first `n` time codes.
    pub fn first(n: usize) -> Self {
        if n == 0 {
            return Self::empty();
        }
        Self {
            start: 0,
            end: n as isize - 1,
        }
    }

    // an inverted pair resolves to nothing at every length
    fn empty() -> Self {
        Self { start: 1, end: 0 }
    }

    /// Resolve against a list of `len` codes into half-open index bounds.
    /// The result is empty when the selection is out of range.
    pub fn resolve(&self, len: usize) -> Range<usize> {
        let len = len as isize;
        let mut start = self.start;
        if start < 0 {
            start += len;
        }
        if start < 0 || start > len {
            return 0..0;
        }
        let mut end = self.end;
        if end < 0 {
            end += len;
        }
        if end >= len {
            end = len - 1;
        }
        if end < start {
            return 0..0;
        }
        start as usize..(end + 1) as usize
    }
}

impl From<RangeInclusive<isize>> for TimeRange {
    fn from(range: RangeInclusive<isize>) -> Self {
        Self::new(*range.start(), *range.end())
    }
}

/// Sparse cube of observed values keyed by the (time, area, category)
/// composite, with explicit present/absent queries.
#[derive(Debug, Default)]
pub struct ValueCube {
    values: HashMap<(String, String, String), f64>,
    /// (time, area) pairs with at least one observation, whatever the
    /// category; backs the "no entry at all for this slice" query.
    slices: HashSet<(String, String)>,
}

impl ValueCube {
    /// Populate from the flat observation list.
    ///
    /// Observations whose time code is not in `eligible_times` are dropped
    /// here, before any other pruning. A duplicate triple overwrites the
    /// earlier value; neither case is an error. The observation string
    /// coerces to 0.0 when non-numeric (e-Stat publishes `"-"` for
    /// suppressed cells).
    pub fn build(observations: &[Observation], eligible_times: &HashSet<&str>) -> Self {
        let mut cube = Self::default();
        let mut dropped = 0usize;
        for obs in observations {
            if !eligible_times.contains(obs.time.as_str()) {
                dropped += 1;
                continue;
            }
            let value = obs.value.parse::<f64>().unwrap_or(0.0);
            cube.slices.insert((obs.time.clone(), obs.area.clone()));
            cube.values.insert(
                (obs.time.clone(), obs.area.clone(), obs.cat01.clone()),
                value,
            );
        }
        debug!(cells = cube.values.len(), dropped, "built value cube");
        cube
    }

    /// The observed value at the triple, if present.
    pub fn value(&self, time: &str, area: &str, category: &str) -> Option<f64> {
        self.values
            .get(&(time.to_string(), area.to_string(), category.to_string()))
            .copied()
    }

    /// Whether any observation exists for the (time, area) slice.
    pub fn has_slice(&self, time: &str, area: &str) -> bool {
        self.slices.contains(&(time.to_string(), area.to_string()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
