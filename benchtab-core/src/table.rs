//! Results Table
//!
//! In-memory shape of one collection pass:
//! - `ResultsTable`: `param -> bench name -> point estimate (ns)`
//! - `RunWindow`: earliest/latest modification time of the accepted files

use crate::error::ResultsError;
use chrono::{DateTime, Local, TimeDelta};
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::time::SystemTime;

/// Point estimates keyed by benchmark parameter, then benchmark name
///
/// Each `(param, name)` pair holds at most one estimate.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultsTable {
    rows: BTreeMap<u64, BTreeMap<String, f64>>,
}

impl ResultsTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the estimate for `(param, name)`.
    ///
    /// Fails if the pair already has an estimate; the previous value is kept.
    pub fn insert(
        &mut self,
        param: u64,
        name: impl Into<String>,
        estimate_ns: f64,
    ) -> Result<(), ResultsError> {
        let name = name.into();
        match self.rows.entry(param).or_default().entry(name) {
            Entry::Occupied(slot) => Err(ResultsError::DuplicateMeasurement {
                name: slot.key().clone(),
                param,
            }),
            Entry::Vacant(slot) => {
                slot.insert(estimate_ns);
                Ok(())
            }
        }
    }

    /// Estimate for `(param, name)`, if measured
    pub fn get(&self, param: u64, name: &str) -> Option<f64> {
        self.rows.get(&param)?.get(name).copied()
    }

    /// All estimates measured at `param`, keyed by benchmark name
    pub fn row(&self, param: u64) -> Option<&BTreeMap<String, f64>> {
        self.rows.get(&param)
    }

    /// Distinct parameters in ascending order
    pub fn params(&self) -> impl Iterator<Item = u64> + '_ {
        self.rows.keys().copied()
    }

    /// Number of stored estimates
    pub fn len(&self) -> usize {
        self.rows.values().map(BTreeMap::len).sum()
    }

    /// Whether no estimate has been stored
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Runs spanning more than this are flagged as possibly coming from different builds
pub const STALE_AFTER: TimeDelta = TimeDelta::days(1);

/// Modification time span of the accepted result files
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunWindow {
    /// Oldest accepted file
    pub earliest: DateTime<Local>,
    /// Newest accepted file
    pub latest: DateTime<Local>,
}

impl RunWindow {
    /// Time between the oldest and newest accepted file
    pub fn span(&self) -> TimeDelta {
        self.latest - self.earliest
    }

    /// Whether the span exceeds [`STALE_AFTER`]
    pub fn is_stale(&self) -> bool {
        self.span() > STALE_AFTER
    }
}

/// Running min/max over file modification times
#[derive(Debug, Default)]
pub(crate) struct WindowTracker {
    bounds: Option<(SystemTime, SystemTime)>,
}

impl WindowTracker {
    pub(crate) fn observe(&mut self, modified: SystemTime) {
        self.bounds = Some(match self.bounds {
            Some((earliest, latest)) => (earliest.min(modified), latest.max(modified)),
            None => (modified, modified),
        });
    }

    pub(crate) fn finish(self) -> Option<RunWindow> {
        self.bounds.map(|(earliest, latest)| RunWindow {
            earliest: earliest.into(),
            latest: latest.into(),
        })
    }
}
