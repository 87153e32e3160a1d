use core_types::ProducerInterval;
use serde::Serialize;
use std::collections::BTreeMap;

/// Every producer with at least two wins, mapped to their intervals in
/// chronological order. Keys are ordered by producer name.
pub type ProducerIntervals = BTreeMap<String, Vec<ProducerInterval>>;

/// The intervals that hit the global minimum and maximum gap.
///
/// Both sides hold the complete tie set, not a single representative. They are
/// empty when no producer has won more than once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IntervalReport {
    pub min: Vec<ProducerInterval>,
    pub max: Vec<ProducerInterval>,
}

impl IntervalReport {
    /// An empty report.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.min.is_empty() && self.max.is_empty()
    }

    /// The shortest gap, if any interval exists.
    pub fn min_gap(&self) -> Option<u32> {
        self.min.first().map(ProducerInterval::gap)
    }

    /// The longest gap, if any interval exists.
    pub fn max_gap(&self) -> Option<u32> {
        self.max.first().map(ProducerInterval::gap)
    }
}
