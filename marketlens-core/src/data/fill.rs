//! Gap filling — forward-fill then back-fill of missing numeric values.
//!
//! Filling destructively fabricates values for rows that had holes, so it is
//! a named, separately tested transformation rather than a side effect buried
//! in the loader. Callers must treat filled values as estimates.

use chrono::NaiveDate;

/// A coerced source row before gap filling.
///
/// `date` is always present (rows without a parsable date are dropped before
/// this stage); each numeric field is `None` where coercion failed.
#[derive(Debug, Clone, PartialEq)]
pub struct PartialBar {
    pub date: NaiveDate,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub close: Option<f64>,
    pub volume: Option<f64>,
}

impl PartialBar {
    /// True once every numeric field is populated.
    pub fn is_complete(&self) -> bool {
        self.open.is_some()
            && self.high.is_some()
            && self.low.is_some()
            && self.close.is_some()
            && self.volume.is_some()
    }
}

type FieldAccessor = fn(&mut PartialBar) -> &mut Option<f64>;

const FIELDS: [FieldAccessor; 5] = [
    |b| &mut b.open,
    |b| &mut b.high,
    |b| &mut b.low,
    |b| &mut b.close,
    |b| &mut b.volume,
];

/// Forward-fill each numeric field from the preceding row, then back-fill any
/// still-missing leading values from the first valid observation.
///
/// After this pass a field can only remain `None` if it was `None` in every
/// row; the loader drops such rows to keep the clean-bar invariant.
pub fn fill_gaps(rows: &mut [PartialBar]) {
    for field in FIELDS {
        forward_fill(rows, field);
        back_fill(rows, field);
    }
}

fn forward_fill(rows: &mut [PartialBar], field: FieldAccessor) {
    let mut last = None;
    for row in rows.iter_mut() {
        let slot = field(row);
        match *slot {
            Some(v) => last = Some(v),
            None => *slot = last,
        }
    }
}

/// Back-fill only ever has an effect on a leading run of gaps: forward-fill
/// already resolved everything after the first valid observation.
fn back_fill(rows: &mut [PartialBar], field: FieldAccessor) {
    let mut next = None;
    for row in rows.iter_mut().rev() {
        let slot = field(row);
        match *slot {
            Some(v) => next = Some(v),
            None => *slot = next,
        }
    }
}
