//! Round-robin distribution of pooled targets onto (caller, day) slots.
//!
//! For every day in the range, every participant in order, and every slot
//! up to the participant's daily target:
//!
//! 1. take the next unused target from the participant's preferred pool;
//! 2. otherwise take the next unused target from the shared common pool;
//! 3. otherwise leave the slot empty.
//!
//! Cursors only ever move forward, so one run is linear in the pool sizes.
//! A single `used` set guarantees no target is handed out twice, whatever
//! the pools contain.

use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::NaiveDate;
use serde::Serialize;

use crate::caller::Caller;
use crate::date_range::DateRange;
use crate::pool::Pools;
use crate::types::DbId;

/// One (date, target, caller) triple produced by a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlannedAssignment {
    pub date: NaiveDate,
    pub target_id: DbId,
    pub caller_id: DbId,
}

/// Result of a distribution pass.
#[derive(Debug, Clone, Default)]
pub struct Distribution {
    /// Assignments in allocation order (day, then caller, then slot).
    pub assignments: Vec<PlannedAssignment>,
    /// Number of assignments per target region.
    pub touched_regions: BTreeMap<String, usize>,
    /// Final position of the shared common-pool cursor.
    pub common_cursor: usize,
    /// Final position of each preferred-pool cursor.
    pub preferred_cursors: HashMap<DbId, usize>,
}

impl Distribution {
    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    /// Assignments given to `caller_id` on `date`.
    pub fn count_for(&self, caller_id: DbId, date: NaiveDate) -> usize {
        self.assignments
            .iter()
            .filter(|a| a.caller_id == caller_id && a.date == date)
            .count()
    }
}

/// Read position into one pool.
#[derive(Debug, Default)]
struct Cursor {
    position: usize,
}

impl Cursor {
    /// Advance past used entries and claim the next unused one.
    fn claim(
        &mut self,
        pool: &[usize],
        pools: &Pools,
        used: &mut HashSet<DbId>,
    ) -> Option<usize> {
        while let Some(&index) = pool.get(self.position) {
            self.position += 1;
            if used.insert(pools.target(index).id) {
                return Some(index);
            }
        }
        None
    }

    fn exhausted(&self, pool: &[usize]) -> bool {
        self.position >= pool.len()
    }
}

/// Allocate pooled targets to `participants` over `range`.
///
/// Participants are served in slice order each day. Slots that cannot be
/// filled are skipped; running out of targets is not an error.
pub fn distribute(pools: &Pools, participants: &[Caller], range: &DateRange) -> Distribution {
    let mut used: HashSet<DbId> = HashSet::with_capacity(pools.assignable());
    let mut common = Cursor::default();
    let mut preferred: HashMap<DbId, Cursor> = participants
        .iter()
        .map(|c| (c.id, Cursor::default()))
        .collect();
    let mut out = Distribution::default();

    for date in range.dates() {
        for caller in participants {
            let own_pool = pools.preferred_for(caller.id);
            let own = preferred.entry(caller.id).or_default();

            for _slot in 0..caller.daily_target {
                let claimed = own
                    .claim(own_pool, pools, &mut used)
                    .or_else(|| common.claim(&pools.common, pools, &mut used));

                let Some(index) = claimed else {
                    // Both pools are drained for this caller; the remaining
                    // slots would stay empty too.
                    debug_assert!(own.exhausted(own_pool) && common.exhausted(&pools.common));
                    break;
                };

                let target = pools.target(index);
                out.assignments.push(PlannedAssignment {
                    date,
                    target_id: target.id,
                    caller_id: caller.id,
                });
                *out.touched_regions.entry(target.region.clone()).or_insert(0) += 1;
            }
        }
    }

    out.common_cursor = common.position;
    out.preferred_cursors = preferred
        .into_iter()
        .map(|(id, cursor)| (id, cursor.position))
        .collect();
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
