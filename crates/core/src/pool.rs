//! Pool partitioning and priority ordering.
//!
//! Targets live in a single arena ([`Pools::targets`]); pools are lists of
//! indices into it. The arena is sorted by priority before partitioning, so
//! every pool inherits the same order.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::caller::Caller;
use crate::target::CallTarget;
use crate::types::DbId;

/// Priority order shared by every pool:
///
/// 1. pending callbacks first,
/// 2. then targets never contacted,
/// 3. then the longest idle (oldest last contact first).
pub fn priority_cmp(a: &CallTarget, b: &CallTarget) -> Ordering {
    b.has_pending_callback
        .cmp(&a.has_pending_callback)
        .then_with(|| b.was_never_contacted().cmp(&a.was_never_contacted()))
        .then_with(|| a.last_contacted_at.cmp(&b.last_contacted_at))
}

/// Targets of one run, partitioned into the common pool and one preferred
/// pool per participating caller.
#[derive(Debug, Clone, Default)]
pub struct Pools {
    /// Eligible targets in priority order.
    pub targets: Vec<CallTarget>,
    /// Indices of targets without an effective preferred caller.
    pub common: Vec<usize>,
    /// Indices of targets reserved for each participating caller.
    pub preferred: HashMap<DbId, Vec<usize>>,
    /// Targets held back because their preferred caller is not in the run.
    pub reserved: usize,
}

impl Pools {
    pub fn preferred_for(&self, caller_id: DbId) -> &[usize] {
        self.preferred
            .get(&caller_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Targets that can actually be handed out this run.
    pub fn assignable(&self) -> usize {
        self.common.len() + self.preferred.values().map(Vec::len).sum::<usize>()
    }

    pub fn target(&self, index: usize) -> &CallTarget {
        &self.targets[index]
    }
}

/// Sort `targets` by priority and split them between the common pool and
/// the participants' preferred pools.
///
/// The sort is stable, so ties keep the order the store returned. Resolved
/// targets are dropped. A target whose preferred caller is not among
/// `participants` goes to neither pool.
pub fn build_pools(mut targets: Vec<CallTarget>, participants: &[Caller]) -> Pools {
    targets.retain(|t| !t.is_resolved);
    targets.sort_by(priority_cmp);

    let mut preferred: HashMap<DbId, Vec<usize>> =
        participants.iter().map(|c| (c.id, Vec::new())).collect();
    let mut common = Vec::new();
    let mut reserved = 0;

    for (index, target) in targets.iter().enumerate() {
        match target.preferred_caller_id {
            None => common.push(index),
            Some(caller_id) => match preferred.get_mut(&caller_id) {
                Some(pool) => pool.push(index),
                None => reserved += 1,
            },
        }
    }

    Pools {
        targets,
        common,
        preferred,
        reserved,
    }
}
