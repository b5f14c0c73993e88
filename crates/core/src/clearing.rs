//! Scope of the assignments a regeneration run replaces.

use chrono::NaiveDate;
use serde::Serialize;

use crate::date_range::DateRange;
use crate::region::EligibilityPredicate;
use crate::target::CallTarget;
use crate::types::DbId;

/// Which existing assignments a non-append run deletes.
///
/// Always bounded by the run's date range. Narrowed further to the
/// explicitly selected callers, and to targets inside the requested
/// region/city scope, whenever those were given. Both narrowings apply
/// together when both are present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClearScope {
    pub range: DateRange,
    /// Empty means every caller.
    pub caller_ids: Vec<DbId>,
    /// `None` means every target.
    pub target_scope: Option<EligibilityPredicate>,
}

impl ClearScope {
    pub fn for_run(
        range: DateRange,
        explicit_callers: &[DbId],
        predicate: &EligibilityPredicate,
    ) -> Self {
        Self {
            range,
            caller_ids: explicit_callers.to_vec(),
            target_scope: (!predicate.is_unrestricted()).then(|| predicate.clone()),
        }
    }

    /// Whether an existing assignment falls inside the scope.
    pub fn covers(&self, date: NaiveDate, caller_id: DbId, target: &CallTarget) -> bool {
        self.range.contains(date)
            && (self.caller_ids.is_empty() || self.caller_ids.contains(&caller_id))
            && self
                .target_scope
                .as_ref()
                .map_or(true, |scope| scope.in_scope(target))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, d).unwrap()
    }

    fn week() -> DateRange {
        DateRange::new(day(2), 7).unwrap()
    }

    #[test]
    fn unrestricted_run_clears_whole_range() {
        let scope = ClearScope::for_run(week(), &[], &EligibilityPredicate::default());
        let target = CallTarget::new(1, "Varna");

        assert!(scope.target_scope.is_none());
        assert!(scope.covers(day(2), 7, &target));
        assert!(scope.covers(day(8), 9, &target));
        assert!(!scope.covers(day(9), 7, &target));
        assert!(!scope.covers(day(1), 7, &target));
    }

    #[test]
    fn caller_selection_narrows_scope() {
        let scope = ClearScope::for_run(week(), &[7], &EligibilityPredicate::default());
        let target = CallTarget::new(1, "Varna");

        assert!(scope.covers(day(3), 7, &target));
        assert!(!scope.covers(day(3), 8, &target));
    }

    #[test]
    fn region_filter_narrows_scope() {
        let predicate = EligibilityPredicate {
            geographic: vec!["Sofia".into()],
            ..Default::default()
        };
        let scope = ClearScope::for_run(week(), &[], &predicate);

        assert!(scope.covers(day(3), 7, &CallTarget::new(1, "Sofia")));
        assert!(!scope.covers(day(3), 7, &CallTarget::new(2, "Varna")));
    }

    #[test]
    fn both_narrowings_must_hold() {
        let predicate = EligibilityPredicate {
            geographic: vec!["Sofia".into()],
            ..Default::default()
        };
        let scope = ClearScope::for_run(week(), &[7], &predicate);
        let sofia = CallTarget::new(1, "Sofia");

        assert!(scope.covers(day(3), 7, &sofia));
        assert!(!scope.covers(day(3), 8, &sofia));
        assert!(!scope.covers(day(3), 7, &CallTarget::new(2, "Varna")));
    }

    #[test]
    fn resolved_targets_stay_in_scope() {
        let predicate = EligibilityPredicate {
            geographic: vec!["Sofia".into()],
            ..Default::default()
        };
        let scope = ClearScope::for_run(week(), &[], &predicate);
        let mut resolved = CallTarget::new(1, "Sofia");
        resolved.is_resolved = true;

        assert!(scope.covers(day(3), 7, &resolved));
    }
}
