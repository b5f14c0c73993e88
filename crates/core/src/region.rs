//! Region selection and target eligibility.
//!
//! The planner offers three kinds of "region" to pick from:
//!
//! - geographic regions, matched against `CallTarget::region`;
//! - virtual caller regions (`★ Clients {name}`), which select every target
//!   reserved for that caller;
//! - the special category (`🦷 ...`), which selects targets flagged with
//!   `wants_special_category`.
//!
//! Reserved display names are parsed once, here, into [`RegionSelector`]
//! values. Resolution then turns the selectors into an
//! [`EligibilityPredicate`] that both the in-process engine and the SQL
//! layer evaluate the same way.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::caller::Caller;
use crate::error::GenerateError;
use crate::target::CallTarget;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Reserved names
// ---------------------------------------------------------------------------

/// Prefix of the canonical virtual caller region name.
pub const VIRTUAL_CALLER_PREFIX: &str = "★ Clients ";

/// Localized prefix still produced by older planner clients.
const LEGACY_VIRTUAL_CALLER_PREFIX: &str = "★ Клиенти ";

/// Any region name starting with this marker selects the special category.
pub const SPECIAL_CATEGORY_MARKER: &str = "🦷";

/// Display name of the special category region.
pub const SPECIAL_CATEGORY_LABEL: &str = "🦷 Implants";

/// Display name of the virtual region holding `caller_name`'s clients.
pub fn virtual_caller_region(caller_name: &str) -> String {
    format!("{VIRTUAL_CALLER_PREFIX}{caller_name}")
}

// ---------------------------------------------------------------------------
// Selectors
// ---------------------------------------------------------------------------

/// One requested region, with the reserved-name convention decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegionSelector {
    Geographic(String),
    /// Caller name as written after the virtual prefix.
    VirtualCaller(String),
    SpecialCategory,
}

impl RegionSelector {
    /// Decode one raw region name. Blank names yield `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        let name = raw.trim();
        if name.is_empty() {
            return None;
        }
        if name.starts_with(SPECIAL_CATEGORY_MARKER) {
            return Some(Self::SpecialCategory);
        }
        // Trailing spaces were trimmed above, so match the prefixes without them.
        for prefix in [VIRTUAL_CALLER_PREFIX, LEGACY_VIRTUAL_CALLER_PREFIX] {
            let Some(rest) = name.strip_prefix(prefix.trim_end()) else {
                continue;
            };
            if rest.starts_with(char::is_whitespace) && !rest.trim().is_empty() {
                return Some(Self::VirtualCaller(rest.trim().to_string()));
            }
        }
        Some(Self::Geographic(name.to_string()))
    }
}

/// Requested regions grouped by selector kind, deduplicated, in request
/// order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegionSelection {
    pub geographic: Vec<String>,
    pub virtual_callers: Vec<String>,
    pub special_category: bool,
}

impl RegionSelection {
    pub fn parse<S: AsRef<str>>(names: &[S]) -> Self {
        let mut selection = Self::default();
        for selector in names.iter().filter_map(|n| RegionSelector::parse(n.as_ref())) {
            match selector {
                RegionSelector::Geographic(name) => push_unique(&mut selection.geographic, name),
                RegionSelector::VirtualCaller(name) => {
                    push_unique(&mut selection.virtual_callers, name)
                }
                RegionSelector::SpecialCategory => selection.special_category = true,
            }
        }
        selection
    }

    pub fn is_empty(&self) -> bool {
        self.geographic.is_empty() && self.virtual_callers.is_empty() && !self.special_category
    }
}

fn push_unique(list: &mut Vec<String>, value: String) {
    if !list.contains(&value) {
        list.push(value);
    }
}

// ---------------------------------------------------------------------------
// Predicate
// ---------------------------------------------------------------------------

/// Eligibility of a target for one run.
///
/// The region part is an OR of three sub-predicates (virtual caller, special
/// category, geographic). The city part, when present, is ANDed on top.
/// With no region selectors at all the region part matches every target.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EligibilityPredicate {
    pub geographic: Vec<String>,
    pub virtual_caller_ids: Vec<DbId>,
    pub special_category: bool,
    /// Trimmed, non-empty city substrings.
    pub city_substrings: Vec<String>,
}

impl EligibilityPredicate {
    pub fn has_region_filter(&self) -> bool {
        !self.geographic.is_empty() || !self.virtual_caller_ids.is_empty() || self.special_category
    }

    pub fn has_city_filter(&self) -> bool {
        !self.city_substrings.is_empty()
    }

    /// Neither regions nor cities were requested.
    pub fn is_unrestricted(&self) -> bool {
        !self.has_region_filter() && !self.has_city_filter()
    }

    /// Full eligibility: unresolved and within the requested scope.
    pub fn matches(&self, target: &CallTarget) -> bool {
        !target.is_resolved && self.in_scope(target)
    }

    /// Region and city scope only, regardless of call history.
    pub fn in_scope(&self, target: &CallTarget) -> bool {
        self.matches_regions(target)
            && (!self.has_city_filter() || target.serves_any_city(&self.city_substrings))
    }

    fn matches_regions(&self, target: &CallTarget) -> bool {
        if !self.has_region_filter() {
            return true;
        }

        let pulled_in = |id: DbId| self.virtual_caller_ids.contains(&id);
        // A reserved target only escapes its reservation through its own
        // caller's virtual region.
        let unreserved = target.preferred_caller_id.map_or(true, pulled_in);

        let virtual_hit = target.preferred_caller_id.is_some_and(pulled_in);
        let special_hit = self.special_category && target.wants_special_category && unreserved;
        let geographic_hit = self.geographic.contains(&target.region) && unreserved;

        virtual_hit || special_hit || geographic_hit
    }
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// Trim names, drop blanks and duplicates, keep request order.
pub fn normalize_names<S: AsRef<str>>(names: &[S]) -> Vec<String> {
    let mut out = Vec::new();
    for name in names {
        let name = name.as_ref().trim();
        if !name.is_empty() {
            push_unique(&mut out, name.to_string());
        }
    }
    out
}

/// Find the caller a virtual region refers to: display name first, then
/// account name.
pub fn resolve_caller_name<'a>(name: &str, directory: &'a [Caller]) -> Option<&'a Caller> {
    directory
        .iter()
        .find(|c| c.display_name.as_deref().map(str::trim) == Some(name))
        .or_else(|| directory.iter().find(|c| c.username == name))
}

/// Turn a parsed selection into an eligibility predicate.
///
/// `directory` is every caller a virtual region may name. When
/// `explicit_callers` is non-empty, every caller pulled in through a
/// virtual region must be part of it; otherwise their reserved targets
/// would be selected with nobody to receive them.
pub fn resolve(
    selection: &RegionSelection,
    cities: &[String],
    directory: &[Caller],
    explicit_callers: &[DbId],
) -> Result<EligibilityPredicate, GenerateError> {
    let mut virtual_caller_ids = Vec::with_capacity(selection.virtual_callers.len());
    let mut missing = BTreeSet::new();

    for name in &selection.virtual_callers {
        let caller = resolve_caller_name(name, directory).ok_or_else(|| {
            GenerateError::InvalidRequest(format!("Unknown caller in virtual region: {name}"))
        })?;

        if !explicit_callers.is_empty() && !explicit_callers.contains(&caller.id) {
            missing.insert(caller.label().to_string());
        }
        if !virtual_caller_ids.contains(&caller.id) {
            virtual_caller_ids.push(caller.id);
        }
    }

    if !missing.is_empty() {
        return Err(GenerateError::RegionCallerMismatch {
            callers: missing.into_iter().collect(),
        });
    }

    Ok(EligibilityPredicate {
        geographic: selection.geographic.clone(),
        virtual_caller_ids,
        special_category: selection.special_category,
        city_substrings: normalize_names(cities),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn target(id: DbId, region: &str, preferred: Option<DbId>) -> CallTarget {
        let mut t = CallTarget::new(id, region);
        t.preferred_caller_id = preferred;
        t
    }

    fn directory() -> Vec<Caller> {
        let mut alice = Caller::new(1, "alice", 10);
        alice.display_name = Some("Alice".into());
        let bob = Caller::new(2, "bob", 10);
        vec![alice, bob]
    }

    // -- parsing --------------------------------------------------------------

    #[test]
    fn parse_geographic() {
        assert_eq!(
            RegionSelector::parse("  Plovdiv "),
            Some(RegionSelector::Geographic("Plovdiv".into()))
        );
    }

    #[test]
    fn parse_virtual_caller() {
        assert_eq!(
            RegionSelector::parse("★ Clients Alice"),
            Some(RegionSelector::VirtualCaller("Alice".into()))
        );
        assert_eq!(
            RegionSelector::parse("★ Клиенти bob"),
            Some(RegionSelector::VirtualCaller("bob".into()))
        );
    }

    #[test]
    fn parse_special_category() {
        assert_eq!(
            RegionSelector::parse("🦷 Импланти"),
            Some(RegionSelector::SpecialCategory)
        );
        assert_eq!(
            RegionSelector::parse(SPECIAL_CATEGORY_LABEL),
            Some(RegionSelector::SpecialCategory)
        );
    }

    #[test]
    fn parse_blank_is_none() {
        assert_eq!(RegionSelector::parse("   "), None);
    }

    #[test]
    fn virtual_prefix_without_name_is_geographic() {
        assert_eq!(
            RegionSelector::parse("★ Clients "),
            Some(RegionSelector::Geographic("★ Clients".into()))
        );
    }

    #[test]
    fn selection_groups_and_dedupes() {
        let selection = RegionSelection::parse(&[
            "Sofia",
            "★ Clients Alice",
            "Sofia",
            "🦷 Implants",
            "",
        ]);
        assert_eq!(selection.geographic, vec!["Sofia".to_string()]);
        assert_eq!(selection.virtual_callers, vec!["Alice".to_string()]);
        assert!(selection.special_category);
    }

    #[test]
    fn virtual_region_label_round_trips() {
        let label = virtual_caller_region("Alice");
        assert_eq!(
            RegionSelector::parse(&label),
            Some(RegionSelector::VirtualCaller("Alice".into()))
        );
    }

    // -- resolution -----------------------------------------------------------

    #[test]
    fn resolves_display_name_before_username() {
        let mut dir = directory();
        // Bob's display name collides with Alice's account name.
        dir[1].display_name = Some("alice".into());
        let found = resolve_caller_name("alice", &dir).unwrap();
        assert_eq!(found.id, 2);
    }

    #[test]
    fn resolves_username_fallback() {
        let dir = directory();
        let found = resolve_caller_name("bob", &dir).unwrap();
        assert_eq!(found.id, 2);
    }

    #[test]
    fn unknown_virtual_caller_is_invalid_request() {
        let selection = RegionSelection::parse(&["★ Clients Zed"]);
        let err = resolve(&selection, &[], &directory(), &[]).unwrap_err();
        assert_matches!(err, GenerateError::InvalidRequest(_));
    }

    #[test]
    fn virtual_caller_outside_selection_is_mismatch() {
        let selection = RegionSelection::parse(&["★ Clients Alice"]);
        let err = resolve(&selection, &[], &directory(), &[2]).unwrap_err();
        assert_matches!(
            err,
            GenerateError::RegionCallerMismatch { callers } if callers == vec!["Alice".to_string()]
        );
    }

    #[test]
    fn virtual_caller_inside_selection_resolves() {
        let selection = RegionSelection::parse(&["★ Clients Alice"]);
        let predicate = resolve(&selection, &[], &directory(), &[1, 2]).unwrap();
        assert_eq!(predicate.virtual_caller_ids, vec![1]);
    }

    #[test]
    fn no_explicit_selection_skips_validation() {
        let selection = RegionSelection::parse(&["★ Clients Alice"]);
        assert!(resolve(&selection, &[], &directory(), &[]).is_ok());
    }

    #[test]
    fn cities_are_trimmed() {
        let selection = RegionSelection::default();
        let cities = vec![" Varna ".to_string(), "".to_string()];
        let predicate = resolve(&selection, &cities, &directory(), &[]).unwrap();
        assert_eq!(predicate.city_substrings, vec!["Varna".to_string()]);
    }

    // -- matching -------------------------------------------------------------

    #[test]
    fn unrestricted_matches_everything_unresolved() {
        let predicate = EligibilityPredicate::default();
        assert!(predicate.is_unrestricted());
        assert!(predicate.matches(&target(1, "Sofia", Some(9))));

        let mut resolved = target(2, "Sofia", None);
        resolved.is_resolved = true;
        assert!(!predicate.matches(&resolved));
    }

    #[test]
    fn geographic_excludes_reserved_targets() {
        let predicate = EligibilityPredicate {
            geographic: vec!["Sofia".into()],
            ..Default::default()
        };
        assert!(predicate.matches(&target(1, "Sofia", None)));
        assert!(!predicate.matches(&target(2, "Sofia", Some(1))));
        assert!(!predicate.matches(&target(3, "Varna", None)));
    }

    #[test]
    fn geographic_keeps_targets_of_pulled_in_callers() {
        let predicate = EligibilityPredicate {
            geographic: vec!["Sofia".into()],
            virtual_caller_ids: vec![1],
            ..Default::default()
        };
        assert!(predicate.matches(&target(1, "Sofia", Some(1))));
        assert!(!predicate.matches(&target(2, "Sofia", Some(2))));
    }

    #[test]
    fn virtual_caller_matches_any_region() {
        let predicate = EligibilityPredicate {
            virtual_caller_ids: vec![1],
            ..Default::default()
        };
        assert!(predicate.matches(&target(1, "Varna", Some(1))));
        assert!(!predicate.matches(&target(2, "Varna", None)));
    }

    #[test]
    fn special_category_respects_reservations() {
        let predicate = EligibilityPredicate {
            special_category: true,
            ..Default::default()
        };
        let mut open = target(1, "Varna", None);
        open.wants_special_category = true;
        let mut reserved = target(2, "Varna", Some(2));
        reserved.wants_special_category = true;
        let plain = target(3, "Varna", None);

        assert!(predicate.matches(&open));
        assert!(!predicate.matches(&reserved));
        assert!(!predicate.matches(&plain));
    }

    #[test]
    fn city_filter_is_anded() {
        let predicate = EligibilityPredicate {
            geographic: vec!["Sofia".into()],
            city_substrings: vec!["Bank".into()],
            ..Default::default()
        };
        let mut inside = target(1, "Sofia", None);
        inside.cities = vec!["Bankya".into()];
        let mut outside = target(2, "Sofia", None);
        outside.cities = vec!["Sofia".into()];

        assert!(predicate.matches(&inside));
        assert!(!predicate.matches(&outside));
    }

    #[test]
    fn city_filter_alone_covers_all_regions() {
        let predicate = EligibilityPredicate {
            city_substrings: vec!["Bank".into()],
            ..Default::default()
        };
        let mut t = target(1, "Anywhere", Some(4));
        t.cities = vec!["Bankya".into()];
        assert!(predicate.matches(&t));
    }
}
