//! Region catalogue offered to the schedule planner.
//!
//! Lists every region name a generation request may use, with the number of
//! unresolved targets each one would make available. Virtual caller regions
//! come first, then the special category, then geographic regions.

use serde::Serialize;

use crate::region::{virtual_caller_region, SPECIAL_CATEGORY_LABEL};

/// Unresolved targets reserved for one caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerAvailability {
    pub caller_label: String,
    pub available: i64,
}

/// Unresolved targets in one geographic region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeographicAvailability {
    pub region: String,
    pub available: i64,
    /// How many of `available` are reserved for a preferred caller.
    pub reserved: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RegionKind {
    VirtualCaller,
    SpecialCategory,
    Geographic,
}

/// One selectable region name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegionOption {
    /// Exact name to send back in a generation request.
    pub name: String,
    pub kind: RegionKind,
    /// Targets a plain selection of this region would pick up.
    pub available_targets: i64,
    /// Targets in the region held for a preferred caller (geographic only).
    pub reserved_targets: i64,
}

/// Assemble the planner catalogue.
///
/// Callers with no reserved targets and an empty special category are left
/// out. Geographic counts exclude reserved targets, since a plain regional
/// selection never picks them up.
pub fn build_region_catalogue(
    callers: &[CallerAvailability],
    special_available: i64,
    regions: &[GeographicAvailability],
) -> Vec<RegionOption> {
    let virtual_options = callers
        .iter()
        .filter(|c| c.available > 0)
        .map(|c| RegionOption {
            name: virtual_caller_region(&c.caller_label),
            kind: RegionKind::VirtualCaller,
            available_targets: c.available,
            reserved_targets: 0,
        });

    let special_option = (special_available > 0).then(|| RegionOption {
        name: SPECIAL_CATEGORY_LABEL.to_string(),
        kind: RegionKind::SpecialCategory,
        available_targets: special_available,
        reserved_targets: 0,
    });

    let geographic_options = regions.iter().map(|r| RegionOption {
        name: r.region.clone(),
        kind: RegionKind::Geographic,
        available_targets: (r.available - r.reserved).max(0),
        reserved_targets: r.reserved,
    });

    virtual_options
        .chain(special_option)
        .chain(geographic_options)
        .collect()
}
