//! Generation request validation.
//!
//! Converts the loosely-typed request coming from the invoking layer into
//! the checked parameters of one run. This is the only place raw region
//! names are decoded.

use chrono::NaiveDate;

use crate::campaign::MAX_CAMPAIGN_NAME_LEN;
use crate::date_range::DateRange;
use crate::error::GenerateError;
use crate::region::{normalize_names, RegionSelection};
use crate::types::DbId;

/// Days generated when the request does not say.
pub const DEFAULT_DAYS: u32 = 7;

/// Smallest accepted run length.
pub const MIN_DAYS: u32 = 1;

/// Largest accepted run length.
pub const MAX_DAYS: u32 = 30;

/// A schedule generation request as received from the invoking layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerateRequest {
    pub start_date: Option<NaiveDate>,
    pub days: Option<u32>,
    /// Geographic names and reserved virtual region names, mixed.
    pub regions: Vec<String>,
    pub cities: Vec<String>,
    /// Explicit caller selection. Empty means every active caller.
    pub caller_ids: Vec<DbId>,
    pub append: bool,
    pub campaign_name: Option<String>,
}

/// Checked parameters of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunParameters {
    pub range: DateRange,
    pub selection: RegionSelection,
    /// Trimmed, deduplicated region names as requested (for the campaign).
    pub region_names: Vec<String>,
    pub cities: Vec<String>,
    /// Deduplicated, in selection order.
    pub caller_ids: Vec<DbId>,
    pub append: bool,
    pub campaign_name: Option<String>,
}

/// Parse a `YYYY-MM-DD` start date.
pub fn parse_start_date(raw: &str) -> Result<NaiveDate, GenerateError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| {
        GenerateError::InvalidRequest(format!(
            "Invalid start_date '{raw}' (expected YYYY-MM-DD)"
        ))
    })
}

impl GenerateRequest {
    pub fn validate(&self) -> Result<RunParameters, GenerateError> {
        let start = self
            .start_date
            .ok_or_else(|| GenerateError::InvalidRequest("start_date is required".to_string()))?;

        let days = self.days.unwrap_or(DEFAULT_DAYS);
        if !(MIN_DAYS..=MAX_DAYS).contains(&days) {
            return Err(GenerateError::InvalidRequest(format!(
                "days must be between {MIN_DAYS} and {MAX_DAYS}, got {days}"
            )));
        }
        let range = DateRange::new(start, days)?;

        if let Some(name) = &self.campaign_name {
            if name.trim().chars().count() > MAX_CAMPAIGN_NAME_LEN {
                return Err(GenerateError::InvalidRequest(format!(
                    "campaign_name must not exceed {MAX_CAMPAIGN_NAME_LEN} characters"
                )));
            }
        }

        let mut caller_ids = Vec::with_capacity(self.caller_ids.len());
        for id in &self.caller_ids {
            if !caller_ids.contains(id) {
                caller_ids.push(*id);
            }
        }

        Ok(RunParameters {
            range,
            selection: RegionSelection::parse(&self.regions),
            region_names: normalize_names(&self.regions),
            cities: normalize_names(&self.cities),
            caller_ids,
            append: self.append,
            campaign_name: self.campaign_name.clone(),
        })
    }
}
