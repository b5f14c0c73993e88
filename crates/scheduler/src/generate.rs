//! One schedule generation run.

use std::collections::BTreeMap;

use callplan_core::caller::{requested_capacity, select_participants};
use callplan_core::campaign::{campaign_display_name, NewCampaign};
use callplan_core::clearing::ClearScope;
use callplan_core::distribution::distribute;
use callplan_core::error::GenerateError;
use callplan_core::pool::build_pools;
use callplan_core::region;
use callplan_core::request::GenerateRequest;
use callplan_core::types::DbId;
use chrono::NaiveDate;
use serde::Serialize;

use crate::error::StoreError;
use crate::store::{ScheduleBatch, ScheduleStore};

/// Result of a committed run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationSummary {
    pub campaign_id: DbId,
    pub campaign_name: String,
    pub assignment_count: usize,
    /// Assignments per target region.
    pub touched_regions: BTreeMap<String, usize>,
    /// Eligible targets found before pooling.
    pub available_targets: usize,
    /// `sum(daily_target) * days` over the participating callers.
    pub requested_capacity: u64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub days: u32,
    pub cleared_assignments: u64,
    /// Participating callers by username, in slot order.
    pub callers: Vec<String>,
    pub append: bool,
}

fn storage(err: StoreError) -> GenerateError {
    GenerateError::StorageFailure(Box::new(err))
}

/// Run one generation request against `store`.
///
/// Nothing is written unless every check passes, and the final write is a
/// single atomic commit: either the clear, the campaign and all of its
/// assignments land together or none of them do.
pub async fn generate<S>(store: &S, request: &GenerateRequest) -> Result<GenerationSummary, GenerateError>
where
    S: ScheduleStore + ?Sized,
{
    let params = request.validate()?;
    let range = params.range;

    tracing::info!(
        start_date = %range.start(),
        days = range.days(),
        regions = params.region_names.len(),
        cities = params.cities.len(),
        callers = params.caller_ids.len(),
        append = params.append,
        "Generating schedule",
    );

    // -- Callers ---

    let callers = store
        .schedulable_callers(&params.caller_ids)
        .await
        .map_err(storage)?;
    let participants = select_participants(callers, &params.caller_ids);
    if participants.is_empty() {
        tracing::warn!("No schedulable callers for run");
        return Err(GenerateError::NoCallersConfigured);
    }
    let capacity = requested_capacity(&participants, range.days());

    // -- Eligibility ---

    let directory = store.caller_directory().await.map_err(storage)?;
    let predicate = region::resolve(
        &params.selection,
        &params.cities,
        &directory,
        &params.caller_ids,
    )?;

    for id in &predicate.virtual_caller_ids {
        if !participants.iter().any(|c| c.id == *id) {
            tracing::warn!(
                caller_id = *id,
                "Virtual region caller has no quota; their targets stay unassigned",
            );
        }
    }

    let targets = store
        .eligible_targets(&predicate)
        .await
        .map_err(storage)?;
    if targets.is_empty() {
        tracing::warn!(requested_capacity = capacity, "No available targets for run");
        return Err(GenerateError::NoAvailableTargets {
            requested_capacity: capacity,
        });
    }
    let available_targets = targets.len();

    // -- Distribution ---

    let pools = build_pools(targets, &participants);
    tracing::debug!(
        common = pools.common.len(),
        preferred = pools.assignable() - pools.common.len(),
        reserved = pools.reserved,
        "Pools built",
    );

    let distribution = distribute(&pools, &participants, &range);
    if (distribution.len() as u64) < capacity {
        tracing::warn!(
            assigned = distribution.len(),
            requested_capacity = capacity,
            "Target pools exhausted before all slots were filled",
        );
    }

    // -- Commit ---

    let campaign_name = campaign_display_name(params.campaign_name.as_deref(), &range);
    let batch = ScheduleBatch {
        clear: (!params.append).then(|| ClearScope::for_run(range, &params.caller_ids, &predicate)),
        campaign: NewCampaign {
            name: campaign_name.clone(),
            description: None,
            range,
            target_regions: params.region_names.clone(),
            target_cities: params.cities.clone(),
            target_callers: participants.iter().map(|c| c.id).collect(),
        },
        assignments: distribution.assignments,
    };

    let outcome = store.commit_schedule(&batch).await.map_err(|err| {
        tracing::error!(error = %err, "Schedule commit failed, rolled back");
        storage(err)
    })?;

    tracing::info!(
        campaign_id = outcome.campaign_id,
        assignments = outcome.inserted,
        cleared = outcome.cleared,
        "Schedule generated",
    );

    Ok(GenerationSummary {
        campaign_id: outcome.campaign_id,
        campaign_name,
        assignment_count: batch.assignments.len(),
        touched_regions: distribution.touched_regions,
        available_targets,
        requested_capacity: capacity,
        start_date: range.start(),
        end_date: range.end(),
        days: range.days(),
        cleared_assignments: outcome.cleared,
        callers: participants.into_iter().map(|c| c.username).collect(),
        append: params.append,
    })
}
