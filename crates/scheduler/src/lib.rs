//! Orchestration of schedule generation runs.
//!
//! [`generate`] drives one run end to end: validation, caller selection,
//! region resolution, pool building, distribution and the atomic commit.
//! Persistence sits behind the [`ScheduleStore`] trait, with
//! [`PgScheduleStore`] as the Postgres implementation.

pub mod catalogue;
pub mod error;
pub mod generate;
pub mod pg_store;
pub mod store;

pub use error::StoreError;
pub use generate::{generate, GenerationSummary};
pub use pg_store::PgScheduleStore;
pub use store::{CommitOutcome, ScheduleBatch, ScheduleStore};
