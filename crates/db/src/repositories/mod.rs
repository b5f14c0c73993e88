//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument, or `&mut PgConnection` when the
//! call must join a caller-owned transaction.

pub mod assignment_repo;
pub mod call_target_repo;
pub mod caller_repo;
pub mod campaign_repo;
pub mod schedule_repo;

pub use assignment_repo::AssignmentRepo;
pub use call_target_repo::CallTargetRepo;
pub use caller_repo::CallerRepo;
pub use campaign_repo::CampaignRepo;
pub use schedule_repo::{CommittedSchedule, ScheduleRepo};
