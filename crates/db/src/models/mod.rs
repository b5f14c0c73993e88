//! Row structs and DTOs.
//!
//! Each submodule holds a `FromRow` + `Serialize` entity matching a
//! database row, plus the `Deserialize` create DTO used for inserts where
//! rows are created outside a generation run.

pub mod assignment;
pub mod call_outcome;
pub mod call_target;
pub mod caller;
pub mod campaign;
pub mod planner;
