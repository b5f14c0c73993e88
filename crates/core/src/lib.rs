//! Pure scheduling logic for outbound call planning.
//!
//! Everything in this crate is free of I/O: region resolution, pool
//! partitioning, the distribution engine, and request validation all take
//! plain values and return plain values, so they can be shared by the
//! repository layer, the scheduler, and the HTTP surface.

pub mod caller;
pub mod campaign;
pub mod clearing;
pub mod date_range;
pub mod distribution;
pub mod error;
pub mod planner;
pub mod pool;
pub mod region;
pub mod request;
pub mod target;
pub mod types;
