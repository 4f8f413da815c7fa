//! Priority-based slot allocation.
//!
//! A greedy matcher: requests are ranked by urgency (then a configurable
//! tie-break) and each, in turn, takes the first eligible slot. The result
//! is deterministic but not globally optimal; a high-priority request can
//! take a slot that would have let two lower-priority requests both be
//! served.
//!
//! Under [`SlotConsumption::Exclusive`] (the default) a slot is withdrawn
//! once assigned. [`SlotConsumption::SharedAllowed`] reproduces the legacy
//! matcher, which never withdrew slots.
//!
//! # Cost
//!
//! O(R log R + R·S) for R requests and S slots. Callers needing bounded
//! latency should cap the product before calling.

mod config;
mod runner;
mod types;

pub use config::{AllocConfig, SlotConsumption, TieBreak};
pub use runner::AllocRunner;
pub use types::{AllocJob, AllocResult, Assignment};
