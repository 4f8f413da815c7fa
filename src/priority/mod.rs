//! Priority rule composition.
//!
//! Orders requests before allocation. Rules are applied in sequence: a later
//! rule is only consulted when every earlier rule ties, and items that tie on
//! every rule keep their input order (the sort is stable).
//!
//! Requests are ranked with [`rank_requests`] first, which resolves each
//! urgency to a weight once. The default allocation order is [`ByUrgency`]
//! followed by [`ByRequestedDate`]: most urgent first, earliest submission
//! first among equals.
//!
//! # References
//!
//! Dispatching rule composition: Pinedo (2016), "Scheduling: Theory,
//! Algorithms, and Systems"

mod engine;
mod ranked;
mod rules;
mod types;

pub use engine::PriorityEngine;
pub use ranked::{rank_requests, RankedRequest};
pub use rules::{ByEarliestDate, ByRequestedDate, ByUrgency, FnRule, RequestComparator};
pub use types::PriorityRule;
