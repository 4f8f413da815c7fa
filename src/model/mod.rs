//! Typed allocation inputs.
//!
//! Slots and requests here are already validated: required fields are
//! present, dates are absolute UTC instants. Loosely typed feed records
//! live in [`crate::records`] and are converted into these types there.

mod request;
mod slot;
mod time;
mod urgency;

pub use request::Request;
pub use slot::Slot;
pub use time::parse_timestamp;
pub use urgency::{Urgency, UrgencyWeights};
