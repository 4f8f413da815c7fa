//! Priority-based appointment slot allocation.
//!
//! Matches pending appointment requests to open slots:
//!
//! - **Priority**: requests are ranked by urgency weight, then a
//!   configurable tie-break (submission date by default); full ties keep
//!   input order.
//! - **Eligibility**: a slot can serve a request only if the specialty
//!   matches, the slot is available and it starts no earlier than the
//!   request's earliest acceptable date. Travel-time and preferred-trust
//!   constraints apply when the request sets them.
//! - **Assignment**: each request, in priority order, takes the first
//!   eligible slot in input order; by default a slot serves at most one
//!   request per run.
//!
//! The allocator is a pure function over its inputs. Marking slots booked
//! and removing satisfied requests from the waitlist is left to the caller;
//! [`booking`] has helpers for both.
//!
//! # Examples
//!
//! ```
//! use u_slotalloc::model::{parse_timestamp, Request, Slot, Urgency};
//!
//! let at = |s: &str| parse_timestamp(s).unwrap();
//! let slots = vec![Slot::new("Cardiology", at("2025-03-01T09:00"), "Dr.A")];
//! let requests = vec![
//!     Request::new("P1", "Cardiology", Urgency::urgent(), at("2025-02-10"), at("2025-02-15")),
//!     Request::new("P2", "Cardiology", Urgency::routine(), at("2025-02-01"), at("2025-02-15")),
//! ];
//!
//! let assignments = u_slotalloc::allocate(&slots, &requests).unwrap();
//! assert_eq!(assignments.len(), 1);
//! assert_eq!(assignments[0].patient, "P1");
//! assert_eq!(assignments[0].practitioner, "Dr.A");
//! ```

pub mod alloc;
pub mod booking;
pub mod eligibility;
pub mod error;
pub mod model;
pub mod priority;
pub mod records;

pub use error::{BookingError, Error, RecordKind, ValidationError};

use crate::alloc::{AllocConfig, AllocRunner, Assignment};
use crate::model::{Request, Slot};

/// Allocates with the default configuration and returns the assignments in
/// priority-processing order.
pub fn allocate(slots: &[Slot], requests: &[Request]) -> Result<Vec<Assignment>, Error> {
    AllocRunner::run(slots, requests, &AllocConfig::default()).map(|r| r.into_assignments())
}
