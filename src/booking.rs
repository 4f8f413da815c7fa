//! Caller-side follow-up to an allocation run.
//!
//! The allocator decides; it does not book. A live caller holds a lock (or
//! transaction) over its slot pool, runs allocation, then applies the
//! outcome with [`commit`] and trims its waitlist with
//! [`remaining_requests`].

use crate::alloc::{AllocResult, Assignment};
use crate::error::BookingError;
use crate::model::{Request, Slot};
use std::collections::HashSet;
use tracing::debug;

/// Marks every assigned slot as no longer available.
///
/// All assignments are checked before anything is written, so on error the
/// pool is unchanged. Returns the number of slots booked.
pub fn commit(slots: &mut [Slot], assignments: &[Assignment]) -> Result<usize, BookingError> {
    let mut seen = HashSet::with_capacity(assignments.len());
    for a in assignments {
        let slot = slots.get(a.slot_index).ok_or(BookingError::SlotOutOfRange {
            slot_index: a.slot_index,
            pool_size: slots.len(),
        })?;
        if !slot.available {
            return Err(BookingError::AlreadyBooked {
                slot_index: a.slot_index,
            });
        }
        if !seen.insert(a.slot_index) {
            return Err(BookingError::DoubleAssigned {
                slot_index: a.slot_index,
            });
        }
    }

    for a in assignments {
        slots[a.slot_index].available = false;
        debug!(slot_index = a.slot_index, patient = %a.patient, "slot booked");
    }
    Ok(assignments.len())
}

/// Requests left on the waitlist after a run, in input order.
pub fn remaining_requests(requests: &[Request], result: &AllocResult) -> Vec<Request> {
    let matched: HashSet<usize> = result.assignments.iter().map(|a| a.request_index).collect();
    requests
        .iter()
        .enumerate()
        .filter(|(i, _)| !matched.contains(i))
        .map(|(_, r)| r.clone())
        .collect()
}
