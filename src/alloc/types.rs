//! Allocation inputs and outputs.

use crate::model::{Request, Slot};

/// A request paired with the slot it was given.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Assignment {
    pub patient: String,

    /// Full copy of the matched slot as it was at allocation time.
    pub slot: Slot,

    /// Denormalized from `slot.practitioner`.
    pub practitioner: String,

    /// Position of the request in the input slice.
    pub request_index: usize,

    /// Position of the slot in the input slice.
    pub slot_index: usize,
}

/// Result of an allocation run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllocResult {
    /// Assignments in the order their requests were processed.
    pub assignments: Vec<Assignment>,

    /// Indices of requests that received no slot, in processing order.
    pub unmatched: Vec<usize>,

    /// Every request index, highest priority first.
    pub processing_order: Vec<usize>,
}

impl AllocResult {
    /// Total number of requests considered.
    pub fn total_requests(&self) -> usize {
        self.processing_order.len()
    }

    /// Matched requests as a percentage of all requests (0 when empty).
    pub fn fill_rate(&self) -> f64 {
        if self.processing_order.is_empty() {
            return 0.0;
        }
        self.assignments.len() as f64 / self.processing_order.len() as f64 * 100.0
    }

    /// Whether the request at `request_index` received a slot.
    pub fn is_matched(&self, request_index: usize) -> bool {
        self.assignments
            .iter()
            .any(|a| a.request_index == request_index)
    }

    /// The assignment for the request at `request_index`, if any.
    pub fn assignment_for(&self, request_index: usize) -> Option<&Assignment> {
        self.assignments
            .iter()
            .find(|a| a.request_index == request_index)
    }

    /// Consumes the result, keeping only the assignments.
    pub fn into_assignments(self) -> Vec<Assignment> {
        self.assignments
    }
}

/// One independent pool for batch allocation, e.g. a single trust's slots
/// and waitlist.
#[derive(Debug, Clone, Default)]
pub struct AllocJob {
    pub slots: Vec<Slot>,
    pub requests: Vec<Request>,
}

impl AllocJob {
    pub fn new(slots: Vec<Slot>, requests: Vec<Request>) -> Self {
        Self { slots, requests }
    }
}
