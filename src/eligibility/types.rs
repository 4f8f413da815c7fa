//! Core trait for eligibility filters.

use crate::model::{Request, Slot};

/// Decides whether a slot may serve a request.
///
/// Filters must be pure: the same pair always yields the same answer.
pub trait SlotFilter: Send + Sync {
    /// Returns the name of this filter, used in logs.
    fn name(&self) -> &str;

    /// Returns `true` if `slot` may be assigned to `request`.
    fn accepts(&self, slot: &Slot, request: &Request) -> bool;
}
