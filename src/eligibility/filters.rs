//! Built-in filters and the filter set used by the allocator.

use super::types::SlotFilter;
use crate::model::{Request, Slot};
use std::fmt;
use std::sync::Arc;

/// Slot specialty equals request specialty (exact match).
#[derive(Debug, Clone, Copy, Default)]
pub struct SpecialtyMatch;

impl SlotFilter for SpecialtyMatch {
    fn name(&self) -> &str {
        "SpecialtyMatch"
    }

    fn accepts(&self, slot: &Slot, request: &Request) -> bool {
        slot.specialty == request.specialty
    }
}

/// Slot is flagged available.
#[derive(Debug, Clone, Copy, Default)]
pub struct Available;

impl SlotFilter for Available {
    fn name(&self) -> &str {
        "Available"
    }

    fn accepts(&self, slot: &Slot, _request: &Request) -> bool {
        slot.available
    }
}

/// Slot starts at or after the request's earliest acceptable date.
#[derive(Debug, Clone, Copy, Default)]
pub struct NotBeforeEarliest;

impl SlotFilter for NotBeforeEarliest {
    fn name(&self) -> &str {
        "NotBeforeEarliest"
    }

    fn accepts(&self, slot: &Slot, request: &Request) -> bool {
        slot.date_time >= request.earliest_date
    }
}

/// Travel time threshold.
///
/// Requests without `max_travel_minutes` accept any slot. Requests with one
/// accept only slots whose travel time is known and within the limit.
#[derive(Debug, Clone, Copy, Default)]
pub struct WithinTravelLimit;

impl SlotFilter for WithinTravelLimit {
    fn name(&self) -> &str {
        "WithinTravelLimit"
    }

    fn accepts(&self, slot: &Slot, request: &Request) -> bool {
        match request.max_travel_minutes {
            None => true,
            Some(limit) => slot.travel_minutes.is_some_and(|t| t <= limit),
        }
    }
}

/// Preferred trusts.
///
/// Requests with an empty preference list accept any slot; otherwise the
/// slot's trust must be listed.
#[derive(Debug, Clone, Copy, Default)]
pub struct PreferredTrust;

impl SlotFilter for PreferredTrust {
    fn name(&self) -> &str {
        "PreferredTrust"
    }

    fn accepts(&self, slot: &Slot, request: &Request) -> bool {
        if request.preferred_trusts.is_empty() {
            return true;
        }
        slot.trust_id
            .as_ref()
            .is_some_and(|trust| request.preferred_trusts.contains(trust))
    }
}

/// A named closure filter.
#[derive(Clone)]
pub struct FnFilter {
    name: String,
    accepts: Arc<dyn Fn(&Slot, &Request) -> bool + Send + Sync>,
}

impl FnFilter {
    pub fn new<F>(name: impl Into<String>, accepts: F) -> Self
    where
        F: Fn(&Slot, &Request) -> bool + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            accepts: Arc::new(accepts),
        }
    }
}

impl fmt::Debug for FnFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnFilter").field("name", &self.name).finish()
    }
}

impl SlotFilter for FnFilter {
    fn name(&self) -> &str {
        &self.name
    }

    fn accepts(&self, slot: &Slot, request: &Request) -> bool {
        (self.accepts)(slot, request)
    }
}

/// An ordered conjunction of filters.
///
/// [`FilterSet::standard`] holds the core and request-driven filters;
/// [`FilterSet::core`] holds only specialty, availability and date.
#[derive(Clone)]
pub struct FilterSet {
    filters: Vec<Arc<dyn SlotFilter>>,
}

impl FilterSet {
    /// Specialty, availability and earliest-date checks only.
    pub fn core() -> Self {
        Self {
            filters: vec![
                Arc::new(SpecialtyMatch),
                Arc::new(Available),
                Arc::new(NotBeforeEarliest),
            ],
        }
    }

    /// Core filters plus travel-time and preferred-trust checks.
    pub fn standard() -> Self {
        Self::core()
            .with_filter(WithinTravelLimit)
            .with_filter(PreferredTrust)
    }

    pub fn with_filter<F: SlotFilter + 'static>(mut self, filter: F) -> Self {
        self.filters.push(Arc::new(filter));
        self
    }

    /// Returns `true` if every filter accepts the pair.
    pub fn accepts(&self, slot: &Slot, request: &Request) -> bool {
        self.filters.iter().all(|f| f.accepts(slot, request))
    }

    /// Name of the first filter rejecting the pair, if any.
    pub fn first_rejection(&self, slot: &Slot, request: &Request) -> Option<&str> {
        self.filters
            .iter()
            .find(|f| !f.accepts(slot, request))
            .map(|f| f.name())
    }

    pub fn names(&self) -> Vec<&str> {
        self.filters.iter().map(|f| f.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

impl Default for FilterSet {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Debug for FilterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}
