//! Allocation configuration.

use crate::eligibility::{FilterSet, SlotFilter};
use crate::model::{Request, UrgencyWeights};
use crate::priority::{
    ByEarliestDate, ByRequestedDate, ByUrgency, FnRule, PriorityEngine, RankedRequest,
    RequestComparator,
};
use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

/// Secondary ordering applied when two requests have the same urgency.
///
/// Requests still tied after the tie-break keep their input order.
#[derive(Clone, Default)]
pub enum TieBreak {
    /// Earlier submission first.
    #[default]
    RequestedDateAsc,

    /// Earlier acceptable date first.
    EarliestDateAsc,

    /// Caller-supplied comparator; `Less` means the first request goes first.
    Custom(RequestComparator),
}

impl fmt::Debug for TieBreak {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TieBreak::RequestedDateAsc => f.write_str("RequestedDateAsc"),
            TieBreak::EarliestDateAsc => f.write_str("EarliestDateAsc"),
            TieBreak::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// What happens to a slot once it has been assigned within a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum SlotConsumption {
    /// The slot is withdrawn from the rest of the run.
    #[default]
    Exclusive,

    /// The slot stays eligible, so several requests may receive it.
    ///
    /// Reproduces the legacy matcher. Results from this mode cannot be
    /// committed as-is: [`crate::booking::commit`] rejects double assignments.
    SharedAllowed,
}

/// Configuration for an allocation run.
///
/// # Examples
///
/// ```
/// use u_slotalloc::alloc::{AllocConfig, SlotConsumption, TieBreak};
///
/// let config = AllocConfig::default()
///     .with_tie_break(TieBreak::EarliestDateAsc)
///     .with_slot_consumption(SlotConsumption::Exclusive)
///     .with_urgency_tier("two-week-wait", 4);
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct AllocConfig {
    /// Secondary sort key when urgency ties.
    pub tie_break: TieBreak,

    /// Slot reuse policy within a run.
    pub slot_consumption: SlotConsumption,

    /// Urgency label to weight table.
    pub urgency_weights: UrgencyWeights,

    /// Eligibility filters. Always contains the core filters.
    pub filters: FilterSet,

    /// Whether [`super::AllocRunner::run_batch`] runs jobs on the rayon pool.
    pub parallel: bool,
}

impl Default for AllocConfig {
    fn default() -> Self {
        Self {
            tie_break: TieBreak::default(),
            slot_consumption: SlotConsumption::default(),
            urgency_weights: UrgencyWeights::default(),
            filters: FilterSet::standard(),
            parallel: false,
        }
    }
}

impl AllocConfig {
    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    /// Uses a custom comparator as the tie-break.
    pub fn with_custom_tie_break<F>(mut self, compare: F) -> Self
    where
        F: Fn(&Request, &Request) -> Ordering + Send + Sync + 'static,
    {
        self.tie_break = TieBreak::Custom(Arc::new(compare));
        self
    }

    pub fn with_slot_consumption(mut self, consumption: SlotConsumption) -> Self {
        self.slot_consumption = consumption;
        self
    }

    pub fn with_urgency_weights(mut self, weights: UrgencyWeights) -> Self {
        self.urgency_weights = weights;
        self
    }

    /// Adds or overrides one urgency tier.
    pub fn with_urgency_tier(mut self, label: &str, weight: u32) -> Self {
        self.urgency_weights = self.urgency_weights.with_tier(label, weight);
        self
    }

    /// Appends an eligibility filter to the current set.
    pub fn with_filter<F: SlotFilter + 'static>(mut self, filter: F) -> Self {
        self.filters = self.filters.with_filter(filter);
        self
    }

    /// Replaces the filter set.
    pub fn with_filters(mut self, filters: FilterSet) -> Self {
        self.filters = filters;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.urgency_weights.iter().any(|(label, _)| label.is_empty()) {
            return Err("urgency tier labels must not be empty".into());
        }
        if self.filters.is_empty() {
            return Err("filter set must not be empty".into());
        }
        Ok(())
    }

    /// Builds the request ordering: urgency first, then the tie-break.
    ///
    /// The engine sorts requests ranked against
    /// [`AllocConfig::urgency_weights`] by [`crate::priority::rank_requests`].
    pub fn priority_engine<'a>(&self) -> PriorityEngine<RankedRequest<'a>, ()> {
        let engine = PriorityEngine::new().with_rule(ByUrgency);
        match &self.tie_break {
            TieBreak::RequestedDateAsc => engine.with_rule(ByRequestedDate),
            TieBreak::EarliestDateAsc => engine.with_rule(ByEarliestDate),
            TieBreak::Custom(compare) => {
                engine.with_rule(FnRule::from_shared("Custom", Arc::clone(compare)))
            }
        }
    }
}
