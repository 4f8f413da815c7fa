//! Built-in request ordering rules.

use super::ranked::RankedRequest;
use super::types::PriorityRule;
use crate::model::Request;
use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

/// Shared custom comparator over requests; `Less` means the first request
/// goes first.
pub type RequestComparator = Arc<dyn Fn(&Request, &Request) -> Ordering + Send + Sync>;

/// Most urgent first, by the weight resolved in [`RankedRequest::weight`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ByUrgency;

impl<'a, C> PriorityRule<RankedRequest<'a>, C> for ByUrgency {
    fn name(&self) -> &str {
        "ByUrgency"
    }

    fn compare(&self, a: &RankedRequest<'a>, b: &RankedRequest<'a>, _ctx: &C) -> Ordering {
        b.weight.cmp(&a.weight)
    }
}

/// Earliest submission first.
#[derive(Debug, Clone, Copy, Default)]
pub struct ByRequestedDate;

impl<'a, C> PriorityRule<RankedRequest<'a>, C> for ByRequestedDate {
    fn name(&self) -> &str {
        "ByRequestedDate"
    }

    fn compare(&self, a: &RankedRequest<'a>, b: &RankedRequest<'a>, _ctx: &C) -> Ordering {
        a.request.requested_date.cmp(&b.request.requested_date)
    }
}

/// Earliest acceptable date first.
#[derive(Debug, Clone, Copy, Default)]
pub struct ByEarliestDate;

impl<'a, C> PriorityRule<RankedRequest<'a>, C> for ByEarliestDate {
    fn name(&self) -> &str {
        "ByEarliestDate"
    }

    fn compare(&self, a: &RankedRequest<'a>, b: &RankedRequest<'a>, _ctx: &C) -> Ordering {
        a.request.earliest_date.cmp(&b.request.earliest_date)
    }
}

/// A named closure comparator over the underlying requests.
#[derive(Clone)]
pub struct FnRule {
    name: String,
    compare: RequestComparator,
}

impl FnRule {
    pub fn new<F>(name: impl Into<String>, compare: F) -> Self
    where
        F: Fn(&Request, &Request) -> Ordering + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            compare: Arc::new(compare),
        }
    }

    pub fn from_shared(name: impl Into<String>, compare: RequestComparator) -> Self {
        Self {
            name: name.into(),
            compare,
        }
    }
}

impl fmt::Debug for FnRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnRule").field("name", &self.name).finish()
    }
}

impl<'a, C> PriorityRule<RankedRequest<'a>, C> for FnRule {
    fn name(&self) -> &str {
        &self.name
    }

    fn compare(&self, a: &RankedRequest<'a>, b: &RankedRequest<'a>, _ctx: &C) -> Ordering {
        (self.compare)(a.request, b.request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{parse_timestamp, Urgency, UrgencyWeights};
    use crate::priority::{rank_requests, PriorityEngine};

    fn req(patient: &str, urgency: Urgency, requested: &str, earliest: &str) -> Request {
        Request::new(
            patient,
            "Cardiology",
            urgency,
            parse_timestamp(requested).unwrap(),
            parse_timestamp(earliest).unwrap(),
        )
    }

    fn patients<'a>(engine: &PriorityEngine<RankedRequest<'a>, ()>, items: &'a [Request]) -> Vec<String> {
        let ranked = rank_requests(items, &UrgencyWeights::default()).unwrap();
        engine
            .sort(&ranked, &())
            .into_iter()
            .map(|r| r.request.patient.clone())
            .collect()
    }

    #[test]
    fn test_urgency_then_requested_date() {
        let items = vec![
            req("req1", Urgency::Weight(1), "2025-02-01", "2025-02-01"),
            req("req2", Urgency::Weight(3), "2025-02-05", "2025-02-01"),
            req("req3", Urgency::Weight(3), "2025-02-01", "2025-02-01"),
        ];
        let engine = PriorityEngine::new()
            .with_rule(ByUrgency)
            .with_rule(ByRequestedDate);
        assert_eq!(patients(&engine, &items), vec!["req3", "req2", "req1"]);
    }

    #[test]
    fn test_tier_labels_use_weights() {
        let items = vec![
            req("routine", Urgency::routine(), "2025-01-01", "2025-01-01"),
            req("emergency", Urgency::tier("EMERGENCY"), "2025-01-03", "2025-01-01"),
            req("urgent", Urgency::tier("Urgent"), "2025-01-02", "2025-01-01"),
        ];
        let engine = PriorityEngine::new().with_rule(ByUrgency);
        assert_eq!(patients(&engine, &items), vec!["emergency", "urgent", "routine"]);
    }

    #[test]
    fn test_mixed_labels_and_numbers() {
        let items = vec![
            req("two", Urgency::Weight(2), "2025-01-01", "2025-01-01"),
            req("label", Urgency::emergency(), "2025-01-01", "2025-01-01"),
        ];
        let engine = PriorityEngine::new().with_rule(ByUrgency);
        assert_eq!(patients(&engine, &items), vec!["label", "two"]);
    }

    #[test]
    fn test_earliest_date_rule() {
        let items = vec![
            req("late", Urgency::Weight(1), "2025-01-01", "2025-03-01"),
            req("soon", Urgency::Weight(1), "2025-01-05", "2025-02-01"),
        ];
        let engine = PriorityEngine::new()
            .with_rule(ByUrgency)
            .with_rule(ByEarliestDate);
        assert_eq!(patients(&engine, &items), vec!["soon", "late"]);
    }

    #[test]
    fn test_fn_rule() {
        let items = vec![
            req("b", Urgency::Weight(1), "2025-01-01", "2025-01-01"),
            req("a", Urgency::Weight(1), "2025-01-01", "2025-01-01"),
        ];
        let by_patient = FnRule::new("ByPatient", |a, b| a.patient.cmp(&b.patient));
        let engine = PriorityEngine::new().with_rule(ByUrgency).with_rule(by_patient);
        assert_eq!(engine.rule_names(), vec!["ByUrgency", "ByPatient"]);
        assert_eq!(patients(&engine, &items), vec!["a", "b"]);
    }
}
