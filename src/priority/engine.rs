//! Rule composition engine.

use super::types::PriorityRule;
use std::cmp::Ordering;
use std::sync::Arc;

/// Composes priority rules into a single stable ordering.
///
/// # Examples
///
/// ```
/// use u_slotalloc::model::UrgencyWeights;
/// use u_slotalloc::priority::{rank_requests, ByRequestedDate, ByUrgency, PriorityEngine};
///
/// # let requests: Vec<u_slotalloc::model::Request> = Vec::new();
/// let engine = PriorityEngine::new()
///     .with_rule(ByUrgency)
///     .with_rule(ByRequestedDate);
///
/// assert_eq!(engine.rule_names(), vec!["ByUrgency", "ByRequestedDate"]);
/// let ranked = rank_requests(&requests, &UrgencyWeights::default()).unwrap();
/// let order = engine.sort_indices(&ranked, &());
/// assert!(order.is_empty());
/// ```
pub struct PriorityEngine<T, C> {
    rules: Vec<Arc<dyn PriorityRule<T, C>>>,
}

impl<T, C> PriorityEngine<T, C> {
    /// Creates an engine with no rules (input order is kept).
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Appends a rule; it only breaks ties left by the rules before it.
    pub fn with_rule<R: PriorityRule<T, C> + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Arc::new(rule));
        self
    }

    /// Returns the number of rules in this engine.
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Returns the names of all rules in order.
    pub fn rule_names(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Compares two items through the rule chain.
    pub fn compare(&self, a: &T, b: &T, context: &C) -> Ordering {
        self.rules
            .iter()
            .map(|rule| rule.compare(a, b, context))
            .find(|ord| *ord != Ordering::Equal)
            .unwrap_or(Ordering::Equal)
    }

    /// Returns indices into `items`, highest priority first.
    ///
    /// Items tied on every rule keep their relative input order.
    pub fn sort_indices(&self, items: &[T], context: &C) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..items.len()).collect();
        if self.rules.is_empty() {
            return indices;
        }
        // slice::sort_by is stable
        indices.sort_by(|&a, &b| self.compare(&items[a], &items[b], context));
        indices
    }

    /// Sorts items by priority and returns references in sorted order.
    pub fn sort<'a>(&self, items: &'a [T], context: &C) -> Vec<&'a T> {
        self.sort_indices(items, context)
            .into_iter()
            .map(|i| &items[i])
            .collect()
    }

    /// Returns the index of the highest-priority item.
    ///
    /// Returns `None` if the slice is empty. Among fully tied items the
    /// earliest one wins.
    pub fn select_best(&self, items: &[T], context: &C) -> Option<usize> {
        (0..items.len()).reduce(|best, i| {
            if self.compare(&items[i], &items[best], context) == Ordering::Less {
                i
            } else {
                best
            }
        })
    }
}

impl<T, C> Clone for PriorityEngine<T, C> {
    fn clone(&self) -> Self {
        Self {
            rules: self.rules.clone(),
        }
    }
}

impl<T, C> Default for PriorityEngine<T, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, C> std::fmt::Debug for PriorityEngine<T, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PriorityEngine")
            .field("rules", &self.rule_names())
            .finish()
    }
}
