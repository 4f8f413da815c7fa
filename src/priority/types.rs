//! Core trait for priority rules.

use std::cmp::Ordering;

/// A rule that orders two items by priority.
///
/// `Ordering::Less` means `a` is served **before** `b`. Returning
/// `Ordering::Equal` hands the decision to the next rule in the engine.
///
/// # Type Parameters
///
/// * `T` - The item type being ordered
/// * `C` - The context type providing lookup state (`()` when rules need none)
///
/// # Examples
///
/// ```
/// use std::cmp::Ordering;
/// use u_slotalloc::model::Request;
/// use u_slotalloc::priority::{PriorityRule, RankedRequest};
///
/// // Requests limited to fewer trusts are harder to place: serve them first.
/// struct FewestTrustsFirst;
///
/// impl<'a> PriorityRule<RankedRequest<'a>, ()> for FewestTrustsFirst {
///     fn name(&self) -> &str { "FewestTrustsFirst" }
///     fn compare(&self, a: &RankedRequest<'a>, b: &RankedRequest<'a>, _ctx: &()) -> Ordering {
///         let key = |r: &Request| match r.preferred_trusts.len() {
///             0 => usize::MAX,
///             n => n,
///         };
///         key(a.request).cmp(&key(b.request))
///     }
/// }
/// ```
pub trait PriorityRule<T, C>: Send + Sync {
    /// Returns the name of this rule.
    fn name(&self) -> &str;

    /// Compares two items; `Less` means `a` goes first.
    fn compare(&self, a: &T, b: &T, context: &C) -> Ordering;
}
