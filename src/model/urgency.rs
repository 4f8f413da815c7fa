//! Urgency tiers and their weights.

use std::collections::BTreeMap;
use std::fmt;

/// How urgent a request is.
///
/// Either a tier label resolved through [`UrgencyWeights`], or an explicit
/// numeric weight. Higher weight means more urgent. Feed records carry
/// [`crate::records::RawUrgency`] instead, which also admits malformed
/// numbers so validation can report them.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Urgency {
    Weight(u32),
    Tier(String),
}

impl Urgency {
    pub fn routine() -> Self {
        Urgency::Tier("routine".into())
    }

    pub fn urgent() -> Self {
        Urgency::Tier("urgent".into())
    }

    pub fn emergency() -> Self {
        Urgency::Tier("emergency".into())
    }

    pub fn tier(label: impl Into<String>) -> Self {
        Urgency::Tier(label.into())
    }
}

impl From<u32> for Urgency {
    fn from(weight: u32) -> Self {
        Urgency::Weight(weight)
    }
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Urgency::Weight(w) => write!(f, "{w}"),
            Urgency::Tier(label) => f.write_str(label),
        }
    }
}

/// Maps urgency tier labels to numeric weights.
///
/// Labels are matched case-insensitively. The default table is
/// `routine = 1`, `urgent = 2`, `emergency = 3`.
///
/// # Examples
///
/// ```
/// use u_slotalloc::model::{Urgency, UrgencyWeights};
///
/// let weights = UrgencyWeights::default()
///     .with_tier("two-week-wait", 5)
///     .with_tier("Urgent", 4);
///
/// assert_eq!(weights.weight_of(&Urgency::tier("TWO-WEEK-WAIT")), Some(5));
/// assert_eq!(weights.weight_of(&Urgency::urgent()), Some(4));
/// assert_eq!(weights.weight_of(&Urgency::Weight(9)), Some(9));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(from = "BTreeMap<String, u32>", into = "BTreeMap<String, u32>")
)]
pub struct UrgencyWeights {
    tiers: BTreeMap<String, u32>,
}

impl Default for UrgencyWeights {
    fn default() -> Self {
        Self::empty()
            .with_tier("routine", 1)
            .with_tier("urgent", 2)
            .with_tier("emergency", 3)
    }
}

impl UrgencyWeights {
    /// A table with no tiers; only numeric urgencies resolve against it.
    pub fn empty() -> Self {
        Self {
            tiers: BTreeMap::new(),
        }
    }

    /// Adds or overrides a tier.
    pub fn with_tier(mut self, label: impl AsRef<str>, weight: u32) -> Self {
        self.tiers.insert(normalize(label.as_ref()), weight);
        self
    }

    /// Resolves an urgency to its weight, or `None` for an unknown tier.
    pub fn weight_of(&self, urgency: &Urgency) -> Option<u32> {
        match urgency {
            Urgency::Weight(w) => Some(*w),
            Urgency::Tier(label) => self
                .tiers
                .get(label.as_str())
                .or_else(|| self.tiers.get(&normalize(label)))
                .copied(),
        }
    }

    pub fn contains(&self, label: &str) -> bool {
        self.tiers.contains_key(&normalize(label))
    }

    /// Tiers ordered by label.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.tiers.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }
}

impl From<BTreeMap<String, u32>> for UrgencyWeights {
    fn from(tiers: BTreeMap<String, u32>) -> Self {
        tiers
            .into_iter()
            .fold(Self::empty(), |acc, (label, weight)| acc.with_tier(label, weight))
    }
}

impl From<UrgencyWeights> for BTreeMap<String, u32> {
    fn from(weights: UrgencyWeights) -> Self {
        weights.tiers
    }
}

fn normalize(label: &str) -> String {
    label.trim().to_lowercase()
}
