//! Pending appointment requests.

use super::urgency::Urgency;
use chrono::{DateTime, Utc};

/// A patient's ask for an appointment in a specialty.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Request {
    pub patient: String,
    pub specialty: String,
    pub urgency: Urgency,

    /// When the request was submitted. Earlier submissions win urgency ties
    /// under the default tie-break.
    pub requested_date: DateTime<Utc>,

    /// Earliest acceptable slot time (inclusive).
    pub earliest_date: DateTime<Utc>,

    /// Trusts the patient is willing to attend. Empty means any.
    pub preferred_trusts: Vec<String>,

    /// Longest acceptable travel time in minutes. `None` means unlimited.
    pub max_travel_minutes: Option<u32>,
}

impl Request {
    pub fn new(
        patient: impl Into<String>,
        specialty: impl Into<String>,
        urgency: impl Into<Urgency>,
        requested_date: DateTime<Utc>,
        earliest_date: DateTime<Utc>,
    ) -> Self {
        Self {
            patient: patient.into(),
            specialty: specialty.into(),
            urgency: urgency.into(),
            requested_date,
            earliest_date,
            preferred_trusts: Vec::new(),
            max_travel_minutes: None,
        }
    }

    pub fn with_preferred_trust(mut self, trust_id: impl Into<String>) -> Self {
        self.preferred_trusts.push(trust_id.into());
        self
    }

    pub fn with_max_travel_minutes(mut self, minutes: u32) -> Self {
        self.max_travel_minutes = Some(minutes);
        self
    }
}
