//! Bookable capacity.

use chrono::{DateTime, Utc};

/// A bookable time/practitioner/specialty unit.
///
/// The allocator reads slots but never changes them; flipping `available`
/// once an assignment is accepted is the caller's job (see
/// [`crate::booking::commit`]).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Slot {
    pub specialty: String,
    pub date_time: DateTime<Utc>,
    pub available: bool,
    pub practitioner: String,

    /// Trust hosting the slot, if known.
    pub trust_id: Option<String>,

    /// Estimated travel time to the slot's location, in minutes.
    pub travel_minutes: Option<u32>,
}

impl Slot {
    /// Creates an available slot with no trust or travel information.
    pub fn new(
        specialty: impl Into<String>,
        date_time: DateTime<Utc>,
        practitioner: impl Into<String>,
    ) -> Self {
        Self {
            specialty: specialty.into(),
            date_time,
            available: true,
            practitioner: practitioner.into(),
            trust_id: None,
            travel_minutes: None,
        }
    }

    pub fn with_available(mut self, available: bool) -> Self {
        self.available = available;
        self
    }

    pub fn with_trust(mut self, trust_id: impl Into<String>) -> Self {
        self.trust_id = Some(trust_id.into());
        self
    }

    pub fn with_travel_minutes(mut self, minutes: u32) -> Self {
        self.travel_minutes = Some(minutes);
        self
    }
}
