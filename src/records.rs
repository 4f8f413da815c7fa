//! Loosely typed feed records and their validation.
//!
//! The booking feed delivers slots and requests with optional fields,
//! string dates and label-or-number urgencies. This module turns them into
//! typed [`Slot`]s and [`Request`]s, either strictly (first defect aborts)
//! or leniently (defective records are skipped and logged).

use crate::error::{RecordKind, ValidationError};
use crate::model::{parse_timestamp, Request, Slot, Urgency};
use chrono::{DateTime, Utc};
use tracing::warn;

/// A slot as delivered by the feed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct RawSlot {
    pub specialty: Option<String>,
    pub date_time: Option<String>,
    pub available: Option<bool>,
    pub practitioner: Option<String>,
    pub trust_id: Option<String>,
    pub travel_minutes: Option<u32>,
}

/// A request as delivered by the feed.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct RawRequest {
    pub patient: Option<String>,
    pub specialty: Option<String>,
    pub urgency: Option<RawUrgency>,
    pub requested_date: Option<String>,
    pub earliest_date: Option<String>,
    pub preferred_trusts: Vec<String>,
    pub max_travel_minutes: Option<u32>,
}

/// An urgency as delivered by the feed: a tier label or a number.
///
/// Numbers that are not whole and non-negative within `u32` are kept as
/// [`RawUrgency::Number`] and rejected by [`RawRequest::validate`], so the
/// error names the record. Values that are neither numbers nor strings
/// still fail at deserialization.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum RawUrgency {
    Weight(u32),
    Tier(String),
    Number(f64),
}

impl From<Urgency> for RawUrgency {
    fn from(urgency: Urgency) -> Self {
        match urgency {
            Urgency::Weight(w) => RawUrgency::Weight(w),
            Urgency::Tier(label) => RawUrgency::Tier(label),
        }
    }
}

/// Outcome of lenient validation.
#[derive(Debug, Clone)]
pub struct Validated<T> {
    /// Records that passed, in input order.
    pub records: Vec<T>,

    /// One error per skipped record, in input order.
    pub rejected: Vec<ValidationError>,
}

impl RawSlot {
    /// Validates this record, which sits at `index` in its feed.
    pub fn validate(&self, index: usize) -> Result<Slot, ValidationError> {
        let kind = RecordKind::Slot;
        let specialty = required_text(kind, index, "specialty", &self.specialty)?;
        let date_time = required_date(kind, index, "dateTime", &self.date_time)?;
        let available = self.available.ok_or(ValidationError::MissingField {
            record: kind,
            index,
            field: "available",
        })?;
        let practitioner = required_text(kind, index, "practitioner", &self.practitioner)?;

        Ok(Slot {
            specialty,
            date_time,
            available,
            practitioner,
            trust_id: self.trust_id.clone(),
            travel_minutes: self.travel_minutes,
        })
    }
}

impl RawRequest {
    /// Validates this record, which sits at `index` in its feed.
    ///
    /// Tier labels are not checked against a weight table here; the
    /// allocator resolves them against its configured table.
    pub fn validate(&self, index: usize) -> Result<Request, ValidationError> {
        let kind = RecordKind::Request;
        let patient = required_text(kind, index, "patient", &self.patient)?;
        let specialty = required_text(kind, index, "specialty", &self.specialty)?;
        let urgency = match &self.urgency {
            None => {
                return Err(ValidationError::MissingField {
                    record: kind,
                    index,
                    field: "urgency",
                })
            }
            Some(RawUrgency::Tier(label)) if label.trim().is_empty() => {
                return Err(ValidationError::EmptyField {
                    record: kind,
                    index,
                    field: "urgency",
                })
            }
            Some(RawUrgency::Tier(label)) => Urgency::Tier(label.clone()),
            Some(RawUrgency::Weight(w)) => Urgency::Weight(*w),
            Some(RawUrgency::Number(n)) => {
                return Err(ValidationError::InvalidUrgency {
                    record: kind,
                    index,
                    value: n.to_string(),
                })
            }
        };
        let requested_date = required_date(kind, index, "requestedDate", &self.requested_date)?;
        let earliest_date = required_date(kind, index, "earliestDate", &self.earliest_date)?;

        Ok(Request {
            patient,
            specialty,
            urgency,
            requested_date,
            earliest_date,
            preferred_trusts: self.preferred_trusts.clone(),
            max_travel_minutes: self.max_travel_minutes,
        })
    }
}

/// Validates every slot, failing on the first defect.
pub fn validate_slots(raw: &[RawSlot]) -> Result<Vec<Slot>, ValidationError> {
    raw.iter().enumerate().map(|(i, r)| r.validate(i)).collect()
}

/// Validates every request, failing on the first defect.
pub fn validate_requests(raw: &[RawRequest]) -> Result<Vec<Request>, ValidationError> {
    raw.iter().enumerate().map(|(i, r)| r.validate(i)).collect()
}

/// Validates slots, skipping and logging defective records.
pub fn validate_slots_lenient(raw: &[RawSlot]) -> Validated<Slot> {
    partition(raw.iter().enumerate().map(|(i, r)| r.validate(i)))
}

/// Validates requests, skipping and logging defective records.
pub fn validate_requests_lenient(raw: &[RawRequest]) -> Validated<Request> {
    partition(raw.iter().enumerate().map(|(i, r)| r.validate(i)))
}

fn partition<T>(results: impl Iterator<Item = Result<T, ValidationError>>) -> Validated<T> {
    let mut records = Vec::new();
    let mut rejected = Vec::new();
    for result in results {
        match result {
            Ok(record) => records.push(record),
            Err(err) => {
                warn!(
                    record = %err.record(),
                    index = err.index(),
                    field = err.field(),
                    "skipping invalid record: {err}"
                );
                rejected.push(err);
            }
        }
    }
    Validated { records, rejected }
}

fn required_text(
    record: RecordKind,
    index: usize,
    field: &'static str,
    value: &Option<String>,
) -> Result<String, ValidationError> {
    match value {
        None => Err(ValidationError::MissingField {
            record,
            index,
            field,
        }),
        Some(s) if s.trim().is_empty() => Err(ValidationError::EmptyField {
            record,
            index,
            field,
        }),
        Some(s) => Ok(s.clone()),
    }
}

fn required_date(
    record: RecordKind,
    index: usize,
    field: &'static str,
    value: &Option<String>,
) -> Result<DateTime<Utc>, ValidationError> {
    let raw = value.as_deref().ok_or(ValidationError::MissingField {
        record,
        index,
        field,
    })?;
    parse_timestamp(raw).ok_or_else(|| ValidationError::InvalidDate {
        record,
        index,
        field,
        value: raw.to_string(),
    })
}
