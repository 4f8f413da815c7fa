//! Error types.
//!
//! Unmatched requests are never errors; they are simply absent from the
//! allocation output. Errors are raised only for structurally invalid input
//! or an invalid configuration.

use std::fmt;
use thiserror::Error;

/// Which kind of input record a [`ValidationError`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Slot,
    Request,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKind::Slot => f.write_str("slot"),
            RecordKind::Request => f.write_str("request"),
        }
    }
}

/// A malformed slot or request.
///
/// Fatal for the offending record only: callers choose whether to abort the
/// batch or skip the record and continue.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{record} #{index}: missing required field `{field}`")]
    MissingField {
        record: RecordKind,
        index: usize,
        field: &'static str,
    },

    #[error("{record} #{index}: field `{field}` must not be empty")]
    EmptyField {
        record: RecordKind,
        index: usize,
        field: &'static str,
    },

    #[error("{record} #{index}: field `{field}` is not a valid date: {value:?}")]
    InvalidDate {
        record: RecordKind,
        index: usize,
        field: &'static str,
        value: String,
    },

    #[error("{record} #{index}: urgency {value} is not a non-negative whole number")]
    InvalidUrgency {
        record: RecordKind,
        index: usize,
        value: String,
    },

    #[error("{record} #{index}: unknown urgency tier {label:?}")]
    UnknownUrgency {
        record: RecordKind,
        index: usize,
        label: String,
    },
}

impl ValidationError {
    /// Position of the offending record in its input sequence.
    pub fn index(&self) -> usize {
        match self {
            ValidationError::MissingField { index, .. }
            | ValidationError::EmptyField { index, .. }
            | ValidationError::InvalidDate { index, .. }
            | ValidationError::InvalidUrgency { index, .. }
            | ValidationError::UnknownUrgency { index, .. } => *index,
        }
    }

    /// Name of the offending field.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::MissingField { field, .. }
            | ValidationError::EmptyField { field, .. }
            | ValidationError::InvalidDate { field, .. } => *field,
            ValidationError::InvalidUrgency { .. } | ValidationError::UnknownUrgency { .. } => {
                "urgency"
            }
        }
    }

    pub fn record(&self) -> RecordKind {
        match self {
            ValidationError::MissingField { record, .. }
            | ValidationError::EmptyField { record, .. }
            | ValidationError::InvalidDate { record, .. }
            | ValidationError::InvalidUrgency { record, .. }
            | ValidationError::UnknownUrgency { record, .. } => *record,
        }
    }
}

/// Top-level error returned by the allocation entry points.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("invalid allocation config: {0}")]
    Config(String),
}

/// Failure to commit assignments onto a slot pool.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookingError {
    #[error("assignment refers to slot #{slot_index}, but the pool has {pool_size} slots")]
    SlotOutOfRange { slot_index: usize, pool_size: usize },

    #[error("slot #{slot_index} is already booked")]
    AlreadyBooked { slot_index: usize },

    #[error("slot #{slot_index} is assigned more than once")]
    DoubleAssigned { slot_index: usize },
}
