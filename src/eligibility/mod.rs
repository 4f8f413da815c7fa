//! Slot eligibility predicates.
//!
//! A slot can serve a request only if every filter accepts the pair. The
//! core filters ([`SpecialtyMatch`], [`Available`], [`NotBeforeEarliest`])
//! are always applied; the request-driven filters ([`WithinTravelLimit`],
//! [`PreferredTrust`]) are part of the default set and only constrain
//! requests that carry the corresponding preference.

mod filters;
mod types;

pub use filters::{
    Available, FilterSet, FnFilter, NotBeforeEarliest, PreferredTrust, SpecialtyMatch,
    WithinTravelLimit,
};
pub use types::SlotFilter;
