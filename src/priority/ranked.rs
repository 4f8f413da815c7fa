//! Requests with their urgency resolved ahead of ordering.

use crate::error::{RecordKind, ValidationError};
use crate::model::{Request, Urgency, UrgencyWeights};

/// A request paired with its urgency weight, resolved once before sorting.
///
/// Rules compare ranked requests so that tier lookups happen once per
/// request rather than once per comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankedRequest<'a> {
    /// Position of the request in its input slice.
    pub index: usize,

    /// Resolved urgency weight; higher is more urgent.
    pub weight: u32,

    pub request: &'a Request,
}

/// Resolves every request's urgency against `weights`.
///
/// The result is in input order, so positions in it equal request indices.
/// Fails on the first tier label missing from the table.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use u_slotalloc::model::{Request, Urgency, UrgencyWeights};
/// use u_slotalloc::priority::rank_requests;
///
/// let day = Utc.with_ymd_and_hms(2025, 2, 1, 0, 0, 0).unwrap();
/// let requests = vec![
///     Request::new("P1", "Cardiology", Urgency::tier("Emergency"), day, day),
///     Request::new("P2", "Cardiology", 7u32, day, day),
/// ];
///
/// let ranked = rank_requests(&requests, &UrgencyWeights::default()).unwrap();
/// let weights: Vec<u32> = ranked.iter().map(|r| r.weight).collect();
/// assert_eq!(weights, vec![3, 7]);
/// ```
pub fn rank_requests<'a>(
    requests: &'a [Request],
    weights: &UrgencyWeights,
) -> Result<Vec<RankedRequest<'a>>, ValidationError> {
    requests
        .iter()
        .enumerate()
        .map(|(index, request)| {
            let weight = weights
                .weight_of(&request.urgency)
                .ok_or_else(|| ValidationError::UnknownUrgency {
                    record: RecordKind::Request,
                    index,
                    label: match &request.urgency {
                        Urgency::Tier(label) => label.clone(),
                        Urgency::Weight(w) => w.to_string(),
                    },
                })?;
            Ok(RankedRequest {
                index,
                weight,
                request,
            })
        })
        .collect()
}
