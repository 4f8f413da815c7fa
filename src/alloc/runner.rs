//! Greedy allocation loop.

use super::config::{AllocConfig, SlotConsumption};
use super::types::{AllocJob, AllocResult, Assignment};
use crate::error::{Error, RecordKind, ValidationError};
use crate::model::{Request, Slot};
use crate::priority::rank_requests;
use crate::records::{validate_requests, validate_slots, RawRequest, RawSlot};
use rayon::prelude::*;
use tracing::{debug, info, instrument};

/// Executes priority-based slot allocation.
///
/// Requests are served in priority order (urgency descending, then the
/// configured tie-break, then input order). Each takes the first slot, in
/// input order, that passes every eligibility filter. The run is pure: the
/// inputs are never modified and identical inputs give identical results.
pub struct AllocRunner;

impl AllocRunner {
    /// Runs allocation over validated slots and requests.
    ///
    /// Fails on an invalid config, a blank specialty, practitioner or
    /// patient, or a request whose urgency tier is missing from the weight
    /// table. Unmatched requests are reported in [`AllocResult::unmatched`],
    /// not as errors.
    #[instrument(
        level = "debug",
        skip_all,
        fields(slots = slots.len(), requests = requests.len())
    )]
    pub fn run(
        slots: &[Slot],
        requests: &[Request],
        config: &AllocConfig,
    ) -> Result<AllocResult, Error> {
        config.validate().map_err(Error::Config)?;
        check_records(slots, requests)?;
        let ranked = rank_requests(requests, &config.urgency_weights)?;

        let engine = config.priority_engine();
        let processing_order = engine.sort_indices(&ranked, &());

        let exclusive = config.slot_consumption == SlotConsumption::Exclusive;
        let mut consumed = vec![false; slots.len()];
        let mut assignments = Vec::with_capacity(requests.len().min(slots.len()));
        let mut unmatched = Vec::new();

        for &request_index in &processing_order {
            let request = &requests[request_index];

            let found = slots
                .iter()
                .enumerate()
                .find(|(i, slot)| !consumed[*i] && config.filters.accepts(slot, request));

            match found {
                Some((slot_index, slot)) => {
                    if exclusive {
                        consumed[slot_index] = true;
                    }
                    debug!(
                        request_index,
                        slot_index,
                        patient = %request.patient,
                        practitioner = %slot.practitioner,
                        "assigned slot"
                    );
                    assignments.push(Assignment {
                        patient: request.patient.clone(),
                        slot: slot.clone(),
                        practitioner: slot.practitioner.clone(),
                        request_index,
                        slot_index,
                    });
                }
                None => {
                    debug!(
                        request_index,
                        patient = %request.patient,
                        specialty = %request.specialty,
                        "no eligible slot"
                    );
                    unmatched.push(request_index);
                }
            }
        }

        info!(
            assigned = assignments.len(),
            unmatched = unmatched.len(),
            "allocation complete"
        );

        Ok(AllocResult {
            assignments,
            unmatched,
            processing_order,
        })
    }

    /// Validates raw feed records strictly, then runs allocation.
    ///
    /// Indices in the result refer to positions in the raw slices.
    pub fn run_records(
        slots: &[RawSlot],
        requests: &[RawRequest],
        config: &AllocConfig,
    ) -> Result<AllocResult, Error> {
        let slots = validate_slots(slots)?;
        let requests = validate_requests(requests)?;
        Self::run(&slots, &requests, config)
    }

    /// Runs allocation over independent pools.
    ///
    /// Results are returned in job order. With [`AllocConfig::parallel`]
    /// set, jobs run on the rayon thread pool.
    pub fn run_batch(jobs: &[AllocJob], config: &AllocConfig) -> Vec<Result<AllocResult, Error>> {
        if config.parallel {
            jobs.par_iter()
                .map(|job| Self::run(&job.slots, &job.requests, config))
                .collect()
        } else {
            jobs.iter()
                .map(|job| Self::run(&job.slots, &job.requests, config))
                .collect()
        }
    }
}

/// Typed records skip feed validation, so required text is checked here.
fn check_records(slots: &[Slot], requests: &[Request]) -> Result<(), ValidationError> {
    for (index, slot) in slots.iter().enumerate() {
        not_blank(RecordKind::Slot, index, "specialty", &slot.specialty)?;
        not_blank(RecordKind::Slot, index, "practitioner", &slot.practitioner)?;
    }
    for (index, request) in requests.iter().enumerate() {
        not_blank(RecordKind::Request, index, "patient", &request.patient)?;
        not_blank(RecordKind::Request, index, "specialty", &request.specialty)?;
    }
    Ok(())
}

fn not_blank(
    record: RecordKind,
    index: usize,
    field: &'static str,
    value: &str,
) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::EmptyField {
            record,
            index,
            field,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alloc::TieBreak;
    use crate::model::{parse_timestamp, Urgency};
    use crate::records::RawUrgency;

    fn ts(s: &str) -> chrono::DateTime<chrono::Utc> {
        parse_timestamp(s).unwrap()
    }

    fn slot(specialty: &str, at: &str, practitioner: &str) -> Slot {
        Slot::new(specialty, ts(at), practitioner)
    }

    fn request(patient: &str, urgency: impl Into<Urgency>, requested: &str, earliest: &str) -> Request {
        Request::new(patient, "Cardiology", urgency, ts(requested), ts(earliest))
    }

    fn patients(result: &AllocResult) -> Vec<&str> {
        result.assignments.iter().map(|a| a.patient.as_str()).collect()
    }

    #[test]
    fn test_end_to_end_scenario() {
        let slots = vec![slot("Cardiology", "2025-03-01T09:00", "Dr.A")];
        let requests = vec![
            request("P1", 2u32, "2025-02-10", "2025-02-15"),
            request("P2", 1u32, "2025-02-01", "2025-02-15"),
        ];

        let result = AllocRunner::run(&slots, &requests, &AllocConfig::default()).unwrap();

        assert_eq!(patients(&result), vec!["P1"]);
        assert_eq!(result.assignments[0].practitioner, "Dr.A");
        assert_eq!(result.assignments[0].slot, slots[0]);
        assert_eq!(result.unmatched, vec![1]);
    }

    #[test]
    fn test_processing_order() {
        let requests = vec![
            request("req1", 1u32, "2025-02-01", "2025-02-01"),
            request("req2", 3u32, "2025-02-05", "2025-02-01"),
            request("req3", 3u32, "2025-02-01", "2025-02-01"),
        ];
        let result = AllocRunner::run(&[], &requests, &AllocConfig::default()).unwrap();
        assert_eq!(result.processing_order, vec![2, 1, 0]);
        assert_eq!(result.unmatched, vec![2, 1, 0]);
    }

    #[test]
    fn test_exclusive_consumption() {
        let slots = vec![slot("Cardiology", "2025-03-01", "Dr.A")];
        let requests = vec![
            request("first", 2u32, "2025-02-01", "2025-02-01"),
            request("second", 2u32, "2025-02-01", "2025-02-01"),
        ];
        let result = AllocRunner::run(&slots, &requests, &AllocConfig::default()).unwrap();
        assert_eq!(patients(&result), vec!["first"]);
        assert_eq!(result.unmatched, vec![1]);
    }

    #[test]
    fn test_shared_allowed_reuses_slot() {
        let slots = vec![slot("Cardiology", "2025-03-01", "Dr.A")];
        let requests = vec![
            request("first", 2u32, "2025-02-01", "2025-02-01"),
            request("second", 2u32, "2025-02-01", "2025-02-01"),
        ];
        let config = AllocConfig::default().with_slot_consumption(SlotConsumption::SharedAllowed);
        let result = AllocRunner::run(&slots, &requests, &config).unwrap();
        assert_eq!(patients(&result), vec!["first", "second"]);
        assert!(result.assignments.iter().all(|a| a.slot_index == 0));
    }

    #[test]
    fn test_first_eligible_slot_in_input_order() {
        let slots = vec![
            slot("Oncology", "2025-03-01", "Dr.O"),
            slot("Cardiology", "2025-02-01", "Dr.Early"),
            slot("Cardiology", "2025-03-05", "Dr.B"),
            slot("Cardiology", "2025-03-02", "Dr.C"),
        ];
        let requests = vec![request("P1", 1u32, "2025-01-01", "2025-02-15")];
        let result = AllocRunner::run(&slots, &requests, &AllocConfig::default()).unwrap();
        // Dr.B comes first in input order even though Dr.C is sooner
        assert_eq!(result.assignments[0].practitioner, "Dr.B");
        assert_eq!(result.assignments[0].slot_index, 2);
    }

    #[test]
    fn test_consumed_slot_moves_next_request_on() {
        let slots = vec![
            slot("Cardiology", "2025-03-01", "Dr.A"),
            slot("Cardiology", "2025-03-02", "Dr.B"),
        ];
        let requests = vec![
            request("low", 1u32, "2025-01-01", "2025-02-01"),
            request("high", 3u32, "2025-01-05", "2025-02-01"),
        ];
        let result = AllocRunner::run(&slots, &requests, &AllocConfig::default()).unwrap();
        assert_eq!(patients(&result), vec!["high", "low"]);
        assert_eq!(result.assignments[0].practitioner, "Dr.A");
        assert_eq!(result.assignments[1].practitioner, "Dr.B");
    }

    #[test]
    fn test_unavailable_slots_skipped() {
        let slots = vec![
            slot("Cardiology", "2025-03-01", "Dr.Busy").with_available(false),
            slot("Cardiology", "2025-03-02", "Dr.Free"),
        ];
        let requests = vec![request("P1", 1u32, "2025-01-01", "2025-02-01")];
        let result = AllocRunner::run(&slots, &requests, &AllocConfig::default()).unwrap();
        assert_eq!(result.assignments[0].practitioner, "Dr.Free");
    }

    #[test]
    fn test_empty_inputs() {
        let config = AllocConfig::default();
        let s = vec![slot("Cardiology", "2025-03-01", "Dr.A")];
        let r = vec![request("P1", 1u32, "2025-01-01", "2025-02-01")];

        for (slots, requests) in [(&[][..], &[][..]), (&[][..], &r[..]), (&s[..], &[][..])] {
            let result = AllocRunner::run(slots, requests, &config).unwrap();
            assert!(result.assignments.is_empty());
        }
    }

    #[test]
    fn test_unknown_tier_is_validation_error() {
        let requests = vec![
            request("P1", Urgency::urgent(), "2025-01-01", "2025-02-01"),
            request("P2", Urgency::tier("soonish"), "2025-01-01", "2025-02-01"),
        ];
        let err = AllocRunner::run(&[], &requests, &AllocConfig::default()).unwrap_err();
        assert_eq!(
            err,
            Error::Validation(ValidationError::UnknownUrgency {
                record: RecordKind::Request,
                index: 1,
                label: "soonish".into(),
            })
        );
    }

    #[test]
    fn test_blank_slot_fields_rejected() {
        let requests = vec![request("P1", 1u32, "2025-01-01", "2025-02-01")];
        let cases = [
            (slot("", "2025-03-01", "Dr.A"), "specialty"),
            (slot("Cardiology", "2025-03-01", "  "), "practitioner"),
        ];
        for (bad, field) in cases {
            let slots = vec![slot("Cardiology", "2025-03-01", "Dr.A"), bad];
            let err = AllocRunner::run(&slots, &requests, &AllocConfig::default()).unwrap_err();
            assert_eq!(
                err,
                Error::Validation(ValidationError::EmptyField {
                    record: RecordKind::Slot,
                    index: 1,
                    field,
                })
            );
        }
    }

    #[test]
    fn test_blank_request_fields_rejected() {
        let slots = vec![slot("", "2025-03-01", "")];
        let blank_patient = vec![request("", Urgency::urgent(), "2025-01-01", "2025-02-01")];
        let err = AllocRunner::run(&[], &blank_patient, &AllocConfig::default()).unwrap_err();
        assert_eq!(
            err,
            Error::Validation(ValidationError::EmptyField {
                record: RecordKind::Request,
                index: 0,
                field: "patient",
            })
        );

        let blank_specialty = vec![Request::new(
            "P1",
            " ",
            Urgency::urgent(),
            ts("2025-01-01"),
            ts("2025-02-01"),
        )];
        let err = AllocRunner::run(&[], &blank_specialty, &AllocConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::EmptyField { field: "specialty", .. })
        ));

        // blank slots are reported before blank requests
        let err = AllocRunner::run(&slots, &blank_patient, &AllocConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::EmptyField { record: RecordKind::Slot, .. })
        ));
    }

    #[test]
    fn test_tier_labels_ignore_case() {
        let requests = vec![
            request("routine", Urgency::tier("Routine"), "2025-01-01", "2025-02-01"),
            request("urgent", Urgency::tier(" URGENT"), "2025-01-02", "2025-02-01"),
            request("emergency", Urgency::tier("eMeRgEnCy"), "2025-01-03", "2025-02-01"),
            request("numeric", 2u32, "2025-01-01", "2025-02-01"),
        ];
        let result = AllocRunner::run(&[], &requests, &AllocConfig::default()).unwrap();
        // numeric 2 ties with "urgent" and wins on the earlier requested date
        assert_eq!(result.processing_order, vec![2, 3, 1, 0]);
    }

    #[test]
    fn test_custom_tier_resolves() {
        let requests = vec![
            request("P1", Urgency::emergency(), "2025-01-01", "2025-02-01"),
            request("P2", Urgency::tier("major-incident"), "2025-01-02", "2025-02-01"),
        ];
        let config = AllocConfig::default().with_urgency_tier("major-incident", 10);
        let result = AllocRunner::run(&[], &requests, &config).unwrap();
        assert_eq!(result.processing_order, vec![1, 0]);
    }

    #[test]
    fn test_invalid_config() {
        let config = AllocConfig::default().with_urgency_tier("", 1);
        let err = AllocRunner::run(&[], &[], &config).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_earliest_date_tie_break() {
        let slots = vec![slot("Cardiology", "2025-04-01", "Dr.A")];
        let requests = vec![
            request("flexible", 2u32, "2025-01-01", "2025-03-20"),
            request("eager", 2u32, "2025-01-09", "2025-02-01"),
        ];
        let by_requested = AllocRunner::run(&slots, &requests, &AllocConfig::default()).unwrap();
        assert_eq!(patients(&by_requested), vec!["flexible"]);

        let config = AllocConfig::default().with_tie_break(TieBreak::EarliestDateAsc);
        let by_earliest = AllocRunner::run(&slots, &requests, &config).unwrap();
        assert_eq!(patients(&by_earliest), vec!["eager"]);
    }

    #[test]
    fn test_custom_tie_break() {
        let slots = vec![slot("Cardiology", "2025-04-01", "Dr.A")];
        let requests = vec![
            request("Zed", 2u32, "2025-01-01", "2025-02-01"),
            request("Amy", 2u32, "2025-01-09", "2025-02-01"),
        ];
        let config = AllocConfig::default().with_custom_tie_break(|a, b| a.patient.cmp(&b.patient));
        let result = AllocRunner::run(&slots, &requests, &config).unwrap();
        assert_eq!(patients(&result), vec!["Amy"]);
    }

    #[test]
    fn test_request_constraints_applied() {
        let slots = vec![
            slot("Cardiology", "2025-03-01", "Dr.Far").with_trust("RJ1").with_travel_minutes(90),
            slot("Cardiology", "2025-03-02", "Dr.Other").with_trust("RAL").with_travel_minutes(10),
            slot("Cardiology", "2025-03-03", "Dr.Near").with_trust("RJ1").with_travel_minutes(20),
        ];
        let requests = vec![request("P1", 1u32, "2025-01-01", "2025-02-01")
            .with_preferred_trust("RJ1")
            .with_max_travel_minutes(30)];
        let result = AllocRunner::run(&slots, &requests, &AllocConfig::default()).unwrap();
        assert_eq!(result.assignments[0].practitioner, "Dr.Near");
    }

    #[test]
    fn test_run_records() {
        let slots = vec![RawSlot {
            specialty: Some("Cardiology".into()),
            date_time: Some("2025-03-01T09:00".into()),
            available: Some(true),
            practitioner: Some("Dr.A".into()),
            ..RawSlot::default()
        }];
        let requests = vec![RawRequest {
            patient: Some("P1".into()),
            specialty: Some("Cardiology".into()),
            urgency: Some(RawUrgency::Weight(2)),
            requested_date: Some("2025-02-10".into()),
            earliest_date: Some("2025-02-15".into()),
            ..RawRequest::default()
        }];
        let result = AllocRunner::run_records(&slots, &requests, &AllocConfig::default()).unwrap();
        assert_eq!(patients(&result), vec!["P1"]);
    }

    #[test]
    fn test_run_records_rejects_bad_slot() {
        let slots = vec![RawSlot {
            specialty: Some("Cardiology".into()),
            date_time: Some("not a date".into()),
            available: Some(true),
            practitioner: Some("Dr.A".into()),
            ..RawSlot::default()
        }];
        let err = AllocRunner::run_records(&slots, &[], &AllocConfig::default()).unwrap_err();
        match err {
            Error::Validation(v) => {
                assert_eq!(v.record(), RecordKind::Slot);
                assert_eq!(v.field(), "dateTime");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_run_batch_keeps_job_order() {
        let job_a = AllocJob::new(
            vec![slot("Cardiology", "2025-03-01", "Dr.A")],
            vec![request("A1", 1u32, "2025-01-01", "2025-02-01")],
        );
        let job_b = AllocJob::new(
            vec![],
            vec![request("B1", 1u32, "2025-01-01", "2025-02-01")],
        );
        let job_c = AllocJob::new(
            vec![slot("Cardiology", "2025-03-01", "Dr.C")],
            vec![request("C1", Urgency::tier("bogus"), "2025-01-01", "2025-02-01")],
        );
        let jobs = vec![job_a, job_b, job_c];

        for parallel in [false, true] {
            let config = AllocConfig::default().with_parallel(parallel);
            let results = AllocRunner::run_batch(&jobs, &config);
            assert_eq!(results.len(), 3);
            assert_eq!(patients(results[0].as_ref().unwrap()), vec!["A1"]);
            assert_eq!(results[1].as_ref().unwrap().unmatched, vec![0]);
            assert!(results[2].is_err());
        }
    }
}
