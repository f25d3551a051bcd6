//! Unit tests for uc-model.

use uc_core::{ModelId, PatientId, Sampler, SimRng, SimTime};

use crate::{Calendar, Event, EventKind, Outcome, Patient, Samplers, UrgentCare};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn t(hours: f64) -> SimTime {
    SimTime::new(hours).unwrap()
}

/// A clinic with fixed (constant) durations so every event time is known.
fn clinic(
    physicians:   u16,
    specialists:  u16,
    p_depression: f64,
    interarrival: f64,
    exam:         f64,
    consult:      f64,
) -> UrgentCare {
    let samplers = Samplers {
        arrival: Sampler::Constant(interarrival),
        exam:    Sampler::Constant(exam),
        consult: Sampler::Constant(consult),
    };
    UrgentCare::with_samplers(ModelId(0), samplers, physicians, specialists, p_depression)
}

fn arrival(id: u32, depressed: bool) -> Event {
    Event::Arrival { patient: Patient::new(PatientId(id), depressed) }
}

/// Pop and execute the next event; returns (time, kind, outcome).
fn step(cal: &mut Calendar, fac: &mut UrgentCare, rng: &mut SimRng) -> (f64, EventKind, Outcome) {
    let scheduled = cal.next().unwrap();
    let kind = scheduled.event.kind();
    let outcome = scheduled.event.process(fac, cal, rng).unwrap();
    (scheduled.time.hours(), kind, outcome)
}

fn pending(cal: &Calendar) -> Vec<(f64, EventKind)> {
    cal.iter().map(|(time, e)| (time.hours(), e.kind())).collect()
}

// ── Arrival ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod arrival_tests {
    use super::*;

    #[test]
    fn open_clinic_admits_and_chains_next_arrival() {
        let mut fac = clinic(1, 0, 0.0, 0.25, 1.0, 0.5);
        let mut cal = Calendar::new();
        let mut rng = SimRng::new(1);
        cal.add(t(0.0), arrival(0, false)).unwrap();

        let (_, kind, outcome) = step(&mut cal, &mut fac, &mut rng);
        assert_eq!(kind, EventKind::Arrival);
        assert_eq!(outcome, Outcome::Admitted(PatientId(0)));
        assert_eq!(fac.census(), 1);
        assert_eq!(fac.physicians().busy(), 1);
        assert_eq!(fac.stats().admitted, 1);
        assert_eq!(
            pending(&cal),
            vec![(0.25, EventKind::Arrival), (1.0, EventKind::EndOfExam)]
        );
    }

    #[test]
    fn next_patient_gets_sequential_id() {
        let mut fac = clinic(1, 0, 0.0, 0.25, 1.0, 0.5);
        let mut cal = Calendar::new();
        let mut rng = SimRng::new(1);
        cal.add(t(0.0), arrival(41, false)).unwrap();
        step(&mut cal, &mut fac, &mut rng);

        let next = cal
            .iter()
            .find_map(|(_, e)| match e {
                Event::Arrival { patient } => Some(patient.id),
                _ => None,
            })
            .unwrap();
        assert_eq!(next, PatientId(42));
    }

    #[test]
    fn busy_physicians_queue_patients_fifo() {
        let mut fac = clinic(1, 0, 0.0, 0.25, 1.1, 0.5);
        let mut cal = Calendar::new();
        let mut rng = SimRng::new(1);
        cal.add(t(0.0), arrival(0, false)).unwrap();

        // Arrivals at 0, 0.25, 0.5, 0.75, 1.0; first exam ends at 1.1.
        for _ in 0..5 {
            let (_, kind, _) = step(&mut cal, &mut fac, &mut rng);
            assert_eq!(kind, EventKind::Arrival);
        }
        assert_eq!(fac.waiting_len(), 4);
        assert_eq!(fac.census(), 5);

        let (time, kind, outcome) = step(&mut cal, &mut fac, &mut rng);
        assert_eq!((time, kind), (1.1, EventKind::EndOfExam));
        assert_eq!(outcome, Outcome::ExamEnded { patient: PatientId(0), referred: false });
        assert_eq!(fac.waiting_len(), 3, "patient 1 left the waiting room");
        assert_eq!(fac.physicians().busy(), 1);

        // Patient 1 waited from 0.25 to 1.1.
        let wait = fac.stats().exam_wait.max().unwrap();
        assert!((wait - 0.85).abs() < 1e-9, "got {wait}");

        // The next exam to finish belongs to patient 1.
        let next_exam = cal
            .iter()
            .find_map(|(_, e)| match e {
                Event::EndOfExam { visit } => Some(visit.patient.id),
                _ => None,
            })
            .unwrap();
        assert_eq!(next_exam, PatientId(1));
    }

    #[test]
    fn closed_clinic_turns_away_but_keeps_chain() {
        let mut fac = clinic(2, 0, 0.0, 0.25, 1.0, 0.5);
        let mut cal = Calendar::new();
        let mut rng = SimRng::new(1);
        cal.add(t(0.0), Event::CloseUrgentCare).unwrap();
        cal.add(t(0.5), arrival(0, false)).unwrap();

        let (_, kind, outcome) = step(&mut cal, &mut fac, &mut rng);
        assert_eq!((kind, outcome), (EventKind::CloseUrgentCare, Outcome::Closed));
        assert!(!fac.is_open());
        assert_eq!(fac.stats().closed_at, Some(t(0.0)));

        let (_, _, outcome) = step(&mut cal, &mut fac, &mut rng);
        assert_eq!(outcome, Outcome::TurnedAway(PatientId(0)));
        assert_eq!(fac.census(), 0);
        assert_eq!(fac.waiting_len(), 0);
        assert_eq!(fac.physicians().busy(), 0);
        assert_eq!(fac.stats().admitted, 0);
        assert_eq!(fac.stats().turned_away, 1);
        assert_eq!(pending(&cal), vec![(0.75, EventKind::Arrival)]);
    }

    #[test]
    fn closing_twice_keeps_first_time() {
        let mut fac = clinic(1, 0, 0.0, 1.0, 1.0, 1.0);
        let mut cal = Calendar::new();
        let mut rng = SimRng::new(1);
        cal.add(t(2.0), Event::CloseUrgentCare).unwrap();
        cal.add(t(3.0), Event::CloseUrgentCare).unwrap();
        step(&mut cal, &mut fac, &mut rng);
        step(&mut cal, &mut fac, &mut rng);
        assert!(!fac.is_open());
        assert_eq!(fac.stats().closed_at, Some(t(2.0)));
    }

    #[test]
    fn admitted_patient_is_served_after_closing() {
        // Arrival at 7.5, exam of 1.5 h ends at 9.0, clinic closes at 8.0.
        let mut fac = clinic(1, 0, 0.0, 1.0, 1.5, 1.0);
        let mut cal = Calendar::new();
        let mut rng = SimRng::new(1);
        cal.add(t(8.0), Event::CloseUrgentCare).unwrap();
        cal.add(t(7.5), arrival(0, false)).unwrap();

        let trace: Vec<_> = (0..4).map(|_| step(&mut cal, &mut fac, &mut rng)).collect();
        assert_eq!(trace[0], (7.5, EventKind::Arrival, Outcome::Admitted(PatientId(0))));
        assert_eq!(trace[1], (8.0, EventKind::CloseUrgentCare, Outcome::Closed));
        assert_eq!(trace[2], (8.5, EventKind::Arrival, Outcome::TurnedAway(PatientId(1))));
        assert_eq!(
            trace[3],
            (9.0, EventKind::EndOfExam, Outcome::ExamEnded { patient: PatientId(0), referred: false })
        );
        assert_eq!(fac.stats().discharged, 1);
        assert_eq!(fac.stats().time_in_system.mean(), Some(1.5));
    }
}

// ── Mental-health pathway ─────────────────────────────────────────────────────

#[cfg(test)]
mod consult_tests {
    use super::*;

    #[test]
    fn depressed_patient_is_referred_then_discharged() {
        let mut fac = clinic(1, 1, 1.0, 100.0, 1.0, 2.0);
        let mut cal = Calendar::new();
        let mut rng = SimRng::new(1);
        cal.add(t(0.0), arrival(0, true)).unwrap();

        step(&mut cal, &mut fac, &mut rng);
        assert_eq!(fac.stats().with_depression, 1);

        let (time, _, outcome) = step(&mut cal, &mut fac, &mut rng);
        assert_eq!(time, 1.0);
        assert_eq!(outcome, Outcome::ExamEnded { patient: PatientId(0), referred: true });
        assert_eq!(fac.specialists().busy(), 1);
        assert_eq!(fac.census(), 1, "still inside during the consult");

        let (time, kind, outcome) = step(&mut cal, &mut fac, &mut rng);
        assert_eq!((time, kind), (3.0, EventKind::EndOfMentalHealthConsult));
        assert_eq!(outcome, Outcome::ConsultEnded(PatientId(0)));
        assert_eq!(fac.census(), 0);
        assert_eq!(fac.stats().referrals, 1);
        assert_eq!(fac.stats().consults_completed, 1);
        assert_eq!(fac.stats().time_in_system.mean(), Some(3.0));
    }

    #[test]
    fn no_specialists_means_discharge_after_exam() {
        let mut fac = clinic(1, 0, 1.0, 100.0, 1.0, 2.0);
        let mut cal = Calendar::new();
        let mut rng = SimRng::new(1);
        cal.add(t(0.0), arrival(0, true)).unwrap();

        step(&mut cal, &mut fac, &mut rng);
        let (_, _, outcome) = step(&mut cal, &mut fac, &mut rng);
        assert_eq!(outcome, Outcome::ExamEnded { patient: PatientId(0), referred: false });
        assert_eq!(fac.census(), 0);
        assert_eq!(fac.stats().referrals, 0);
        assert_eq!(outcome.as_str(), "discharged");
    }

    #[test]
    fn busy_specialist_queues_consults() {
        let mut fac = clinic(2, 1, 1.0, 100.0, 1.0, 2.0);
        let mut cal = Calendar::new();
        let mut rng = SimRng::new(1);
        cal.add(t(0.0), arrival(0, true)).unwrap();
        cal.add(t(0.5), arrival(1, true)).unwrap();

        step(&mut cal, &mut fac, &mut rng); // A0 @ 0
        step(&mut cal, &mut fac, &mut rng); // A1 @ 0.5
        step(&mut cal, &mut fac, &mut rng); // E0 @ 1.0 → consult until 3.0
        let (time, _, _) = step(&mut cal, &mut fac, &mut rng); // E1 @ 1.5 → waits
        assert_eq!(time, 1.5);
        assert_eq!(fac.consult_waiting_len(), 1);

        let (time, _, outcome) = step(&mut cal, &mut fac, &mut rng);
        assert_eq!((time, outcome), (3.0, Outcome::ConsultEnded(PatientId(0))));
        assert_eq!(fac.consult_waiting_len(), 0);
        assert_eq!(fac.specialists().busy(), 1);
        let waited = cal.iter().find_map(|(_, e)| match e {
            Event::EndOfMentalHealthConsult { visit } => Some(visit.waited),
            _ => None,
        });
        assert_eq!(waited, Some(1.5), "consult queue time carried on the visit");

        let (time, _, outcome) = step(&mut cal, &mut fac, &mut rng);
        assert_eq!((time, outcome), (5.0, Outcome::ConsultEnded(PatientId(1))));
        assert_eq!(fac.stats().consult_wait.count(), 2);
        assert_eq!(fac.stats().consult_wait.mean(), Some(0.75));
        assert_eq!(fac.stats().discharged, 2);
    }
}

// ── Statistics ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod stats_tests {
    use super::*;
    use crate::{SampleStats, TimeWeighted};

    #[test]
    fn sample_stats_moments() {
        let mut s = SampleStats::default();
        assert_eq!(s.mean(), None);
        assert_eq!(s.st_dev(), None);
        for x in [1.0, 2.0, 3.0, 4.0] {
            s.record(x);
        }
        assert_eq!(s.count(), 4);
        assert_eq!(s.mean(), Some(2.5));
        assert_eq!(s.min(), Some(1.0));
        assert_eq!(s.max(), Some(4.0));
        let sd = s.st_dev().unwrap();
        assert!((sd - (5.0f64 / 3.0).sqrt()).abs() < 1e-12, "got {sd}");
    }

    #[test]
    fn time_weighted_area() {
        let mut tw = TimeWeighted::default();
        tw.record(t(0.0), 0.0);
        tw.record(t(1.0), 2.0);
        tw.record(t(3.0), 1.0);
        assert_eq!(tw.mean(t(4.0)), 1.25);
        assert_eq!(tw.max(), 2.0);
        assert_eq!(tw.current(), 1.0);
    }

    #[test]
    fn time_weighted_ignores_the_past() {
        let mut tw = TimeWeighted::default();
        tw.record(t(2.0), 4.0);
        tw.record(t(1.0), 100.0);
        assert_eq!(tw.current(), 4.0);
    }

    #[test]
    fn utilization_and_census_after_finish() {
        let mut fac = clinic(1, 0, 0.0, 100.0, 1.0, 1.0);
        let mut cal = Calendar::new();
        let mut rng = SimRng::new(1);
        cal.add(t(0.0), arrival(0, false)).unwrap();
        step(&mut cal, &mut fac, &mut rng);
        step(&mut cal, &mut fac, &mut rng);

        assert_eq!(fac.stats().physician_utilization(1), 0.0, "window not closed yet");
        fac.finish(t(4.0));
        assert_eq!(fac.stats().observed_until, Some(t(4.0)));
        assert_eq!(fac.stats().physician_utilization(1), 0.25);
        assert_eq!(fac.stats().mean_census(), 0.25);
        assert_eq!(fac.stats().mean_waiting(), 0.0);
    }
}

// ── Construction ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod construction {
    use uc_core::{ClinicParams, TimeDist};

    use super::*;

    #[test]
    fn new_clinic_is_open_and_empty() {
        let fac = UrgentCare::new(ModelId(3), &ClinicParams::default()).unwrap();
        assert!(fac.is_open());
        assert_eq!(fac.id(), ModelId(3));
        assert_eq!(fac.census(), 0);
        assert_eq!(fac.physicians().capacity(), 4);
        assert_eq!(fac.specialists().capacity(), 2);
    }

    #[test]
    fn invalid_distribution_fails_construction() {
        let params = ClinicParams {
            exam_time_dist: TimeDist::Uniform { low: 1.0, high: 0.5 },
            ..ClinicParams::default()
        };
        assert!(UrgentCare::new(ModelId(0), &params).is_err());
    }

    #[test]
    fn new_patient_uses_probability() {
        let fac = clinic(1, 0, 1.0, 1.0, 1.0, 1.0);
        let mut rng = SimRng::new(8);
        assert!((0..100).all(|i| fac.new_patient(PatientId(i), &mut rng).has_depression));
    }
}
