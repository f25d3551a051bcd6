//! The clinic's event taxonomy and how each event executes.

use std::fmt;

use serde::Serialize;

use uc_core::{PatientId, SimRng};

use crate::{Calendar, ModelResult, Patient, UrgentCare, Visit};

// ── Event ─────────────────────────────────────────────────────────────────────

/// A unit of work scheduled on the calendar.
///
/// The scheduled time lives in the calendar entry, not in the event.
/// [`process`][Event::process] consumes the event, so an event can run at
/// most once.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// `patient` reaches the clinic door.
    Arrival { patient: Patient },
    /// The clinic stops admitting patients.
    CloseUrgentCare,
    /// A physician finishes examining `visit`.
    EndOfExam { visit: Visit },
    /// A mental-health specialist finishes consulting `visit`.
    EndOfMentalHealthConsult { visit: Visit },
}

/// Payload-free discriminant of [`Event`], used in traces and output.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Arrival,
    CloseUrgentCare,
    EndOfExam,
    EndOfMentalHealthConsult,
}

impl EventKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::Arrival                  => "arrival",
            EventKind::CloseUrgentCare          => "close_urgent_care",
            EventKind::EndOfExam                => "end_of_exam",
            EventKind::EndOfMentalHealthConsult => "end_of_mental_health_consult",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What executing an event did.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub enum Outcome {
    Admitted(PatientId),
    /// The clinic was closed; nothing but the `turned_away` counter changed.
    TurnedAway(PatientId),
    Closed,
    ExamEnded { patient: PatientId, referred: bool },
    ConsultEnded(PatientId),
}

impl Outcome {
    /// The patient the event concerned, if any.
    pub fn patient(&self) -> Option<PatientId> {
        match *self {
            Outcome::Admitted(p)
            | Outcome::TurnedAway(p)
            | Outcome::ExamEnded { patient: p, .. }
            | Outcome::ConsultEnded(p) => Some(p),
            Outcome::Closed => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Admitted(_)                          => "admitted",
            Outcome::TurnedAway(_)                        => "turned_away",
            Outcome::Closed                               => "closed",
            Outcome::ExamEnded { referred: true, .. }     => "referred",
            Outcome::ExamEnded { referred: false, .. }    => "discharged",
            Outcome::ConsultEnded(_)                      => "discharged",
        }
    }
}

impl Event {
    pub fn kind(&self) -> EventKind {
        match self {
            Event::Arrival { .. }                  => EventKind::Arrival,
            Event::CloseUrgentCare                 => EventKind::CloseUrgentCare,
            Event::EndOfExam { .. }                => EventKind::EndOfExam,
            Event::EndOfMentalHealthConsult { .. } => EventKind::EndOfMentalHealthConsult,
        }
    }

    /// Execute the event at the calendar's current time.
    ///
    /// The run loop calls this right after `calendar.next()` returned the
    /// event, so `calendar.time()` is the event's scheduled time.  Follow-on
    /// events are added to `calendar`; an attempt to schedule before
    /// `calendar.time()` surfaces as [`ModelError::Calendar`].
    ///
    /// [`ModelError::Calendar`]: crate::ModelError::Calendar
    pub fn process(
        self,
        facility: &mut UrgentCare,
        calendar: &mut Calendar,
        rng:      &mut SimRng,
    ) -> ModelResult<Outcome> {
        let now = calendar.time();
        match self {
            Event::Arrival { patient } => {
                let id = patient.id;

                // Admission is gated on the open flag; nothing else changes
                // for a turned-away patient.
                let outcome = if facility.is_open() {
                    facility.admit(patient, now, calendar, rng)?;
                    Outcome::Admitted(id)
                } else {
                    facility.turn_away(id, now);
                    Outcome::TurnedAway(id)
                };

                // The arrival chain continues even after closing.
                let interval = facility.sample_interarrival(rng);
                let next = facility.new_patient(id.next(), rng);
                calendar.add(now.after(interval)?, Event::Arrival { patient: next })?;

                Ok(outcome)
            }

            Event::CloseUrgentCare => {
                facility.close(now);
                Ok(Outcome::Closed)
            }

            Event::EndOfExam { visit } => {
                let referred = facility.end_exam(visit, now, calendar, rng)?;
                Ok(Outcome::ExamEnded { patient: visit.patient.id, referred })
            }

            Event::EndOfMentalHealthConsult { visit } => {
                facility.end_consult(visit, now, calendar, rng)?;
                Ok(Outcome::ConsultEnded(visit.patient.id))
            }
        }
    }
}
