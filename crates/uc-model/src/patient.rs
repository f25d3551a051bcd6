//! Patients and their stay in the clinic.

use serde::Serialize;

use uc_core::{PatientId, SimTime};

/// A patient as sampled when their arrival is scheduled.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Patient {
    pub id:             PatientId,
    pub has_depression: bool,
}

impl Patient {
    pub fn new(id: PatientId, has_depression: bool) -> Self {
        Self { id, has_depression }
    }
}

/// An admitted patient travelling through exam and, possibly, consultation.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct Visit {
    pub patient:     Patient,
    /// Time the Arrival event admitted the patient.
    pub admitted_at: SimTime,
    /// Hours spent in either waiting room so far.
    pub waited:      f64,
}

impl Visit {
    pub fn new(patient: Patient, admitted_at: SimTime) -> Self {
        Self { patient, admitted_at, waited: 0.0 }
    }

    /// Hours since admission.
    #[inline]
    pub fn time_in_system(&self, now: SimTime) -> f64 {
        now.since(self.admitted_at)
    }
}
