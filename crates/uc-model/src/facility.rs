//! The urgent-care facility: the single piece of mutable state all events
//! read and write.
//!
//! # Service discipline
//!
//! ```text
//! Arrival ──open?──► exam waiting room ──► physician ──► discharge
//!            │                                 │
//!            └─closed─► turned away            └─depression + specialists?
//!                                                  ──► consult waiting room
//!                                                  ──► specialist ──► discharge
//! ```
//!
//! Both waiting rooms are FIFO.  Closing only stops admissions; patients
//! already inside are served until the rooms drain.

use std::collections::VecDeque;

use log::debug;

use uc_core::{ClinicParams, CoreResult, ModelId, PatientId, Sample, Sampler, SimRng, SimTime};

use crate::{Calendar, Event, FacilityStats, ModelResult, Patient, Visit};

// ── Samplers ──────────────────────────────────────────────────────────────────

/// The compiled duration distributions of one clinic.
#[derive(Clone, Debug)]
pub struct Samplers {
    pub arrival: Sampler,
    pub exam:    Sampler,
    pub consult: Sampler,
}

impl Samplers {
    pub fn from_params(params: &ClinicParams) -> CoreResult<Self> {
        Ok(Self {
            arrival: params.arrival_time_dist.build("arrival_time_dist")?,
            exam:    params.exam_time_dist.build("exam_time_dist")?,
            consult: params
                .mental_health_consult_time_dist
                .build("mental_health_consult_time_dist")?,
        })
    }
}

// ── ServerPool ────────────────────────────────────────────────────────────────

/// A group of identical servers (physicians or specialists).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ServerPool {
    capacity: u16,
    busy:     u16,
}

impl ServerPool {
    pub fn new(capacity: u16) -> Self {
        Self { capacity, busy: 0 }
    }

    pub fn capacity(&self) -> u16 {
        self.capacity
    }

    pub fn busy(&self) -> u16 {
        self.busy
    }

    pub fn is_available(&self) -> bool {
        self.busy < self.capacity
    }

    /// Occupy one server.  Returns `false` (and changes nothing) when all
    /// servers are busy.
    fn seize(&mut self) -> bool {
        if self.is_available() {
            self.busy += 1;
            true
        } else {
            false
        }
    }

    fn release(&mut self) {
        debug_assert!(self.busy > 0, "release on an idle server pool");
        self.busy = self.busy.saturating_sub(1);
    }
}

// ── UrgentCare ────────────────────────────────────────────────────────────────

/// A visit sitting in a waiting room since `since`.
#[derive(Copy, Clone, Debug)]
struct Waiting {
    visit: Visit,
    since: SimTime,
}

/// State of one clinic for the duration of one run.
pub struct UrgentCare {
    id:                   ModelId,
    is_open:              bool,
    prob_depression:      f64,
    samplers:             Samplers,
    physicians:           ServerPool,
    specialists:          ServerPool,
    waiting_room:         VecDeque<Waiting>,
    consult_waiting_room: VecDeque<Waiting>,
    /// Admitted and not yet discharged.
    in_clinic:            usize,
    stats:                FacilityStats,
}

impl UrgentCare {
    /// Build an open, empty clinic.  `params` are expected to be validated.
    pub fn new(id: ModelId, params: &ClinicParams) -> CoreResult<Self> {
        Ok(Self::with_samplers(
            id,
            Samplers::from_params(params)?,
            params.n_physicians,
            params.n_mental_health_specialists,
            params.prob_depression,
        ))
    }

    /// Build a clinic from already compiled samplers.
    pub fn with_samplers(
        id:                 ModelId,
        samplers:           Samplers,
        n_physicians:       u16,
        n_specialists:      u16,
        prob_depression:    f64,
    ) -> Self {
        Self {
            id,
            is_open: true,
            prob_depression,
            samplers,
            physicians: ServerPool::new(n_physicians),
            specialists: ServerPool::new(n_specialists),
            waiting_room: VecDeque::new(),
            consult_waiting_room: VecDeque::new(),
            in_clinic: 0,
            stats: FacilityStats::default(),
        }
    }

    // ── Read access ───────────────────────────────────────────────────────

    pub fn id(&self) -> ModelId {
        self.id
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn stats(&self) -> &FacilityStats {
        &self.stats
    }

    pub fn physicians(&self) -> ServerPool {
        self.physicians
    }

    pub fn specialists(&self) -> ServerPool {
        self.specialists
    }

    /// Patients waiting for an exam.
    pub fn waiting_len(&self) -> usize {
        self.waiting_room.len()
    }

    /// Patients waiting for a mental-health consultation.
    pub fn consult_waiting_len(&self) -> usize {
        self.consult_waiting_room.len()
    }

    /// Patients admitted and not yet discharged.
    pub fn census(&self) -> usize {
        self.in_clinic
    }

    // ── Sampling ──────────────────────────────────────────────────────────

    /// Draw the gap until the next arrival.
    pub fn sample_interarrival(&self, rng: &mut SimRng) -> f64 {
        self.samplers.arrival.sample(rng)
    }

    /// Draw the attributes of patient `id`.
    pub fn new_patient(&self, id: PatientId, rng: &mut SimRng) -> Patient {
        Patient::new(id, rng.bernoulli(self.prob_depression))
    }

    // ── Mutations (called from event execution only) ─────────────────────

    /// Stop admitting patients.  Idempotent; the clinic never reopens.
    pub(crate) fn close(&mut self, now: SimTime) {
        if self.is_open {
            self.is_open = false;
            self.stats.closed_at = Some(now);
            debug!(
                "{}: closed at {now} with {} patients inside",
                self.id, self.in_clinic
            );
        }
    }

    /// Record an arrival that found the clinic closed.
    pub(crate) fn turn_away(&mut self, patient: PatientId, now: SimTime) {
        self.stats.turned_away += 1;
        debug!("{}: {patient} turned away at {now} (closed)", self.id);
    }

    /// Admit `patient` and start their exam if a physician is free.
    pub(crate) fn admit(
        &mut self,
        patient:  Patient,
        now:      SimTime,
        calendar: &mut Calendar,
        rng:      &mut SimRng,
    ) -> ModelResult<()> {
        debug_assert!(self.is_open, "admit on a closed clinic");
        self.in_clinic += 1;
        self.stats.admitted += 1;
        if patient.has_depression {
            self.stats.with_depression += 1;
        }

        let visit = Visit::new(patient, now);
        if self.physicians.is_available() {
            self.start_exam(visit, now, now, calendar, rng)?;
        } else {
            self.waiting_room.push_back(Waiting { visit, since: now });
        }
        self.record_levels(now);
        Ok(())
    }

    /// A physician finished examining `visit`.  Returns `true` if the
    /// patient was referred to a mental-health specialist.
    pub(crate) fn end_exam(
        &mut self,
        visit:    Visit,
        now:      SimTime,
        calendar: &mut Calendar,
        rng:      &mut SimRng,
    ) -> ModelResult<bool> {
        self.physicians.release();
        self.stats.exams_completed += 1;

        let referred = visit.patient.has_depression && self.specialists.capacity() > 0;
        if referred {
            self.stats.referrals += 1;
            if self.specialists.is_available() {
                self.start_consult(visit, now, now, calendar, rng)?;
            } else {
                self.consult_waiting_room.push_back(Waiting { visit, since: now });
            }
        } else {
            self.discharge(visit, now);
        }

        if let Some(next) = self.waiting_room.pop_front() {
            self.start_exam(next.visit, next.since, now, calendar, rng)?;
        }
        self.record_levels(now);
        Ok(referred)
    }

    /// A specialist finished consulting `visit`.
    pub(crate) fn end_consult(
        &mut self,
        visit:    Visit,
        now:      SimTime,
        calendar: &mut Calendar,
        rng:      &mut SimRng,
    ) -> ModelResult<()> {
        self.specialists.release();
        self.stats.consults_completed += 1;
        self.discharge(visit, now);

        if let Some(next) = self.consult_waiting_room.pop_front() {
            self.start_consult(next.visit, next.since, now, calendar, rng)?;
        }
        self.record_levels(now);
        Ok(())
    }

    /// Close the observation window of the time-weighted statistics.
    pub fn finish(&mut self, end: SimTime) {
        self.record_levels(end);
        self.stats.observed_until = Some(end);
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn start_exam(
        &mut self,
        visit:        Visit,
        queued_since: SimTime,
        now:          SimTime,
        calendar:     &mut Calendar,
        rng:          &mut SimRng,
    ) -> ModelResult<()> {
        let seized = self.physicians.seize();
        debug_assert!(seized, "start_exam without a free physician");
        let wait = now.since(queued_since);
        let mut visit = visit;
        visit.waited += wait;
        self.stats.exams_started += 1;
        self.stats.exam_wait.record(wait);

        let duration = self.samplers.exam.sample(rng);
        calendar.add(now.after(duration)?, Event::EndOfExam { visit })?;
        Ok(())
    }

    fn start_consult(
        &mut self,
        visit:        Visit,
        queued_since: SimTime,
        now:          SimTime,
        calendar:     &mut Calendar,
        rng:          &mut SimRng,
    ) -> ModelResult<()> {
        let seized = self.specialists.seize();
        debug_assert!(seized, "start_consult without a free specialist");
        let wait = now.since(queued_since);
        let mut visit = visit;
        visit.waited += wait;
        self.stats.consult_wait.record(wait);

        let duration = self.samplers.consult.sample(rng);
        calendar.add(now.after(duration)?, Event::EndOfMentalHealthConsult { visit })?;
        Ok(())
    }

    fn discharge(&mut self, visit: Visit, now: SimTime) {
        self.in_clinic -= 1;
        self.stats.discharged += 1;
        self.stats.time_in_system.record(visit.time_in_system(now));
    }

    fn record_levels(&mut self, now: SimTime) {
        self.stats.census.record(now, self.in_clinic as f64);
        self.stats.waiting_room.record(now, self.waiting_room.len() as f64);
        self.stats.busy_physicians.record(now, self.physicians.busy() as f64);
    }
}
