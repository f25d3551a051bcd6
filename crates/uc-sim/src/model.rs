//! The `UrgentCareModel` struct and its event loop.

use log::{debug, info, trace};
use serde::Serialize;

use uc_calendar::ScheduledEvent;
use uc_core::{ClinicParams, CoreError, ModelId, PatientId, SimRng, SimTime};
use uc_model::{Calendar, Event, UrgentCare};

use crate::{ProcessedEvent, SimObserver, SimResult};

// ── Run bookkeeping ───────────────────────────────────────────────────────────

/// Why the event loop stopped.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// No events were left on the calendar.
    CalendarExhausted,
    /// The next event was scheduled after the horizon.
    HorizonReached,
}

impl StopReason {
    pub fn as_str(self) -> &'static str {
        match self {
            StopReason::CalendarExhausted => "calendar_exhausted",
            StopReason::HorizonReached    => "horizon_reached",
        }
    }
}

/// Lifecycle of a model.  `simulate` may be called again from any state;
/// each call starts from a fresh clinic and calendar.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RunState {
    /// Constructed, never simulated.
    Idle,
    Running,
    Stopped(StopReason),
    /// An event failed; the clinic state is whatever it was at the failure.
    Failed,
}

/// What one `simulate` call did.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RunSummary {
    pub id:               ModelId,
    pub stop:             StopReason,
    pub horizon:          SimTime,
    /// Time of the last processed event (zero if none ran).
    pub final_time:       SimTime,
    pub events_processed: u64,
    /// Events still on the calendar when the loop stopped.
    pub events_pending:   usize,
}

// ── UrgentCareModel ───────────────────────────────────────────────────────────

/// One urgent-care clinic plus the calendar that drives it.
///
/// The model's [`ModelId`] is both its identity and its RNG seed: two models
/// with the same id and parameters produce identical runs.
pub struct UrgentCareModel {
    id:       ModelId,
    params:   ClinicParams,
    calendar: Calendar,
    facility: UrgentCare,
    state:    RunState,
}

impl UrgentCareModel {
    /// Validate `params` and build an idle model.
    ///
    /// Invalid parameters fail here with
    /// [`CoreError::InvalidConfiguration`]; no event is ever scheduled.
    pub fn new(id: ModelId, params: ClinicParams) -> SimResult<Self> {
        params.validate()?;
        let facility = UrgentCare::new(id, &params)?;
        Ok(Self {
            id,
            params,
            calendar: Calendar::new(),
            facility,
            state: RunState::Idle,
        })
    }

    pub fn id(&self) -> ModelId {
        self.id
    }

    pub fn params(&self) -> &ClinicParams {
        &self.params
    }

    /// The clinic of the most recent run (or a fresh one before any run).
    pub fn facility(&self) -> &UrgentCare {
        &self.facility
    }

    /// The calendar as the most recent run left it.
    pub fn calendar(&self) -> &Calendar {
        &self.calendar
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// Run the clinic from time zero until `duration` hours.
    ///
    /// Calls observer hooks around the run and after every processed event.
    /// Use [`NoopObserver`][crate::NoopObserver] if you don't need them.
    pub fn simulate<O: SimObserver>(
        &mut self,
        duration: f64,
        observer: &mut O,
    ) -> SimResult<RunSummary> {
        let horizon = SimTime::new(duration).map_err(|_| {
            CoreError::InvalidConfiguration(format!(
                "simulation duration must be finite and >= 0, got {duration}"
            ))
        })?;

        let mut rng = SimRng::new(self.id.seed());
        self.initialize(&mut rng)?;

        self.state = RunState::Running;
        info!(
            "{}: simulating {horizon} (closes at {}h)",
            self.id, self.params.hours_open
        );
        observer.on_run_start(self.id, horizon);

        let (stop, processed) = match self.run_loop(horizon, &mut rng, observer) {
            Ok(done) => done,
            Err(e) => {
                self.state = RunState::Failed;
                return Err(e);
            }
        };

        let end = match stop {
            StopReason::HorizonReached    => horizon,
            StopReason::CalendarExhausted => self.calendar.time(),
        };
        self.facility.finish(end);
        self.state = RunState::Stopped(stop);

        let summary = RunSummary {
            id:               self.id,
            stop,
            horizon,
            final_time:       self.calendar.time(),
            events_processed: processed,
            events_pending:   self.calendar.len(),
        };
        let stats = self.facility.stats();
        info!(
            "{}: stopped ({}) after {} events at {}; admitted {}, turned away {}, discharged {}",
            self.id,
            stop.as_str(),
            processed,
            summary.final_time,
            stats.admitted,
            stats.turned_away,
            stats.discharged,
        );
        observer.on_run_end(&summary, &self.facility);
        Ok(summary)
    }

    // ── Core loop ─────────────────────────────────────────────────────────

    /// Fresh calendar and clinic, then the two bootstrap events.
    fn initialize(&mut self, rng: &mut SimRng) -> SimResult<()> {
        self.calendar = Calendar::new();
        self.facility = UrgentCare::new(self.id, &self.params)?;

        self.calendar
            .add(self.params.closing_time()?, Event::CloseUrgentCare)?;

        // Same draw order as every later Arrival: interval first, then the
        // patient's attributes.
        let first_arrival = self.facility.sample_interarrival(rng);
        let patient = self.facility.new_patient(PatientId(0), rng);
        self.calendar
            .add(SimTime::ZERO.after(first_arrival)?, Event::Arrival { patient })?;

        debug!(
            "{}: bootstrapped {} events, first arrival at {first_arrival:.4}h",
            self.id,
            self.calendar.len()
        );
        Ok(())
    }

    fn run_loop<O: SimObserver>(
        &mut self,
        horizon:  SimTime,
        rng:      &mut SimRng,
        observer: &mut O,
    ) -> SimResult<(StopReason, u64)> {
        let mut processed = 0u64;
        loop {
            match self.calendar.peek_time() {
                None => return Ok((StopReason::CalendarExhausted, processed)),
                Some(t) if t > horizon => return Ok((StopReason::HorizonReached, processed)),
                Some(_) => {}
            }

            let ScheduledEvent { time, seq, event } = self.calendar.next()?;
            let kind = event.kind();
            let outcome = event.process(&mut self.facility, &mut self.calendar, rng)?;
            processed += 1;

            trace!("{}: #{seq} {kind} at {time} -> {}", self.id, outcome.as_str());
            observer.on_event(&ProcessedEvent { time, seq, kind, outcome });
        }
    }
}
