//! clinic — one traced day at an urgent-care clinic, then a batch of
//! independent replications.
//!
//! ```text
//! cargo run -p clinic [-- path/to/params.json]
//! RUST_LOG=debug cargo run -p clinic        # closing + turned-away arrivals
//! ```
//!
//! Without a path the built-in defaults are used (20 h open, 4 physicians,
//! 2 mental-health specialists).

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use log::info;

use uc_core::{ClinicParams, ModelId};
use uc_model::{SampleStats, UrgentCare};
use uc_output::{CsvWriter, OutputWriter, SimOutputObserver};
use uc_sim::{
    BatchSummary, ProcessedEvent, RunSummary, SimObserver, UrgentCareModel, run_replications,
};

// ── Constants ─────────────────────────────────────────────────────────────────

const TRACED_ID:    ModelId = ModelId(1);
const DURATION:     f64     = 24.0; // hours; service continues after closing
const REPLICATIONS: u32     = 100;
const OUTPUT_DIR:   &str    = "output/clinic";

// ── Observer wrapper to count events ──────────────────────────────────────────

struct CountingObserver<W: OutputWriter> {
    inner:   SimOutputObserver<W>,
    by_kind: BTreeMap<&'static str, usize>,
}

impl<W: OutputWriter> CountingObserver<W> {
    fn new(inner: SimOutputObserver<W>) -> Self {
        Self { inner, by_kind: BTreeMap::new() }
    }
}

impl<W: OutputWriter> SimObserver for CountingObserver<W> {
    fn on_run_start(&mut self, id: ModelId, horizon: uc_core::SimTime) {
        self.inner.on_run_start(id, horizon);
    }

    fn on_event(&mut self, event: &ProcessedEvent) {
        *self.by_kind.entry(event.kind.as_str()).or_default() += 1;
        self.inner.on_event(event);
    }

    fn on_run_end(&mut self, summary: &RunSummary, facility: &UrgentCare) {
        self.inner.on_run_end(summary, facility);
    }
}

fn load_params() -> Result<ClinicParams> {
    match std::env::args().nth(1) {
        Some(path) => ClinicParams::from_json_path(Path::new(&path))
            .with_context(|| format!("loading clinic parameters from {path}")),
        None => Ok(ClinicParams::default()),
    }
}

fn fmt_opt(x: Option<f64>) -> String {
    x.map_or_else(|| "-".to_owned(), |v| format!("{v:.3}"))
}

fn print_row(label: &str, s: &SampleStats) {
    println!("{label:<24} {:>10} ± {:<8}", fmt_opt(s.mean()), fmt_opt(s.st_dev()));
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::init();

    let params = load_params()?;
    println!("=== clinic — urgent-care discrete-event simulation ===");
    println!(
        "Open {} h  |  Physicians: {}  |  Specialists: {}  |  P(depression): {}",
        params.hours_open,
        params.n_physicians,
        params.n_mental_health_specialists,
        params.prob_depression,
    );
    println!(
        "Mean inter-arrival {:.3} h  |  mean exam {:.3} h  |  mean consult {:.3} h",
        params.arrival_time_dist.mean(),
        params.exam_time_dist.mean(),
        params.mental_health_consult_time_dist.mean(),
    );
    println!();

    // 1. One traced run, written to CSV.
    std::fs::create_dir_all(OUTPUT_DIR)?;
    let writer = CsvWriter::new(Path::new(OUTPUT_DIR))?;
    let mut obs = CountingObserver::new(SimOutputObserver::new(writer));

    let mut model = UrgentCareModel::new(TRACED_ID, params.clone())?;
    let t0 = Instant::now();
    let summary = model.simulate(DURATION, &mut obs)?;
    let elapsed = t0.elapsed();
    obs.inner.finish().context("writing simulation output")?;

    let stats = model.facility().stats();
    println!(
        "{TRACED_ID}: {} events in {:.3} ms, stopped ({}) at {}",
        summary.events_processed,
        elapsed.as_secs_f64() * 1e3,
        summary.stop.as_str(),
        summary.final_time,
    );
    for (kind, n) in &obs.by_kind {
        println!("  {kind:<30} {n:>6}");
    }
    println!();
    println!("{:<24} {:>10}", "Admitted", stats.admitted);
    println!("{:<24} {:>10}", "Turned away", stats.turned_away);
    println!("{:<24} {:>10}", "With depression", stats.with_depression);
    println!("{:<24} {:>10}", "Referred", stats.referrals);
    println!("{:<24} {:>10}", "Discharged", stats.discharged);
    println!("{:<24} {:>10}", "Still inside", model.facility().census());
    println!("{:<24} {:>10}", "Mean time in system (h)", fmt_opt(stats.time_in_system.mean()));
    println!("{:<24} {:>10}", "Mean exam wait (h)", fmt_opt(stats.exam_wait.mean()));
    println!("{:<24} {:>10.3}", "Mean census", stats.mean_census());
    println!(
        "{:<24} {:>10.3}",
        "Physician utilization",
        stats.physician_utilization(params.n_physicians)
    );
    println!("Trace written to {OUTPUT_DIR}/");
    println!();

    // 2. Independent replications.
    let ids: Vec<ModelId> = (1..=REPLICATIONS).map(ModelId).collect();
    let t0 = Instant::now();
    let results = run_replications(&params, &ids, DURATION)?;
    info!("{} replications in {:.3} s", results.len(), t0.elapsed().as_secs_f64());

    let summaries: Vec<&RunSummary> = results.iter().map(|r| &r.summary).collect();
    let json_path = Path::new(OUTPUT_DIR).join("replications.json");
    std::fs::write(&json_path, serde_json::to_string_pretty(&summaries)?)
        .with_context(|| format!("writing {}", json_path.display()))?;

    let batch = BatchSummary::from_results(&results, params.n_physicians);
    println!("Across {} replications (mean ± st. dev.):", batch.replications);
    println!("{}", "-".repeat(48));
    print_row("Admitted", &batch.admitted);
    print_row("Turned away", &batch.turned_away);
    print_row("Mean time in system (h)", &batch.time_in_system);
    print_row("Mean exam wait (h)", &batch.exam_wait);
    print_row("Mean census", &batch.mean_census);
    print_row("Physician utilization", &batch.physician_utilization);
    println!("Run summaries written to {}", json_path.display());

    Ok(())
}
