//! Independent replications of the same clinic under different seeds.
//!
//! Each replication is a separate [`UrgentCareModel`] with its own calendar,
//! clinic, and RNG; they share nothing but the (read-only) parameters.  With
//! the `parallel` feature they run on Rayon's pool.  Results always come
//! back in the order of `ids`.

use serde::Serialize;

use uc_core::{ClinicParams, ModelId};
use uc_model::{FacilityStats, SampleStats};

use crate::{NoopObserver, RunSummary, SimResult, UrgentCareModel};

/// Outcome of one replication.
#[derive(Clone, Debug, Serialize)]
pub struct ReplicationResult {
    pub id:      ModelId,
    pub summary: RunSummary,
    pub stats:   FacilityStats,
}

/// Run one model per id for `duration` hours.
///
/// Parameters are validated once up front; the first failing replication's
/// error is returned.
pub fn run_replications(
    params:   &ClinicParams,
    ids:      &[ModelId],
    duration: f64,
) -> SimResult<Vec<ReplicationResult>> {
    params.validate()?;

    #[cfg(not(feature = "parallel"))]
    {
        ids.iter()
            .map(|&id| run_one(params, id, duration))
            .collect()
    }

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;

        ids.par_iter()
            .map(|&id| run_one(params, id, duration))
            .collect()
    }
}

fn run_one(params: &ClinicParams, id: ModelId, duration: f64) -> SimResult<ReplicationResult> {
    let mut model = UrgentCareModel::new(id, params.clone())?;
    let summary = model.simulate(duration, &mut NoopObserver)?;
    Ok(ReplicationResult {
        id,
        summary,
        stats: model.facility().stats().clone(),
    })
}

// ── Across-replication summary ────────────────────────────────────────────────

/// Per-replication means, summarised across a batch.
///
/// Each field holds one observation per replication that produced a value
/// (e.g. a replication with no discharges contributes nothing to
/// `time_in_system`).
#[derive(Clone, Debug, Default, Serialize)]
pub struct BatchSummary {
    pub replications:          usize,
    pub admitted:              SampleStats,
    pub turned_away:           SampleStats,
    pub time_in_system:        SampleStats,
    pub exam_wait:             SampleStats,
    pub mean_census:           SampleStats,
    pub physician_utilization: SampleStats,
}

impl BatchSummary {
    pub fn from_results(results: &[ReplicationResult], n_physicians: u16) -> Self {
        let mut batch = BatchSummary {
            replications: results.len(),
            ..BatchSummary::default()
        };
        for r in results {
            let s = &r.stats;
            batch.admitted.record(s.admitted as f64);
            batch.turned_away.record(s.turned_away as f64);
            if let Some(m) = s.time_in_system.mean() {
                batch.time_in_system.record(m);
            }
            if let Some(m) = s.exam_wait.mean() {
                batch.exam_wait.record(m);
            }
            batch.mean_census.record(s.mean_census());
            batch.physician_utilization.record(s.physician_utilization(n_physicians));
        }
        batch
    }
}
