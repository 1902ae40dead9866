//! Tunables for the refuelling planner.

use std::time::Duration;

/// Configuration parameters for a route search.
#[derive(Debug, Clone)]
pub struct PlannerConfig {
    /// Maximum concurrent with-stop route requests.
    pub concurrency: usize,

    /// Spacing of the thinned route path used for corridor tests (km).
    pub sample_step_km: f64,

    /// Maximum number of stations returned.
    pub shortlist_size: usize,

    /// Candidates enriched per 100 km of base route.
    pub candidates_per_100km: f64,

    /// Lower bound on enriched candidates.
    pub min_candidates: usize,

    /// Upper bound on enriched candidates.
    pub max_candidates: usize,

    /// Below this usable range (km) the candidate count is capped further.
    pub low_range_km: f64,

    /// Candidate cap applied below `low_range_km`.
    pub low_range_candidates: usize,

    /// Deadline for a single provider call.
    pub call_timeout: Duration,

    /// Deadline for the whole search.
    pub pipeline_timeout: Duration,
}

impl PlannerConfig {
    /// Set maximum concurrent enrichment requests.
    pub fn with_concurrency(mut self, n: usize) -> Self {
        self.concurrency = n;
        self
    }

    /// Set the per-call deadline.
    pub fn with_call_timeout(mut self, timeout: Duration) -> Self {
        self.call_timeout = timeout;
        self
    }

    /// Set the whole-search deadline.
    pub fn with_pipeline_timeout(mut self, timeout: Duration) -> Self {
        self.pipeline_timeout = timeout;
        self
    }

    /// Set the shortlist size.
    pub fn with_shortlist_size(mut self, n: usize) -> Self {
        self.shortlist_size = n;
        self
    }

    /// Number of pre-ranked candidates to enrich.
    ///
    /// Scales with trip length, clamped to the configured bounds, and capped
    /// further when the usable range is short.
    pub fn candidate_limit(&self, base_distance_km: f64, usable_range_km: f64) -> usize {
        let scaled = (base_distance_km / 100.0 * self.candidates_per_100km).round();
        let scaled = if scaled.is_finite() && scaled > 0.0 {
            scaled as usize
        } else {
            0
        };

        let n = scaled.clamp(self.min_candidates, self.max_candidates);
        if usable_range_km < self.low_range_km {
            n.min(self.low_range_candidates)
        } else {
            n
        }
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            concurrency: 5,
            sample_step_km: 1.5,
            shortlist_size: 3,
            candidates_per_100km: 20.0,
            min_candidates: 20,
            max_candidates: 60,
            low_range_km: 80.0,
            low_range_candidates: 30,
            call_timeout: Duration::from_secs(10),
            pipeline_timeout: Duration::from_secs(60),
        }
    }
}
