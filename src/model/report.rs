use crate::model::{JobId, Urgency, WorkerId};
use serde::Serialize;

/// Run-level summary handed back to the reporting layer.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub events_processed: u64,
    pub final_time_secs: f64,
    /// True when a run bound (max events / max time) stopped the run early.
    pub truncated: bool,
    pub completed: usize,
    pub in_service: usize,
    pub waiting: usize,
    pub unroutable: usize,
}

/// One row per job.
#[derive(Debug, Clone, Serialize)]
pub struct JobRow {
    pub job: JobId,
    pub urgency: Urgency,
    pub job_type: u32,
    pub created_secs: f64,
    pub remaining_secs: f64,
    #[serde(flatten)]
    pub outcome: JobOutcome,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum JobOutcome {
    Completed {
        worker: WorkerId,
        started_secs: f64,
        completed_secs: f64,
        /// service start minus creation
        waited_secs: f64,
        /// completion minus creation
        total_secs: f64,
    },
    /// Service begun but the run stopped before the completion event.
    InService { worker: WorkerId, started_secs: f64 },
    /// Broadcast but never reached by any capable worker.
    Waiting,
    /// No capable worker existed at arrival time.
    Unroutable,
}

/// One row per (worker, served job) pair.
#[derive(Debug, Clone, Serialize)]
pub struct ServiceRow {
    pub worker: WorkerId,
    pub job: JobId,
    pub start_secs: f64,
    pub end_secs: f64,
}

/// Per-worker utilization: busy/idle interval lists partition the run.
#[derive(Debug, Clone, Serialize)]
pub struct WorkerUtilization {
    pub worker: WorkerId,
    pub jobs_served: usize,
    pub busy_secs: f64,
    pub idle_secs: f64,
    /// busy / (busy + idle); 0 for a worker with no recorded time.
    pub occupancy: f64,
    pub busy_intervals: Vec<(f64, f64)>,
    pub idle_intervals: Vec<(f64, f64)>,
}

/// Per-event snapshot of every worker's backlog depth.
#[derive(Debug, Clone, Serialize)]
pub struct DepthSample {
    pub time_secs: f64,
    pub depths: Vec<usize>,
}

/// Full output contract of a run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub summary: RunSummary,
    pub jobs: Vec<JobRow>,
    pub services: Vec<ServiceRow>,
    pub utilization: Vec<WorkerUtilization>,
    pub depth_samples: Vec<DepthSample>,
}
