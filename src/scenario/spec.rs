use crate::model::{JobType, SimConfig, Urgency};
use crate::sim::{
    ExpSampler, FixedSampler, RunBounds, ServiceSampler, SimError, SimTime, SystemState,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioSpec {
    pub schema_version: u32,
    #[serde(default)]
    pub meta: Option<ScenarioMeta>,
    pub workers: Vec<WorkerSpec>,
    pub arrivals: Vec<ArrivalSpec>,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub bounds: Option<BoundsSpec>,
    /// Urgency table override; defaults to the built-in 2/3/5-minute table.
    #[serde(default)]
    pub urgency_table: Option<SimConfig>,
    /// When set, every service takes exactly this long instead of an
    /// exponential draw. Deterministic-test switch.
    #[serde(default)]
    pub fixed_service_secs: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioMeta {
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerSpec {
    pub id: usize,
    #[serde(default)]
    pub name: Option<String>,
    /// Job types this worker may serve.
    pub capabilities: Vec<u32>,
    #[serde(default = "default_working")]
    pub working: bool,
}

fn default_working() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArrivalSpec {
    pub at_secs: f64,
    pub job_type: u32,
    pub urgency: Urgency,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default)]
pub struct BoundsSpec {
    #[serde(default)]
    pub max_events: Option<u64>,
    #[serde(default)]
    pub max_time_secs: Option<f64>,
}

/// 根据场景描述构造系统状态：注册工作者、调度全部到达事件。
pub fn build_system(spec: &ScenarioSpec) -> Result<SystemState, SimError> {
    let cfg = spec.urgency_table.unwrap_or_default();
    let seed = spec.seed.unwrap_or(0);

    let sampler: Box<dyn ServiceSampler> = match spec.fixed_service_secs {
        Some(d) => {
            if !d.is_finite() || d < 0.0 {
                return Err(SimError::InvalidConfig(format!(
                    "fixed_service_secs must be non-negative and finite, got {d}"
                )));
            }
            Box::new(FixedSampler {
                duration: SimTime::from_secs_f64(d),
            })
        }
        None => Box::new(ExpSampler::new(&cfg, seed)?),
    };

    let bounds = match spec.bounds {
        Some(b) => RunBounds {
            max_events: b.max_events,
            max_time: b.max_time_secs.map(SimTime::from_secs_f64),
        },
        None => RunBounds::default(),
    };

    let mut state = SystemState::new(cfg, sampler, bounds)?;

    for (idx, w) in spec.workers.iter().enumerate() {
        if w.id != idx {
            return Err(SimError::InvalidConfig(format!(
                "worker ids must be dense and ascending: expected {idx}, got {}",
                w.id
            )));
        }
        state.add_worker(
            w.name.clone(),
            w.capabilities.iter().map(|&t| JobType(t)).collect(),
            w.working,
        );
    }

    for a in &spec.arrivals {
        if !a.at_secs.is_finite() || a.at_secs < 0.0 {
            return Err(SimError::InvalidConfig(format!(
                "arrival time must be non-negative and finite, got {}",
                a.at_secs
            )));
        }
        state.add_arrival(
            SimTime::from_secs_f64(a.at_secs),
            JobType(a.job_type),
            a.urgency,
        )?;
    }

    Ok(state)
}
