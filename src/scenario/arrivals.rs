//! 到达计划与随机场景生成
//!
//! 到达间隔取指数分布（参数为平均间隔），直到超过时间范围；
//! 随机场景在此基础上为每个到达抽取紧急程度与作业类型，
//! 为每个工作者抽取随机能力子集。

use super::spec::{ArrivalSpec, ScenarioMeta, ScenarioSpec, WorkerSpec};
use crate::model::Urgency;
use crate::sim::SimError;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Exp};

const URGENCIES: [Urgency; 3] = [Urgency::Urgent, Urgency::Priority, Urgency::Routine];

/// 随机场景生成参数。
#[derive(Debug, Clone)]
pub struct GenOpts {
    pub workers: usize,
    /// 平均到达间隔（秒）。
    pub mean_gap_secs: f64,
    /// 到达生成的时间范围（秒）。
    pub horizon_secs: f64,
    /// 作业类型数量，类型标签取 `1..=job_types`。
    pub job_types: u32,
    pub seed: u64,
}

impl Default for GenOpts {
    fn default() -> Self {
        GenOpts {
            workers: 3,
            mean_gap_secs: 60.0,
            horizon_secs: 3_600.0,
            job_types: 5,
            seed: 0,
        }
    }
}

/// 生成指数间隔的到达时刻序列，直到累积时间超出范围。
/// 最后一个时刻可能越过 `horizon_secs`。
pub fn exponential_arrival_times(
    mean_gap_secs: f64,
    horizon_secs: f64,
    rng: &mut StdRng,
) -> Result<Vec<f64>, SimError> {
    if !mean_gap_secs.is_finite() || mean_gap_secs <= 0.0 {
        return Err(SimError::InvalidConfig(format!(
            "mean arrival gap must be positive and finite, got {mean_gap_secs}"
        )));
    }
    let gap = Exp::new(1.0 / mean_gap_secs)
        .map_err(|e| SimError::InvalidConfig(format!("arrival gap distribution: {e}")))?;

    let mut times = Vec::new();
    let mut t = 0.0;
    while t < horizon_secs {
        t += gap.sample(rng);
        times.push(t);
    }
    Ok(times)
}

/// 生成一个完整的随机场景：随机能力集合的工作者 + 泊松到达流。
pub fn random_scenario(opts: &GenOpts) -> Result<ScenarioSpec, SimError> {
    if opts.workers == 0 {
        return Err(SimError::InvalidConfig("worker count must be positive".into()));
    }
    if opts.job_types == 0 {
        return Err(SimError::InvalidConfig("job type count must be positive".into()));
    }
    let mut rng = StdRng::seed_from_u64(opts.seed);

    let workers = (0..opts.workers)
        .map(|id| {
            // 能力子集：至少 1 种、至多全部类型，偏向覆盖 2 种以上
            let min = 2.min(opts.job_types);
            let count = rng.random_range(min..=opts.job_types);
            let mut types: Vec<u32> = (1..=opts.job_types).collect();
            types.shuffle(&mut rng);
            types.truncate(count as usize);
            types.sort_unstable();
            WorkerSpec {
                id,
                name: None,
                capabilities: types,
                working: true,
            }
        })
        .collect();

    let arrivals = exponential_arrival_times(opts.mean_gap_secs, opts.horizon_secs, &mut rng)?
        .into_iter()
        .map(|at_secs| ArrivalSpec {
            at_secs,
            job_type: rng.random_range(1..=opts.job_types),
            urgency: URGENCIES[rng.random_range(0..URGENCIES.len())],
        })
        .collect();

    Ok(ScenarioSpec {
        schema_version: 1,
        meta: Some(ScenarioMeta {
            source: Some("random_scenario".into()),
            description: None,
        }),
        workers,
        arrivals,
        seed: Some(opts.seed),
        bounds: None,
        urgency_table: None,
        fixed_service_secs: None,
    })
}
