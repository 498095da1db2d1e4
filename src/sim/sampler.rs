//! 服务时长抽样
//!
//! 服务时长的来源是引擎的外部协作者：生产路径用按紧急程度参数化的
//! 指数分布，测试路径用固定时长以保证确定性。

use super::error::SimError;
use super::time::SimTime;
use crate::model::{SimConfig, Urgency};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::{Distribution, Exp};

/// 服务时长抽样接口。
pub trait ServiceSampler {
    fn service_duration(&mut self, urgency: Urgency) -> SimTime;
}

/// 指数分布抽样：均值取自紧急程度配置表，种子固定则序列可复现。
pub struct ExpSampler {
    rng: StdRng,
    urgent: Exp<f64>,
    priority: Exp<f64>,
    routine: Exp<f64>,
}

impl ExpSampler {
    pub fn new(cfg: &SimConfig, seed: u64) -> Result<Self, SimError> {
        let dist = |mean: f64| -> Result<Exp<f64>, SimError> {
            if !mean.is_finite() || mean <= 0.0 {
                return Err(SimError::InvalidConfig(format!(
                    "mean service duration must be positive and finite, got {mean}"
                )));
            }
            Exp::new(1.0 / mean).map_err(|e| {
                SimError::InvalidConfig(format!("exponential rate from mean {mean}: {e}"))
            })
        };
        Ok(Self {
            rng: StdRng::seed_from_u64(seed),
            urgent: dist(cfg.urgent.mean_service_secs)?,
            priority: dist(cfg.priority.mean_service_secs)?,
            routine: dist(cfg.routine.mean_service_secs)?,
        })
    }
}

impl ServiceSampler for ExpSampler {
    fn service_duration(&mut self, urgency: Urgency) -> SimTime {
        let dist = match urgency {
            Urgency::Urgent => &self.urgent,
            Urgency::Priority => &self.priority,
            Urgency::Routine => &self.routine,
        };
        SimTime::from_secs_f64(dist.sample(&mut self.rng))
    }
}

/// 固定服务时长，所有紧急程度一视同仁。
#[derive(Debug, Clone, Copy)]
pub struct FixedSampler {
    pub duration: SimTime,
}

impl ServiceSampler for FixedSampler {
    fn service_duration(&mut self, _urgency: Urgency) -> SimTime {
        self.duration
    }
}
