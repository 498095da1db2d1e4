//! 紧急程度配置表
//!
//! 每个紧急程度对应一个目标完成时限和一个平均服务时长。
//! 配置是显式的不可变值，在构造 `SystemState` 时传入，不存在全局状态。

use crate::model::Urgency;
use crate::sim::{SimError, SimTime};
use serde::{Deserialize, Serialize};

/// 单个紧急程度的时间参数（秒）。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UrgencyEntry {
    pub target_secs: f64,
    pub mean_service_secs: f64,
}

/// 紧急程度到时间参数的完整映射。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    pub urgent: UrgencyEntry,
    pub priority: UrgencyEntry,
    pub routine: UrgencyEntry,
}

impl SimConfig {
    pub fn entry(&self, urgency: Urgency) -> &UrgencyEntry {
        match urgency {
            Urgency::Urgent => &self.urgent,
            Urgency::Priority => &self.priority,
            Urgency::Routine => &self.routine,
        }
    }

    pub fn target(&self, urgency: Urgency) -> SimTime {
        SimTime::from_secs_f64(self.entry(urgency).target_secs)
    }

    pub fn mean_service(&self, urgency: Urgency) -> SimTime {
        SimTime::from_secs_f64(self.entry(urgency).mean_service_secs)
    }

    /// 由紧急/常规两端的平均服务时长推导完整配置：
    /// 中间级取 `0.3 * (routine - urgent)`。目标时限保持默认值。
    pub fn from_service_bounds(urgent_secs: f64, routine_secs: f64) -> SimConfig {
        let mut cfg = SimConfig::default();
        cfg.urgent.mean_service_secs = urgent_secs;
        cfg.priority.mean_service_secs = 0.3 * (routine_secs - urgent_secs);
        cfg.routine.mean_service_secs = routine_secs;
        cfg
    }

    pub fn validate(&self) -> Result<(), SimError> {
        for (name, entry) in [
            ("urgent", &self.urgent),
            ("priority", &self.priority),
            ("routine", &self.routine),
        ] {
            if !entry.target_secs.is_finite() || entry.target_secs <= 0.0 {
                return Err(SimError::InvalidConfig(format!(
                    "{name}: target_secs must be positive and finite, got {}",
                    entry.target_secs
                )));
            }
            if !entry.mean_service_secs.is_finite() || entry.mean_service_secs <= 0.0 {
                return Err(SimError::InvalidConfig(format!(
                    "{name}: mean_service_secs must be positive and finite, got {}",
                    entry.mean_service_secs
                )));
            }
        }
        Ok(())
    }
}

impl Default for SimConfig {
    /// 默认目标时限 2/3/5 分钟，平均服务时长按 2 与 5 分钟两端推导。
    fn default() -> Self {
        SimConfig {
            urgent: UrgencyEntry {
                target_secs: 120.0,
                mean_service_secs: 120.0,
            },
            priority: UrgencyEntry {
                target_secs: 180.0,
                mean_service_secs: 0.3 * (300.0 - 120.0),
            },
            routine: UrgencyEntry {
                target_secs: 300.0,
                mean_service_secs: 300.0,
            },
        }
    }
}
