//! 仿真核心模块
//!
//! 此模块包含事件驱动仿真的核心组件：仿真时间、事件时钟、
//! 服务时长抽样与系统状态。

// 子模块声明
mod clock;
mod error;
mod queued_event;
mod sampler;
mod state;
mod time;

// 重新导出公共接口
pub use clock::Clock;
pub use error::SimError;
pub use queued_event::{EventKind, QueuedEvent};
pub use sampler::{ExpSampler, FixedSampler, ServiceSampler};
pub use state::{AuditEntry, AuditRecord, RunBounds, SystemState};
pub use time::SimTime;
