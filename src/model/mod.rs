//! 领域模型模块
//!
//! 此模块包含仿真的领域实体：作业、工作者、配置表与输出表。

// 子模块声明
mod config;
mod id;
mod job;
mod report;
mod worker;

// 重新导出公共接口
pub use config::{SimConfig, UrgencyEntry};
pub use id::{JobId, WorkerId};
pub use job::{Job, JobType, Urgency};
pub use report::{
    DepthSample, JobOutcome, JobRow, RunReport, RunSummary, ServiceRow, WorkerUtilization,
};
pub use worker::Worker;
