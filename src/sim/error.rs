//! 错误类型
//!
//! 定义仿真引擎的错误分类。`EmptyQueue` 是正常的终止信号；
//! 其余变体均为致命的结构性错误。

use super::time::SimTime;
use crate::model::{JobId, WorkerId};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum SimError {
    /// 事件队列已空，仿真正常结束。
    #[error("event queue is empty")]
    EmptyQueue,

    /// 事件被调度到当前时刻之前，属于调用方缺陷。
    #[error("causality violation: scheduled at {at:?} but clock is at {now:?}")]
    CausalityViolation { at: SimTime, now: SimTime },

    /// 已完成的作业再次被完成。
    #[error("duplicate completion for job {job:?}")]
    DuplicateCompletion { job: JobId },

    /// 工作者收到完成事件但其积压队列为空。
    #[error("completion event for worker {worker:?} with empty backlog")]
    CompletionWithoutService { worker: WorkerId },

    /// 配置或场景输入非法。
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}
