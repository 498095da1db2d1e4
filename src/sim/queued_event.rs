//! 队列事件
//!
//! 定义事件队列中的条目及其优先级比较。

use super::time::SimTime;
use crate::model::{JobId, WorkerId};
use serde::Serialize;
use std::cmp::Ordering;

/// 事件种类：作业到达或工作者完成当前服务。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EventKind {
    Arrival { job: JobId },
    Completion { worker: WorkerId },
}

/// 队列事件，包含执行时间、序列号和事件种类。
#[derive(Debug, Clone, Copy)]
pub struct QueuedEvent {
    pub at: SimTime,
    pub(crate) seq: u64,
    pub kind: EventKind,
}

// BinaryHeap 是 max-heap；我们需要最小时间优先，因此反向比较。
// 同一时刻按调度顺序（seq）处理。
impl Ord for QueuedEvent {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.at.cmp(&other.at) {
            Ordering::Equal => self.seq.cmp(&other.seq),
            ord => ord,
        }
        .reverse()
    }
}

impl PartialOrd for QueuedEvent {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for QueuedEvent {
    fn eq(&self, other: &Self) -> bool {
        self.at == other.at && self.seq == other.seq
    }
}

impl Eq for QueuedEvent {}
