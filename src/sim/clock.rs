//! 仿真时钟
//!
//! 维护当前仿真时间与待处理事件队列。时间单调推进：
//! 调度到过去时刻的事件以 `CausalityViolation` 拒绝。

use super::error::SimError;
use super::queued_event::{EventKind, QueuedEvent};
use super::time::SimTime;
use std::collections::BinaryHeap;
use tracing::{debug, trace};

/// 事件时钟：当前时间 + 按时间排序的事件队列。
#[derive(Default)]
pub struct Clock {
    now: SimTime,
    next_seq: u64,
    q: BinaryHeap<QueuedEvent>,
}

impl Clock {
    /// 获取当前仿真时间
    pub fn now(&self) -> SimTime {
        self.now
    }

    pub fn len(&self) -> usize {
        self.q.len()
    }

    pub fn is_empty(&self) -> bool {
        self.q.is_empty()
    }

    /// 下一个事件的时间（若有）。
    pub fn peek_time(&self) -> Option<SimTime> {
        self.q.peek().map(|ev| ev.at)
    }

    /// 调度事件在指定时间执行。`at` 必须不早于当前时间。
    #[tracing::instrument(skip(self), fields(schedule_at = ?at))]
    pub fn schedule(&mut self, at: SimTime, kind: EventKind) -> Result<(), SimError> {
        if at < self.now {
            return Err(SimError::CausalityViolation { at, now: self.now });
        }

        let seq = self.next_seq;
        trace!(now = ?self.now, seq, ?kind, "调度事件");

        self.next_seq = self.next_seq.wrapping_add(1);
        self.q.push(QueuedEvent { at, seq, kind });

        debug!(queue_size = self.q.len(), "事件已加入队列");
        Ok(())
    }

    /// 取出时间最小的事件并将时钟推进到该时刻。
    /// 队列为空时返回 `EmptyQueue`（正常终止信号）。
    pub fn pop_next(&mut self) -> Result<QueuedEvent, SimError> {
        let ev = self.q.pop().ok_or(SimError::EmptyQueue)?;
        self.now = ev.at;
        trace!(now = ?self.now, seq = ev.seq, kind = ?ev.kind, "取出事件");
        Ok(ev)
    }
}
