//! 工作者实体
//!
//! 一个工作者（放射科医生）持有固定的能力集合和一条 FIFO 积压队列。
//! 队首作业即当前在服务（若已开始）或下一个候选。
//! 任一仿真时刻最多服务一个作业。

use crate::model::{JobId, JobType, WorkerId};
use crate::sim::SimTime;
use std::collections::VecDeque;

/// 工作者。busy/idle 区间在服务开始与完成时追加，
/// 二者在整个仿真时段上构成无缝划分。
#[derive(Debug, Clone)]
pub struct Worker {
    pub id: WorkerId,
    pub name: Option<String>,
    pub capabilities: Vec<JobType>,
    pub working: bool,
    /// FIFO 积压队列，持有作业 id 而非作业本体。
    pub backlog: VecDeque<JobId>,
    /// 已服务完成的作业。
    pub served: Vec<JobId>,
    /// 每个已服务作业的（开始，结束）时刻对。
    pub service_log: Vec<(SimTime, SimTime)>,
    pub busy_intervals: Vec<(SimTime, SimTime)>,
    pub idle_intervals: Vec<(SimTime, SimTime)>,
    /// 上一次空闲开始时刻（仿真开始或上一次完成）。
    pub free_since: SimTime,
    /// 当前服务的开始时刻（仅在服务进行中为 Some）。
    pub service_started_at: Option<SimTime>,
}

impl Worker {
    pub fn new(id: WorkerId, name: Option<String>, capabilities: Vec<JobType>, working: bool) -> Worker {
        Worker {
            id,
            name,
            capabilities,
            working,
            backlog: VecDeque::new(),
            served: Vec::new(),
            service_log: Vec::new(),
            busy_intervals: Vec::new(),
            idle_intervals: Vec::new(),
            free_since: SimTime::ZERO,
            service_started_at: None,
        }
    }

    pub fn can_serve(&self, job_type: JobType) -> bool {
        self.working && self.capabilities.contains(&job_type)
    }

    pub fn head(&self) -> Option<JobId> {
        self.backlog.front().copied()
    }

    /// 追加作业引用到队尾。
    pub fn enqueue(&mut self, job: JobId) {
        self.backlog.push_back(job);
    }

    /// 移除对指定作业的引用（广播取消）。队首在服务中的作业不会被移除，
    /// 因为取消只针对“其他”工作者的引用。
    pub fn remove(&mut self, job: JobId) {
        if let Some(pos) = self.backlog.iter().position(|&j| j == job) {
            self.backlog.remove(pos);
        }
    }

    pub fn in_service(&self) -> bool {
        self.service_started_at.is_some()
    }

    pub fn busy_secs(&self) -> f64 {
        self.busy_intervals
            .iter()
            .map(|(s, e)| e.saturating_sub(*s).as_secs_f64())
            .sum()
    }

    pub fn idle_secs(&self) -> f64 {
        self.idle_intervals
            .iter()
            .map(|(s, e)| e.saturating_sub(*s).as_secs_f64())
            .sum()
    }
}
