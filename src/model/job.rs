//! 作业实体
//!
//! 一个作业（医学影像）带有由紧急程度推导出的目标时限和服务时长估计。
//! 广播派发阶段作业可同时出现在多个工作者的积压队列中；
//! 开始服务后引用集合收缩为恰好一个。

use crate::model::{JobId, SimConfig, WorkerId};
use crate::sim::SimTime;
use serde::{Deserialize, Serialize};

/// 紧急程度，固定三级。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    Urgent,
    Priority,
    Routine,
}

/// 作业类型（能力标签）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JobType(pub u32);

/// 作业。时间字段在生命周期推进时填充。
#[derive(Debug, Clone)]
pub struct Job {
    pub id: JobId,
    pub created_at: SimTime,
    pub urgency: Urgency,
    pub job_type: JobType,
    /// 目标完成时限（相对创建时刻）。
    pub target: SimTime,
    /// 估计平均服务时长。
    pub mean_service: SimTime,
    /// 距目标时限的剩余秒数；纯粹的记录值，不参与排序。
    pub remaining_secs: f64,
    pub started_at: Option<SimTime>,
    pub completed_at: Option<SimTime>,
    pub served_by: Option<WorkerId>,
    /// 当前引用本作业的工作者积压队列集合。
    pub in_backlogs: Vec<WorkerId>,
    /// 到达时没有任何工作者具备处理能力。
    pub unroutable: bool,
}

impl Job {
    pub fn new(
        id: JobId,
        created_at: SimTime,
        urgency: Urgency,
        job_type: JobType,
        cfg: &SimConfig,
    ) -> Job {
        let entry = cfg.entry(urgency);
        Job {
            id,
            created_at,
            urgency,
            job_type,
            target: cfg.target(urgency),
            mean_service: cfg.mean_service(urgency),
            remaining_secs: entry.target_secs,
            started_at: None,
            completed_at: None,
            served_by: None,
            in_backlogs: Vec::new(),
            unroutable: false,
        }
    }

    /// 刷新剩余时限：`target - (now - created_at)`。可为负。
    pub fn update_remaining(&mut self, now: SimTime) {
        let elapsed = now.saturating_sub(self.created_at).as_secs_f64();
        self.remaining_secs = self.target.as_secs_f64() - elapsed;
    }

    pub fn is_completed(&self) -> bool {
        self.completed_at.is_some()
    }
}
