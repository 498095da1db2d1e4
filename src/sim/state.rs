//! 系统状态
//!
//! `SystemState` 独占时钟、作业 arena 和工作者 arena，是仿真时间的
//! 唯一推进者。派发算法：到达时广播进所有有能力的工作者的积压队列，
//! 第一个因此从空变为一的工作者立即开始服务并取消其余引用；
//! 完成时队首出队，若还有积压则直接服务下一个。

use super::clock::Clock;
use super::error::SimError;
use super::queued_event::EventKind;
use super::sampler::ServiceSampler;
use super::time::SimTime;
use crate::model::{
    DepthSample, Job, JobId, JobOutcome, JobRow, JobType, RunReport, RunSummary, ServiceRow,
    SimConfig, Urgency, Worker, WorkerId, WorkerUtilization,
};
use serde::Serialize;
use tracing::{debug, info, warn};

/// 运行安全边界：最大事件数 / 最大仿真时间。超出即提前终止并截断报告。
#[derive(Debug, Clone, Copy, Default)]
pub struct RunBounds {
    pub max_events: Option<u64>,
    pub max_time: Option<SimTime>,
}

/// 审计记录：每个被处理的事件及其引发的状态迁移。
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(tag = "entry", rename_all = "snake_case")]
pub enum AuditEntry {
    Arrival { job: JobId },
    ServiceStarted { job: JobId, worker: WorkerId },
    Completion { job: JobId, worker: WorkerId },
    Unroutable { job: JobId },
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct AuditRecord {
    pub at_secs: f64,
    #[serde(flatten)]
    pub entry: AuditEntry,
}

/// 仿真系统状态。
pub struct SystemState {
    cfg: SimConfig,
    clock: Clock,
    jobs: Vec<Job>,
    workers: Vec<Worker>,
    sampler: Box<dyn ServiceSampler>,
    bounds: RunBounds,
    history: Vec<AuditRecord>,
    depth_samples: Vec<DepthSample>,
    events_processed: u64,
}

impl SystemState {
    pub fn new(
        cfg: SimConfig,
        sampler: Box<dyn ServiceSampler>,
        bounds: RunBounds,
    ) -> Result<SystemState, SimError> {
        cfg.validate()?;
        Ok(SystemState {
            cfg,
            clock: Clock::default(),
            jobs: Vec::new(),
            workers: Vec::new(),
            sampler,
            bounds,
            history: Vec::new(),
            depth_samples: Vec::new(),
            events_processed: 0,
        })
    }

    /// 添加工作者，id 按加入顺序分配。
    pub fn add_worker(
        &mut self,
        name: Option<String>,
        capabilities: Vec<JobType>,
        working: bool,
    ) -> WorkerId {
        let id = WorkerId(self.workers.len());
        self.workers.push(Worker::new(id, name, capabilities, working));
        id
    }

    /// 添加一次作业到达：创建作业并调度其到达事件。
    pub fn add_arrival(
        &mut self,
        at: SimTime,
        job_type: JobType,
        urgency: Urgency,
    ) -> Result<JobId, SimError> {
        let id = JobId(self.jobs.len());
        self.jobs.push(Job::new(id, at, urgency, job_type, &self.cfg));
        self.clock.schedule(at, EventKind::Arrival { job: id })?;
        Ok(id)
    }

    pub fn now(&self) -> SimTime {
        self.clock.now()
    }

    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    pub fn workers(&self) -> &[Worker] {
        &self.workers
    }

    pub fn history(&self) -> &[AuditRecord] {
        &self.history
    }

    /// 迭代处理事件直到队列为空或触及运行边界。
    #[tracing::instrument(skip(self))]
    pub fn run(&mut self) -> Result<RunReport, SimError> {
        info!(
            workers = self.workers.len(),
            jobs = self.jobs.len(),
            queue_size = self.clock.len(),
            "▶️  开始运行仿真"
        );

        let mut truncated = false;
        loop {
            if let Some(max) = self.bounds.max_events
                && self.events_processed >= max
            {
                warn!(max_events = max, "⏹️ 达到最大事件数，提前终止");
                truncated = true;
                break;
            }
            if let Some(max_t) = self.bounds.max_time
                && let Some(next) = self.clock.peek_time()
                && next > max_t
            {
                warn!(next = ?next, max_time = ?max_t, "⏹️ 超过最大仿真时间，提前终止");
                truncated = true;
                break;
            }

            let ev = match self.clock.pop_next() {
                Ok(ev) => ev,
                Err(SimError::EmptyQueue) => break,
                Err(e) => return Err(e),
            };
            self.events_processed = self.events_processed.saturating_add(1);

            // 队列深度在事件生效前采样
            self.depth_samples.push(DepthSample {
                time_secs: ev.at.as_secs_f64(),
                depths: self.workers.iter().map(|w| w.backlog.len()).collect(),
            });

            debug!(
                event_num = self.events_processed,
                now = ?self.clock.now(),
                kind = ?ev.kind,
                remaining_queue = self.clock.len(),
                "执行事件"
            );

            match ev.kind {
                EventKind::Arrival { job } => self.handle_arrival(job)?,
                EventKind::Completion { worker } => self.handle_completion(worker)?,
            }
        }

        let report = self.finalize(truncated);
        info!(
            total_events = self.events_processed,
            final_time = ?self.clock.now(),
            completed = report.summary.completed,
            unroutable = report.summary.unroutable,
            truncated,
            "✅ 仿真完成"
        );
        Ok(report)
    }

    /// 到达路由：广播进所有有能力的积压队列，再按 id 升序找第一个
    /// 因本次入队从空变为一的工作者立即开始服务。
    fn handle_arrival(&mut self, job: JobId) -> Result<(), SimError> {
        let now = self.clock.now();
        let job_type = self.jobs[job.0].job_type;
        self.history.push(AuditRecord {
            at_secs: now.as_secs_f64(),
            entry: AuditEntry::Arrival { job },
        });

        let capable: Vec<WorkerId> = self
            .workers
            .iter()
            .filter(|w| w.can_serve(job_type))
            .map(|w| w.id)
            .collect();

        if capable.is_empty() {
            warn!(job = ?job, job_type = job_type.0, "⚠️  没有可处理该作业类型的工作者");
            self.jobs[job.0].unroutable = true;
            self.history.push(AuditRecord {
                at_secs: now.as_secs_f64(),
                entry: AuditEntry::Unroutable { job },
            });
            return Ok(());
        }

        for &w in &capable {
            self.workers[w.0].enqueue(job);
            self.jobs[job.0].in_backlogs.push(w);
            self.refresh_backlog(w);
        }

        for &w in &capable {
            if self.workers[w.0].backlog.len() == 1 {
                self.begin_service(w)?;
                break;
            }
        }
        Ok(())
    }

    /// 完成处理：队首出队并记账；若积压非空则立即服务新队首，
    /// 空闲区间从上一次完成到下一次服务开始回溯计入。
    fn handle_completion(&mut self, worker: WorkerId) -> Result<(), SimError> {
        let now = self.clock.now();
        let Some(job) = self.workers[worker.0].head() else {
            return Err(SimError::CompletionWithoutService { worker });
        };
        if self.jobs[job.0].is_completed() {
            return Err(SimError::DuplicateCompletion { job });
        }
        let Some(started) = self.workers[worker.0].service_started_at.take() else {
            return Err(SimError::CompletionWithoutService { worker });
        };

        self.workers[worker.0].backlog.pop_front();
        {
            let w = &mut self.workers[worker.0];
            w.served.push(job);
            w.service_log.push((started, now));
            w.busy_intervals.push((started, now));
            w.free_since = now;
        }
        {
            let j = &mut self.jobs[job.0];
            j.completed_at = Some(now);
            j.in_backlogs.clear();
        }

        info!(job = ?job, worker = ?worker, at = ?now, "🏁 作业完成");
        self.history.push(AuditRecord {
            at_secs: now.as_secs_f64(),
            entry: AuditEntry::Completion { job, worker },
        });

        if !self.workers[worker.0].backlog.is_empty() {
            self.begin_service(worker)?;
        }
        Ok(())
    }

    /// 对工作者的队首作业开始服务：记录开始时刻、调度完成事件、
    /// 并取消其他工作者积压队列中对该作业的引用。
    fn begin_service(&mut self, worker: WorkerId) -> Result<(), SimError> {
        let now = self.clock.now();
        let job = self.workers[worker.0].head().expect("backlog head exists");
        let urgency = self.jobs[job.0].urgency;

        let duration = self.sampler.service_duration(urgency);
        self.clock
            .schedule(now.saturating_add(duration), EventKind::Completion { worker })?;

        {
            let j = &mut self.jobs[job.0];
            j.started_at = Some(now);
            j.served_by = Some(worker);
        }

        // 广播取消：其余积压队列中的引用全部移除
        let others: Vec<WorkerId> = self.jobs[job.0]
            .in_backlogs
            .iter()
            .copied()
            .filter(|&h| h != worker)
            .collect();
        for h in others {
            self.workers[h.0].remove(job);
        }
        self.jobs[job.0].in_backlogs = vec![worker];

        {
            let w = &mut self.workers[worker.0];
            if now > w.free_since {
                w.idle_intervals.push((w.free_since, now));
            }
            w.service_started_at = Some(now);
        }

        info!(
            job = ?job,
            worker = ?worker,
            at = ?now,
            duration = ?duration,
            "🩻 作业开始服务"
        );
        self.history.push(AuditRecord {
            at_secs: now.as_secs_f64(),
            entry: AuditEntry::ServiceStarted { job, worker },
        });
        Ok(())
    }

    fn refresh_backlog(&mut self, worker: WorkerId) {
        let now = self.clock.now();
        let ids: Vec<JobId> = self.workers[worker.0].backlog.iter().copied().collect();
        for id in ids {
            self.jobs[id.0].update_remaining(now);
        }
    }

    /// 收尾：补齐末尾的 busy/idle 区间并生成输出表。
    fn finalize(&mut self, truncated: bool) -> RunReport {
        let final_time = self.clock.now();
        for w in &mut self.workers {
            if let Some(started) = w.service_started_at {
                // 截断时服务仍在进行：忙碌到仿真末尾，保持时间划分完整
                if final_time > started {
                    w.busy_intervals.push((started, final_time));
                }
            } else if final_time > w.free_since {
                w.idle_intervals.push((w.free_since, final_time));
            }
        }

        let mut completed = 0;
        let mut in_service = 0;
        let mut waiting = 0;
        let mut unroutable = 0;
        let jobs = self
            .jobs
            .iter()
            .map(|j| {
                let outcome = match (j.completed_at, j.started_at) {
                    (Some(done), Some(start)) => {
                        completed += 1;
                        JobOutcome::Completed {
                            worker: j.served_by.expect("completed job has a server"),
                            started_secs: start.as_secs_f64(),
                            completed_secs: done.as_secs_f64(),
                            waited_secs: start.saturating_sub(j.created_at).as_secs_f64(),
                            total_secs: done.saturating_sub(j.created_at).as_secs_f64(),
                        }
                    }
                    (None, Some(start)) => {
                        in_service += 1;
                        JobOutcome::InService {
                            worker: j.served_by.expect("started job has a server"),
                            started_secs: start.as_secs_f64(),
                        }
                    }
                    (None, None) if j.unroutable => {
                        unroutable += 1;
                        JobOutcome::Unroutable
                    }
                    _ => {
                        waiting += 1;
                        JobOutcome::Waiting
                    }
                };
                JobRow {
                    job: j.id,
                    urgency: j.urgency,
                    job_type: j.job_type.0,
                    created_secs: j.created_at.as_secs_f64(),
                    remaining_secs: j.remaining_secs,
                    outcome,
                }
            })
            .collect();

        let services = self
            .workers
            .iter()
            .flat_map(|w| {
                w.served
                    .iter()
                    .zip(w.service_log.iter())
                    .map(|(&job, &(start, end))| ServiceRow {
                        worker: w.id,
                        job,
                        start_secs: start.as_secs_f64(),
                        end_secs: end.as_secs_f64(),
                    })
            })
            .collect();

        let utilization = self
            .workers
            .iter()
            .map(|w| {
                let busy = w.busy_secs();
                let idle = w.idle_secs();
                let total = busy + idle;
                WorkerUtilization {
                    worker: w.id,
                    jobs_served: w.served.len(),
                    busy_secs: busy,
                    idle_secs: idle,
                    occupancy: if total > 0.0 { busy / total } else { 0.0 },
                    busy_intervals: w
                        .busy_intervals
                        .iter()
                        .map(|(s, e)| (s.as_secs_f64(), e.as_secs_f64()))
                        .collect(),
                    idle_intervals: w
                        .idle_intervals
                        .iter()
                        .map(|(s, e)| (s.as_secs_f64(), e.as_secs_f64()))
                        .collect(),
                }
            })
            .collect();

        RunReport {
            summary: RunSummary {
                events_processed: self.events_processed,
                final_time_secs: final_time.as_secs_f64(),
                truncated,
                completed,
                in_service,
                waiting,
                unroutable,
            },
            jobs,
            services,
            utilization,
            depth_samples: std::mem::take(&mut self.depth_samples),
        }
    }
}
