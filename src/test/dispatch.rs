use crate::model::{JobOutcome, JobType, SimConfig, Urgency, WorkerId};
use crate::sim::{AuditEntry, FixedSampler, RunBounds, SimTime, SystemState};

fn state_with(bounds: RunBounds, rosters: &[&[u32]]) -> SystemState {
    let sampler = FixedSampler {
        duration: SimTime::from_secs(5),
    };
    let mut state =
        SystemState::new(SimConfig::default(), Box::new(sampler), bounds).expect("state");
    for caps in rosters {
        state.add_worker(None, caps.iter().map(|&t| JobType(t)).collect(), true);
    }
    state
}

#[test]
fn idle_worker_wins_over_busy_worker_and_cancels_the_broadcast() {
    // 工作者 0 能处理类型 1 和 2，工作者 1 只能处理类型 1
    let mut state = state_with(RunBounds::default(), &[&[1, 2], &[1]]);
    // t=0：类型 2 只有工作者 0 能处理，令其忙碌
    state
        .add_arrival(SimTime::ZERO, JobType(2), Urgency::Urgent)
        .expect("arrival");
    // t=1：类型 1 广播给两者；忙碌的 0 不变，空闲的 1 立即开始
    state
        .add_arrival(SimTime::from_secs(1), JobType(1), Urgency::Urgent)
        .expect("arrival");

    let report = state.run().expect("run");
    assert_eq!(report.summary.completed, 2);

    match report.jobs[1].outcome {
        JobOutcome::Completed {
            worker,
            started_secs,
            ..
        } => {
            assert_eq!(worker, WorkerId(1));
            assert_eq!(started_secs, 1.0);
        }
        ref other => panic!("expected completed outcome, got {other:?}"),
    }
    // 广播取消后工作者 0 只服务了自己的那一件
    assert_eq!(state.workers()[0].served.len(), 1);
    assert_eq!(state.workers()[1].served.len(), 1);
}

#[test]
fn capable_scan_commits_to_the_lowest_worker_id() {
    let mut state = state_with(RunBounds::default(), &[&[1], &[1], &[1]]);
    state
        .add_arrival(SimTime::ZERO, JobType(1), Urgency::Routine)
        .expect("arrival");

    let report = state.run().expect("run");
    match report.jobs[0].outcome {
        JobOutcome::Completed { worker, .. } => assert_eq!(worker, WorkerId(0)),
        ref other => panic!("expected completed outcome, got {other:?}"),
    }
}

#[test]
fn service_reference_set_is_a_singleton_while_in_service() {
    // 截断在完成事件之前，检视服务进行中的引用集合
    let bounds = RunBounds {
        max_events: Some(2),
        max_time: None,
    };
    let mut state = state_with(bounds, &[&[1, 2], &[1]]);
    state
        .add_arrival(SimTime::ZERO, JobType(2), Urgency::Urgent)
        .expect("arrival");
    state
        .add_arrival(SimTime::from_secs(1), JobType(1), Urgency::Urgent)
        .expect("arrival");

    let report = state.run().expect("run");
    assert!(report.summary.truncated);

    // 两件作业都已开始服务，各自的引用集合收缩为唯一服务者
    assert_eq!(state.jobs()[0].in_backlogs, vec![WorkerId(0)]);
    assert_eq!(state.jobs()[1].in_backlogs, vec![WorkerId(1)]);
    assert_eq!(state.workers()[0].backlog.len(), 1);
    assert_eq!(state.workers()[1].backlog.len(), 1);
}

#[test]
fn all_busy_broadcast_waits_without_redispatch() {
    // 两个都能处理类型 1 的工作者都在忙，第三件等待，先完成者拾取
    let mut state = state_with(RunBounds::default(), &[&[1], &[1]]);
    for t in [0, 0, 1] {
        state
            .add_arrival(SimTime::from_secs(t), JobType(1), Urgency::Urgent)
            .expect("arrival");
    }

    let report = state.run().expect("run");
    assert_eq!(report.summary.completed, 3);
    // 工作者 0 在 t=5 先完成并拾取等待中的第三件
    match report.jobs[2].outcome {
        JobOutcome::Completed {
            worker,
            started_secs,
            completed_secs,
            ..
        } => {
            assert_eq!(worker, WorkerId(0));
            assert_eq!(started_secs, 5.0);
            assert_eq!(completed_secs, 10.0);
        }
        ref other => panic!("expected completed outcome, got {other:?}"),
    }
    // 拾取时广播引用从另一个积压队列移除
    assert!(state.workers()[1].backlog.is_empty());
}

#[test]
fn unroutable_job_is_reported_and_does_not_stall_the_run() {
    let mut state = state_with(RunBounds::default(), &[&[1]]);
    state
        .add_arrival(SimTime::ZERO, JobType(9), Urgency::Urgent)
        .expect("arrival");
    state
        .add_arrival(SimTime::from_secs(1), JobType(1), Urgency::Urgent)
        .expect("arrival");

    let report = state.run().expect("run");
    assert_eq!(report.summary.unroutable, 1);
    assert_eq!(report.summary.completed, 1);
    assert!(matches!(report.jobs[0].outcome, JobOutcome::Unroutable));
    assert!(
        state
            .history()
            .iter()
            .any(|rec| matches!(rec.entry, AuditEntry::Unroutable { job } if job.0 == 0))
    );
}

#[test]
fn non_working_workers_are_never_capable() {
    let sampler = FixedSampler {
        duration: SimTime::from_secs(5),
    };
    let mut state = SystemState::new(
        SimConfig::default(),
        Box::new(sampler),
        RunBounds::default(),
    )
    .expect("state");
    state.add_worker(None, vec![JobType(1)], false);
    state
        .add_arrival(SimTime::ZERO, JobType(1), Urgency::Urgent)
        .expect("arrival");

    let report = state.run().expect("run");
    assert_eq!(report.summary.unroutable, 1);
    assert!(state.workers()[0].backlog.is_empty());
}

#[test]
fn audit_history_records_the_full_lifecycle() {
    let mut state = state_with(RunBounds::default(), &[&[1]]);
    state
        .add_arrival(SimTime::ZERO, JobType(1), Urgency::Urgent)
        .expect("arrival");
    state.run().expect("run");

    let kinds: Vec<&'static str> = state
        .history()
        .iter()
        .map(|rec| match rec.entry {
            AuditEntry::Arrival { .. } => "arrival",
            AuditEntry::ServiceStarted { .. } => "service_started",
            AuditEntry::Completion { .. } => "completion",
            AuditEntry::Unroutable { .. } => "unroutable",
        })
        .collect();
    assert_eq!(kinds, vec!["arrival", "service_started", "completion"]);
}
