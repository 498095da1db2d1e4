//! 泊松场景仿真
//!
//! 由到达率与名册参数生成随机场景并直接运行。
//! 参数对应仪表盘输入表单：工作者数量、平均到达间隔、
//! 紧急/常规平均处理时长。

use clap::Parser;
use radsim_rs::model::SimConfig;
use radsim_rs::scenario::{self, GenOpts};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "poisson-sim", about = "随机场景仿真：泊松到达流 + 随机能力名册")]
struct Args {
    /// 工作者数量
    #[arg(long, default_value_t = 3)]
    workers: usize,
    /// 平均到达间隔（秒）
    #[arg(long, default_value_t = 60.0)]
    mean_gap_secs: f64,
    /// 到达生成的时间范围（秒）
    #[arg(long, default_value_t = 3_600.0)]
    horizon_secs: f64,
    /// 紧急作业的平均处理时长（秒）
    #[arg(long, default_value_t = 120.0)]
    urgent_secs: f64,
    /// 常规作业的平均处理时长（秒）
    #[arg(long, default_value_t = 300.0)]
    routine_secs: f64,
    /// 作业类型数量
    #[arg(long, default_value_t = 5)]
    job_types: u32,
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// 把生成的场景写入该文件
    #[arg(long)]
    scenario_json: Option<PathBuf>,
    /// 把完整报告写入该文件
    #[arg(long)]
    report_json: Option<PathBuf>,
}

fn main() {
    // 初始化 tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .init();

    let args = Args::parse();

    let opts = GenOpts {
        workers: args.workers,
        mean_gap_secs: args.mean_gap_secs,
        horizon_secs: args.horizon_secs,
        job_types: args.job_types,
        seed: args.seed,
    };
    let mut spec = scenario::random_scenario(&opts).expect("generate scenario");
    spec.urgency_table = Some(SimConfig::from_service_bounds(
        args.urgent_secs,
        args.routine_secs,
    ));

    if let Some(path) = &args.scenario_json {
        let json = serde_json::to_string_pretty(&spec).expect("serialize scenario");
        fs::write(path, json).expect("write scenario json");
        eprintln!("wrote scenario to {}", path.display());
    }

    let mut state = scenario::build_system(&spec).expect("build system state");
    let report = state.run().expect("run simulation");

    let s = &report.summary;
    println!(
        "run_summary events={} final_time_secs={:.6} completed={} in_service={} waiting={} unroutable={} truncated={}",
        s.events_processed,
        s.final_time_secs,
        s.completed,
        s.in_service,
        s.waiting,
        s.unroutable,
        s.truncated
    );
    for u in &report.utilization {
        println!(
            "worker_util worker={} jobs_served={} busy_secs={:.6} idle_secs={:.6} occupancy={:.4}",
            u.worker.0, u.jobs_served, u.busy_secs, u.idle_secs, u.occupancy
        );
    }

    if let Some(path) = args.report_json {
        let json = serde_json::to_string_pretty(&report).expect("serialize report");
        fs::write(&path, json).expect("write report json");
        eprintln!("wrote report to {}", path.display());
    }
}
