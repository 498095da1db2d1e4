//! 场景仿真
//!
//! 读取 scenario.json，运行仿真并输出作业/工作者统计表。

use clap::Parser;
use radsim_rs::scenario::{self, ScenarioSpec};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "scenario-sim", about = "Run scenario.json on the radsim-rs engine")]
struct Args {
    /// Path to scenario.json
    #[arg(long)]
    scenario: PathBuf,

    /// Write the full report (job/worker tables) as JSON to this file
    #[arg(long)]
    report_json: Option<PathBuf>,

    /// Override the RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Override the max-event run bound
    #[arg(long)]
    max_events: Option<u64>,

    /// Override the max-simulated-time run bound (seconds)
    #[arg(long)]
    max_time_secs: Option<f64>,

    /// Print one line per completed job
    #[arg(long)]
    job_stats: bool,
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
    let raw = fs::read_to_string(&args.scenario).expect("read scenario.json");
    let mut spec: ScenarioSpec = serde_json::from_str(&raw).expect("parse scenario.json");

    if let Some(seed) = args.seed {
        spec.seed = Some(seed);
    }
    if args.max_events.is_some() || args.max_time_secs.is_some() {
        let mut bounds = spec.bounds.unwrap_or_default();
        if args.max_events.is_some() {
            bounds.max_events = args.max_events;
        }
        if args.max_time_secs.is_some() {
            bounds.max_time_secs = args.max_time_secs;
        }
        spec.bounds = Some(bounds);
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
    if args.job_stats {
        for row in &report.jobs {
            let outcome = serde_json::to_string(&row.outcome).expect("serialize outcome");
            println!(
                "job job={} urgency={:?} type={} created_secs={:.6} outcome={}",
                row.job.0, row.urgency, row.job_type, row.created_secs, outcome
            );
        }
    }

    if let Some(path) = args.report_json {
        let json = serde_json::to_string_pretty(&report).expect("serialize report");
        fs::write(&path, json).expect("write report json");
        eprintln!("wrote report to {}", path.display());
    }
}
