use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

fn unique_temp_dir(prefix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time went backwards")
        .as_nanos();
    let dir = std::env::temp_dir().join(format!(
        "radsim-rs-{prefix}-{}-{nanos}",
        std::process::id()
    ));
    fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

fn write_file(dir: &PathBuf, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("write temp file");
    path
}

const FIFO_SCENARIO: &str = r#"
{
    "schema_version": 1,
    "workers": [
        { "id": 0, "capabilities": [1] }
    ],
    "arrivals": [
        { "at_secs": 0.0, "job_type": 1, "urgency": "urgent" },
        { "at_secs": 1.0, "job_type": 1, "urgency": "urgent" },
        { "at_secs": 2.0, "job_type": 1, "urgency": "urgent" }
    ],
    "fixed_service_secs": 5.0
}
"#;

#[test]
fn scenario_sim_prints_summary_and_writes_report() {
    let dir = unique_temp_dir("fifo");
    let scenario = write_file(&dir, "scenario.json", FIFO_SCENARIO);
    let report_path = dir.join("report.json");

    let output = Command::new(env!("CARGO_BIN_EXE_scenario_sim"))
        .arg("--scenario")
        .arg(&scenario)
        .arg("--report-json")
        .arg(&report_path)
        .output()
        .expect("run scenario_sim");
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let stdout = String::from_utf8_lossy(&output.stdout);
    let summary = stdout
        .lines()
        .find(|line| line.starts_with("run_summary "))
        .expect("summary line");
    assert!(summary.contains("completed=3"));
    assert!(summary.contains("unroutable=0"));
    assert!(summary.contains("truncated=false"));

    let report: Value =
        serde_json::from_str(&fs::read_to_string(&report_path).expect("read report"))
            .expect("parse report");
    assert_eq!(report["summary"]["final_time_secs"], 15.0);
    let jobs = report["jobs"].as_array().expect("jobs array");
    assert_eq!(jobs.len(), 3);
    assert_eq!(jobs[2]["started_secs"], 10.0);
    assert_eq!(jobs[2]["completed_secs"], 15.0);
    assert_eq!(jobs[2]["outcome"], "completed");

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn scenario_sim_reports_are_deterministic_for_a_fixed_seed() {
    let dir = unique_temp_dir("determinism");
    let scenario = write_file(
        &dir,
        "scenario.json",
        r#"
{
    "schema_version": 1,
    "seed": 42,
    "workers": [
        { "id": 0, "capabilities": [1, 2] },
        { "id": 1, "capabilities": [1] }
    ],
    "arrivals": [
        { "at_secs": 0.0, "job_type": 1, "urgency": "urgent" },
        { "at_secs": 5.0, "job_type": 2, "urgency": "routine" },
        { "at_secs": 9.0, "job_type": 1, "urgency": "priority" },
        { "at_secs": 14.0, "job_type": 1, "urgency": "routine" }
    ]
}
        "#,
    );

    let mut reports = Vec::new();
    for name in ["a.json", "b.json"] {
        let path = dir.join(name);
        let output = Command::new(env!("CARGO_BIN_EXE_scenario_sim"))
            .arg("--scenario")
            .arg(&scenario)
            .arg("--report-json")
            .arg(&path)
            .output()
            .expect("run scenario_sim");
        assert!(output.status.success());
        reports.push(fs::read_to_string(&path).expect("read report"));
    }
    assert_eq!(reports[0], reports[1]);

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn scenario_sim_surfaces_unroutable_jobs() {
    let dir = unique_temp_dir("unroutable");
    let scenario = write_file(
        &dir,
        "scenario.json",
        r#"
{
    "schema_version": 1,
    "workers": [
        { "id": 0, "capabilities": [1] }
    ],
    "arrivals": [
        { "at_secs": 0.0, "job_type": 9, "urgency": "urgent" },
        { "at_secs": 1.0, "job_type": 1, "urgency": "urgent" }
    ],
    "fixed_service_secs": 2.0
}
        "#,
    );

    let output = Command::new(env!("CARGO_BIN_EXE_scenario_sim"))
        .arg("--scenario")
        .arg(&scenario)
        .arg("--job-stats")
        .output()
        .expect("run scenario_sim");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let summary = stdout
        .lines()
        .find(|line| line.starts_with("run_summary "))
        .expect("summary line");
    assert!(summary.contains("completed=1"));
    assert!(summary.contains("unroutable=1"));
    assert!(
        stdout
            .lines()
            .any(|line| line.starts_with("job job=0") && line.contains("unroutable"))
    );

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn poisson_sim_generates_and_runs_a_scenario() {
    let dir = unique_temp_dir("poisson");
    let scenario_path = dir.join("generated.json");

    let output = Command::new(env!("CARGO_BIN_EXE_poisson_sim"))
        .arg("--workers")
        .arg("3")
        .arg("--mean-gap-secs")
        .arg("30")
        .arg("--horizon-secs")
        .arg("600")
        .arg("--seed")
        .arg("7")
        .arg("--scenario-json")
        .arg(&scenario_path)
        .output()
        .expect("run poisson_sim");
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.lines().any(|line| line.starts_with("run_summary ")));
    assert_eq!(
        stdout
            .lines()
            .filter(|line| line.starts_with("worker_util "))
            .count(),
        3
    );

    let spec: Value =
        serde_json::from_str(&fs::read_to_string(&scenario_path).expect("read scenario"))
            .expect("parse scenario");
    assert_eq!(spec["workers"].as_array().expect("workers").len(), 3);
    assert!(!spec["arrivals"].as_array().expect("arrivals").is_empty());

    fs::remove_dir_all(&dir).ok();
}
