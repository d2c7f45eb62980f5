//! End-to-end pipeline tests driving real subprocesses through stub
//! compiler scripts.

#![cfg(unix)]

mod common;

use std::time::Duration;

use doxbuild_core::{BuildEngine, BuildOpts, TaskState};

fn opts(compiler_bin: String, timeout: Duration) -> BuildOpts {
    BuildOpts {
        compiler_bin,
        timeout,
        max_workers: 3,
        max_retry_rounds: 3,
        ..BuildOpts::default()
    }
}

/// Mixed-outcome run: alpha completes immediately, beta is missing its
/// entry page on the first attempt and recovers on retry, gamma hangs
/// until killed in every round.
#[tokio::test]
async fn mixed_outcomes_across_rounds() {
    let tmp = tempfile::tempdir().unwrap();
    common::make_unit(tmp.path(), "periph", "alpha");
    common::make_unit(tmp.path(), "periph", "beta");
    common::make_unit(tmp.path(), "system", "gamma");

    let stub = common::write_stub_compiler(
        tmp.path(),
        r#"desc="$1"
unit_dir=$(dirname "$desc")
out="$unit_dir/out/html"
case "$desc" in
  */alpha/*)
    mkdir -p "$out"
    : > "$out/index.html"
    : > "$out/files.html"
    ;;
  */beta/*)
    mkdir -p "$out"
    : > "$out/files.html"
    if [ -e "$unit_dir/.attempted" ]; then
      : > "$out/index.html"
    else
      : > "$unit_dir/.attempted"
    fi
    ;;
  */gamma/*)
    sleep 30
    ;;
esac
exit 0
"#,
    );

    let engine = BuildEngine::new(opts(
        stub.to_string_lossy().into_owned(),
        Duration::from_millis(500),
    ));
    let report = engine.run(tmp.path()).await.unwrap();

    assert_eq!(report.total, 3);
    assert_eq!(report.succeeded, 2);
    assert_eq!(report.failed, 1);
    assert!(!report.is_success());
    assert_eq!(report.failing_tasks(), vec!["system/gamma"]);

    // Gamma appears in the initial round and every retry round.
    for stats in &report.rounds {
        assert!(stats.attempted >= 1);
        let gamma_attempts = report
            .attempts
            .iter()
            .filter(|a| a.name == "system/gamma" && a.round == stats.round)
            .count();
        assert_eq!(gamma_attempts, 1);
    }
    assert_eq!(report.rounds.len(), 4);

    // Beta failed verification once, then verified in round 1.
    let beta: Vec<_> = report
        .attempts
        .iter()
        .filter(|a| a.name == "periph/beta")
        .collect();
    assert_eq!(beta.len(), 2);
    assert_eq!(
        beta[0].state,
        TaskState::VerificationFailed {
            missing: "index.html".to_string()
        }
    );
    assert_eq!(beta[1].state, TaskState::Verified);

    // Gamma's attempts are all timeouts.
    assert!(report
        .attempts
        .iter()
        .filter(|a| a.name == "system/gamma")
        .all(|a| a.state == TaskState::TimedOut));
}

/// Exit code 0 with an empty output tree must never count as success.
#[tokio::test]
async fn silent_compiler_is_a_verification_failure() {
    let tmp = tempfile::tempdir().unwrap();
    common::make_unit(tmp.path(), "periph", "mute");

    let stub = common::write_stub_compiler(tmp.path(), "exit 0\n");
    let engine = BuildEngine::new(opts(
        stub.to_string_lossy().into_owned(),
        Duration::from_secs(10),
    ));
    let report = engine.run(tmp.path()).await.unwrap();

    assert_eq!(report.total, 1);
    assert_eq!(report.failed, 1);
    assert!(report
        .attempts
        .iter()
        .all(|a| matches!(a.state, TaskState::VerificationFailed { .. })));
}

/// Stale output from a previous run is cleared before the compiler runs.
#[tokio::test]
async fn stale_output_is_cleaned_before_rebuild() {
    let tmp = tempfile::tempdir().unwrap();
    let unit = common::make_unit(tmp.path(), "periph", "clean");

    // Pre-populate the output dir with a stale marker the stub does not
    // recreate; a successful run must not contain it afterwards.
    let out = unit.join("out");
    std::fs::create_dir_all(out.join("html")).unwrap();
    std::fs::write(out.join("stale.marker"), "old").unwrap();

    let stub = common::write_stub_compiler(
        tmp.path(),
        r#"out="$(dirname "$1")/out/html"
mkdir -p "$out"
: > "$out/index.html"
: > "$out/files.html"
exit 0
"#,
    );
    let engine = BuildEngine::new(opts(
        stub.to_string_lossy().into_owned(),
        Duration::from_secs(10),
    ));
    let report = engine.run(tmp.path()).await.unwrap();

    assert!(report.is_success());
    assert!(!out.join("stale.marker").exists());
    assert!(out.join("html").join("index.html").is_file());
}

/// A compiler that emits an over-deep navigation outline gets it pruned
/// to the configured depth after verification.
#[tokio::test]
async fn generated_navigation_is_depth_limited() {
    let tmp = tempfile::tempdir().unwrap();
    let unit = common::make_unit(tmp.path(), "periph", "nav");

    let stub = common::write_stub_compiler(
        tmp.path(),
        r#"out="$(dirname "$1")/out/html"
mkdir -p "$out"
: > "$out/index.html"
: > "$out/files.html"
printf '<UL><UL><UL><UL><LI>deep</LI></UL></UL></UL></UL>' > "$out/index.hhc"
exit 0
"#,
    );

    let mut run_opts = opts(
        stub.to_string_lossy().into_owned(),
        Duration::from_secs(10),
    );
    run_opts.max_nav_depth = 2;
    let engine = BuildEngine::new(run_opts);
    let report = engine.run(tmp.path()).await.unwrap();

    assert!(report.is_success());
    let nav = std::fs::read_to_string(unit.join("out/html/index.hhc")).unwrap();
    assert_eq!(nav.matches("<UL>").count(), 2);
    assert_eq!(nav.matches("</UL>").count(), 2);
    assert!(!nav.contains("deep"));
}

/// An empty catalog is a warning, not an error; the report is empty and
/// successful.
#[tokio::test]
async fn empty_catalog_reports_success() {
    let tmp = tempfile::tempdir().unwrap();
    let stub = common::write_stub_compiler(tmp.path(), "exit 0\n");
    let engine = BuildEngine::new(opts(
        stub.to_string_lossy().into_owned(),
        Duration::from_secs(1),
    ));
    let report = engine.run(tmp.path()).await.unwrap();
    assert_eq!(report.total, 0);
    assert!(report.is_success());
}
