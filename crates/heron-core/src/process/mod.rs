//! Subprocess supervision for the engine's external executables.
//!
//! One child process at a time: spawn with piped stdout/stderr, drain both
//! pipes line-by-line while the child runs (forwarding every line to tracing
//! and to the active platform log sink), then wait for the exit status. No
//! retry and no timeout -- a hung external binary hangs the benchmark step,
//! which is an accepted limitation of this driver.

use std::path::Path;
use std::process::Stdio;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;
use tracing::{info, warn};

use crate::collector::LogSink;
use crate::config::{ENGINE_ADDRESS_ENV_VAR, EngineSection};
use crate::error::DriverError;

/// Execute `program` with `args`, blocking the caller until the child exits.
///
/// The engine address is exported to the child via `HERON_ENGINE_ADDRESS`.
/// Every output line is forwarded to tracing, and appended to `sink` when
/// one is open. Returns the child's real exit code; a child killed by a
/// signal reports as exit code -1. A child that cannot be started at all
/// yields [`DriverError::Launch`].
///
/// On every exit path the pipes are drained and the child is reaped: if the
/// sink stops accepting output mid-run, the child is killed and waited on
/// before the sink error propagates, so no subprocess is left running
/// unsupervised.
pub async fn run_process(
    phase: &'static str,
    program: &Path,
    args: &[String],
    engine: &EngineSection,
    mut sink: Option<&mut LogSink>,
) -> Result<i32, DriverError> {
    let mut child = Command::new(program)
        .args(args)
        .env(ENGINE_ADDRESS_ENV_VAR, &engine.address)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|source| DriverError::Launch {
            program: program.to_path_buf(),
            source,
        })?;

    // Both pipes must be drained while waiting, or a chatty child fills the
    // pipe buffer and deadlocks.
    let stdout = child.stdout.take();
    let stderr = child.stderr.take();

    let mut out_lines = stdout.map(|s| BufReader::new(s).lines());
    let mut err_lines = stderr.map(|s| BufReader::new(s).lines());
    let mut out_done = out_lines.is_none();
    let mut err_done = err_lines.is_none();

    let mut sink_error: Option<DriverError> = None;

    while !(out_done && err_done) {
        let (stream, line) = tokio::select! {
            line = next_line(&mut out_lines), if !out_done => ("stdout", line),
            line = next_line(&mut err_lines), if !err_done => ("stderr", line),
        };
        match line {
            Some(line) => {
                info!(phase, stream, "{line}");
                if sink_error.is_none() {
                    if let Err(e) = forward_to_sink(&mut sink, &line) {
                        // The run is already lost; kill the child so it is
                        // not left running unsupervised, then keep draining
                        // until its pipes close.
                        warn!(phase, error = %e, "log sink write failed, killing child");
                        if let Err(kill_err) = child.kill().await {
                            warn!(phase, error = %kill_err, "failed to kill child");
                        }
                        sink_error = Some(e);
                    }
                }
            }
            None if stream == "stdout" => out_done = true,
            None => err_done = true,
        }
    }

    let status = child.wait().await.map_err(|source| DriverError::Launch {
        program: program.to_path_buf(),
        source,
    })?;

    if let Some(error) = sink_error {
        return Err(error);
    }

    // A signal-terminated child has no exit code on Unix.
    let code = status.code().unwrap_or(-1);
    info!(phase, code, "external process exited");
    Ok(code)
}

/// Read the next line from an optional line reader; `None` on EOF or error.
async fn next_line(
    lines: &mut Option<tokio::io::Lines<BufReader<impl tokio::io::AsyncRead + Unpin>>>,
) -> Option<String> {
    match lines {
        Some(lines) => match lines.next_line().await {
            Ok(line) => line,
            Err(e) => {
                warn!(error = %e, "error reading child output");
                None
            }
        },
        None => None,
    }
}

fn forward_to_sink(sink: &mut Option<&mut LogSink>, line: &str) -> Result<(), DriverError> {
    if let Some(sink) = sink.as_mut() {
        sink.append_line(line)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use heron_test_utils::fake_bin;

    fn engine() -> EngineSection {
        EngineSection {
            address: "localhost:9080".to_string(),
        }
    }

    #[tokio::test]
    async fn returns_zero_for_successful_child() {
        let tmp = tempfile::tempdir().unwrap();
        let bin = fake_bin(tmp.path(), "ok.sh", "echo done\n");
        let code = run_process("test", &bin, &[], &engine(), None).await.unwrap();
        assert_eq!(code, 0);
    }

    #[tokio::test]
    async fn returns_real_nonzero_exit_code() {
        let tmp = tempfile::tempdir().unwrap();
        let bin = fake_bin(tmp.path(), "fail.sh", "exit 3\n");
        let code = run_process("test", &bin, &[], &engine(), None).await.unwrap();
        assert_eq!(code, 3);
    }

    #[tokio::test]
    async fn nonexistent_executable_is_a_launch_error() {
        let result = run_process(
            "test",
            Path::new("/nonexistent/engine/loader"),
            &[],
            &engine(),
            None,
        )
        .await;
        match result {
            Err(DriverError::Launch { program, .. }) => {
                assert_eq!(program, PathBuf::from("/nonexistent/engine/loader"));
            }
            other => panic!("expected Launch error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn child_sees_engine_address_env() {
        let tmp = tempfile::tempdir().unwrap();
        let bin = fake_bin(
            tmp.path(),
            "env.sh",
            "test \"$HERON_ENGINE_ADDRESS\" = \"localhost:9080\"\n",
        );
        let code = run_process("test", &bin, &[], &engine(), None).await.unwrap();
        assert_eq!(code, 0, "child should see the engine address env var");
    }

    #[tokio::test]
    async fn output_lines_reach_the_sink() {
        let tmp = tempfile::tempdir().unwrap();
        let bin = fake_bin(
            tmp.path(),
            "chatty.sh",
            "echo out-line\necho err-line >&2\n",
        );
        let log_path = tmp.path().join("platform").join("runner.logs");
        let mut sink = LogSink::open(&log_path).unwrap();

        let code = run_process("test", &bin, &[], &engine(), Some(&mut sink))
            .await
            .unwrap();
        assert_eq!(code, 0);
        sink.close().unwrap();

        let contents = std::fs::read_to_string(&log_path).unwrap();
        assert!(contents.contains("out-line"), "sink missing stdout: {contents}");
        assert!(contents.contains("err-line"), "sink missing stderr: {contents}");
    }

    #[tokio::test]
    async fn arguments_are_passed_through_in_order() {
        let tmp = tempfile::tempdir().unwrap();
        let record = tmp.path().join("args.txt");
        let bin = fake_bin(
            tmp.path(),
            "record.sh",
            &format!("echo \"$@\" > {}\n", record.display()),
        );
        let args = vec![
            "--algorithm".to_string(),
            "pr".to_string(),
            "--max-iteration".to_string(),
            "10".to_string(),
        ];
        let code = run_process("test", &bin, &args, &engine(), None).await.unwrap();
        assert_eq!(code, 0);

        let recorded = std::fs::read_to_string(&record).unwrap();
        assert_eq!(recorded.trim(), "--algorithm pr --max-iteration 10");
    }

    #[tokio::test]
    async fn signal_killed_child_reports_exit_code_minus_one() {
        let tmp = tempfile::tempdir().unwrap();
        let bin = fake_bin(tmp.path(), "suicidal.sh", "kill -KILL $$\n");
        let code = run_process("test", &bin, &[], &engine(), None).await.unwrap();
        assert_eq!(code, -1, "signal termination should report as -1");
    }

    // Relies on /dev/full to make every sink write fail.
    #[cfg(target_os = "linux")]
    #[tokio::test]
    async fn sink_failure_kills_child_before_returning() {
        let tmp = tempfile::tempdir().unwrap();
        let done = tmp.path().join("done");
        let bin = fake_bin(
            tmp.path(),
            "slow.sh",
            &format!("echo one line\nsleep 1\ntouch {}\n", done.display()),
        );
        let mut sink = LogSink::open(Path::new("/dev/full")).unwrap();

        let result = run_process("test", &bin, &[], &engine(), Some(&mut sink)).await;
        match result {
            Err(DriverError::LogSink(_)) => {}
            other => panic!("expected LogSink error, got {other:?}"),
        }

        // The child was killed and reaped before the error propagated, so
        // its final step must never run, even after its sleep would have
        // elapsed.
        assert!(!done.exists(), "child ran past the sink failure");
        tokio::time::sleep(std::time::Duration::from_millis(1500)).await;
        assert!(!done.exists(), "child kept running unsupervised");
    }
}
