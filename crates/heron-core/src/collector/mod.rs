//! Platform log capture and metric extraction.
//!
//! The sink opens at platform `startup` and closes at `finalize`; between
//! the two calls every subprocess output line is appended to one file. After
//! the run, [`collect_processing_time`] scans the captured logs for the
//! engine's processing-time marker.
//!
//! The marker match is deliberately a single fixed pattern. If the engine
//! ever changes its log format the metric is reported as missing rather
//! than guessed at -- there is no fallback parser.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::DriverError;

/// The fixed textual pattern the engine emits with its measured duration.
/// The trailing number is milliseconds; an optional `ms` suffix is tolerated.
const PROCESSING_TIME_MARKER: &str = "Processing time:";

/// File name of the captured runner log inside the platform log directory.
pub const RUNNER_LOG_FILE: &str = "runner.logs";

/// An append-only log file capturing subprocess output for one run.
#[derive(Debug)]
pub struct LogSink {
    path: PathBuf,
    file: File,
}

impl LogSink {
    /// Create parent directories and open `path` for append.
    pub fn open(path: &Path) -> Result<Self, DriverError> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir).map_err(DriverError::LogSink)?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(DriverError::LogSink)?;
        debug!(path = %path.display(), "platform log sink opened");
        Ok(Self {
            path: path.to_path_buf(),
            file,
        })
    }

    /// Append one line of subprocess output.
    pub fn append_line(&mut self, line: &str) -> Result<(), DriverError> {
        self.file
            .write_all(line.as_bytes())
            .and_then(|()| self.file.write_all(b"\n"))
            .map_err(DriverError::LogSink)
    }

    /// Flush and close the sink, consuming it.
    pub fn close(mut self) -> Result<(), DriverError> {
        self.file.flush().map_err(DriverError::LogSink)?;
        debug!(path = %self.path.display(), "platform log sink closed");
        Ok(())
    }

    /// The file this sink writes to.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Scan the captured platform logs under `log_dir` for the processing-time
/// marker and return the value in milliseconds.
///
/// Every regular file directly under `<log_dir>/platform` is scanned
/// line-by-line; the first matching line wins. A missing directory or an
/// absent marker is [`DriverError::MetricNotFound`] -- reported to the
/// harness rather than silently defaulted.
pub fn collect_processing_time(log_dir: &Path) -> Result<f64, DriverError> {
    let platform_dir = log_dir.join("platform");
    let not_found = || DriverError::MetricNotFound {
        log_dir: platform_dir.clone(),
    };

    let entries = std::fs::read_dir(&platform_dir).map_err(|_| not_found())?;
    for entry in entries.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Ok(contents) = std::fs::read_to_string(&path) else {
            continue;
        };
        for line in contents.lines() {
            if let Some(value) = parse_marker_line(line) {
                debug!(file = %path.display(), value, "found processing-time marker");
                return Ok(value);
            }
        }
    }

    Err(not_found())
}

/// Parse a single log line against the marker pattern.
fn parse_marker_line(line: &str) -> Option<f64> {
    let (_, rest) = line.split_once(PROCESSING_TIME_MARKER)?;
    let token = rest.trim().trim_end_matches("ms").trim();
    token.parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_marker_line() {
        assert_eq!(parse_marker_line("Processing time: 2602.48"), Some(2602.48));
    }

    #[test]
    fn parses_marker_with_ms_suffix_and_prefix_noise() {
        assert_eq!(
            parse_marker_line("[runner] 2024-01-01 Processing time: 150 ms"),
            Some(150.0)
        );
    }

    #[test]
    fn rejects_unrelated_lines() {
        assert_eq!(parse_marker_line("Loading time: 99"), None);
        assert_eq!(parse_marker_line("Processing time: n/a"), None);
    }

    #[test]
    fn sink_appends_and_closes() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("platform").join(RUNNER_LOG_FILE);

        let mut sink = LogSink::open(&path).unwrap();
        sink.append_line("first").unwrap();
        sink.append_line("second").unwrap();
        sink.close().unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "first\nsecond\n");
    }

    #[test]
    fn sink_open_twice_appends_rather_than_truncates() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("runner.logs");

        let mut sink = LogSink::open(&path).unwrap();
        sink.append_line("one").unwrap();
        sink.close().unwrap();

        let mut sink = LogSink::open(&path).unwrap();
        sink.append_line("two").unwrap();
        sink.close().unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "one\ntwo\n");
    }

    #[test]
    fn collects_metric_from_captured_log() {
        let tmp = tempfile::tempdir().unwrap();
        let platform_dir = tmp.path().join("platform");
        std::fs::create_dir_all(&platform_dir).unwrap();
        std::fs::write(
            platform_dir.join(RUNNER_LOG_FILE),
            "engine starting\nProcessing time: 421.5 ms\nengine done\n",
        )
        .unwrap();

        let value = collect_processing_time(tmp.path()).unwrap();
        assert_eq!(value, 421.5);
    }

    #[test]
    fn missing_marker_is_metric_not_found() {
        let tmp = tempfile::tempdir().unwrap();
        let platform_dir = tmp.path().join("platform");
        std::fs::create_dir_all(&platform_dir).unwrap();
        std::fs::write(platform_dir.join(RUNNER_LOG_FILE), "no metric here\n").unwrap();

        let err = collect_processing_time(tmp.path()).unwrap_err();
        assert!(matches!(err, DriverError::MetricNotFound { .. }), "got {err:?}");
    }

    #[test]
    fn missing_log_dir_is_metric_not_found() {
        let tmp = tempfile::tempdir().unwrap();
        let err = collect_processing_time(&tmp.path().join("never-created")).unwrap_err();
        assert!(matches!(err, DriverError::MetricNotFound { .. }), "got {err:?}");
    }
}
