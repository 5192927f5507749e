//! Shared test utilities for heron integration tests.
//!
//! The driver's collaborators are external executables, so tests fabricate
//! them as small `#!/bin/sh` scripts: one that succeeds, one that fails with
//! a chosen code, one that records its argument list to a file.

use std::path::{Path, PathBuf};

/// Write an executable shell script named `name` under `dir` with the given
/// body (the `#!/bin/sh` line is prepended) and return its path.
///
/// Panics on I/O failure; these helpers are for tests only.
pub fn fake_bin(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, format!("#!/bin/sh\n{body}")).expect("failed to write fake binary");

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
            .expect("failed to make fake binary executable");
    }

    path
}

/// A fake executable that exits with `code` and produces no output.
pub fn fake_exit_bin(dir: &Path, name: &str, code: i32) -> PathBuf {
    fake_bin(dir, name, &format!("exit {code}\n"))
}

/// A fake executable that appends its full argument list as one line to
/// `record_path`, then exits 0.
pub fn fake_recording_bin(dir: &Path, name: &str, record_path: &Path) -> PathBuf {
    fake_bin(
        dir,
        name,
        &format!("echo \"$@\" >> {}\n", record_path.display()),
    )
}

/// Read back the argument lines captured by a recording binary.
pub fn recorded_invocations(record_path: &Path) -> Vec<String> {
    match std::fs::read_to_string(record_path) {
        Ok(contents) => contents.lines().map(str::to_string).collect(),
        Err(_) => Vec::new(),
    }
}
