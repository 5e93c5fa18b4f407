//! Scoped child process handling for the scaffolding script.

use std::io::Read;
use std::path::Path;
use std::process::{Child, Command, Stdio};
use std::thread;

use crate::error::AgentError;

/// Captured result of a finished child process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutput {
    /// `None` when the process was terminated by a signal.
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Owns a running child; kills and reaps it if dropped before [`ChildGuard::finish`].
pub struct ChildGuard {
    command: String,
    child: Option<Child>,
}

impl ChildGuard {
    /// Spawn `program args…` in `cwd` with stdout and stderr captured.
    pub fn spawn(program: &Path, args: &[String], cwd: &Path) -> Result<Self, AgentError> {
        let command = program.display().to_string();
        let child = Command::new(program)
            .args(args)
            .current_dir(cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| AgentError::Spawn {
                command: command.clone(),
                source,
            })?;
        Ok(ChildGuard {
            command,
            child: Some(child),
        })
    }

    pub fn id(&self) -> Option<u32> {
        self.child.as_ref().map(Child::id)
    }

    /// Block until the child exits and collect its output.
    pub fn finish(mut self) -> Result<ProcessOutput, AgentError> {
        let command = self.command.clone();
        let failed = |source| AgentError::Spawn {
            command: command.clone(),
            source,
        };
        let Some(child) = self.child.as_mut() else {
            return Err(failed(std::io::Error::other("child already reaped")));
        };

        // stderr is drained on a helper thread so a full pipe cannot stall stdout.
        let stderr_reader = child.stderr.take().map(|mut pipe| {
            thread::spawn(move || {
                let mut buf = Vec::new();
                let _ = pipe.read_to_end(&mut buf);
                buf
            })
        });

        let mut stdout = Vec::new();
        if let Some(mut pipe) = child.stdout.take() {
            pipe.read_to_end(&mut stdout).map_err(failed)?;
        }

        let status = child.wait().map_err(failed)?;
        self.child = None;

        let stderr = stderr_reader
            .and_then(|handle| handle.join().ok())
            .unwrap_or_default();

        Ok(ProcessOutput {
            exit_code: status.code(),
            stdout: String::from_utf8_lossy(&stdout).into_owned(),
            stderr: String::from_utf8_lossy(&stderr).into_owned(),
        })
    }
}

impl Drop for ChildGuard {
    fn drop(&mut self) {
        if let Some(mut child) = self.child.take() {
            tracing::debug!("reaping abandoned child {}", child.id());
            let _ = child.kill();
            let _ = child.wait();
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn sh() -> PathBuf {
        PathBuf::from("/bin/sh")
    }

    #[test]
    fn finish_captures_both_streams() {
        let tmp = TempDir::new().unwrap();
        let args = vec!["-c".to_string(), "echo out; echo err >&2; exit 3".to_string()];
        let out = ChildGuard::spawn(&sh(), &args, tmp.path())
            .unwrap()
            .finish()
            .unwrap();
        assert_eq!(out.exit_code, Some(3));
        assert!(!out.success());
        assert_eq!(out.stdout, "out\n");
        assert_eq!(out.stderr, "err\n");
    }

    #[test]
    fn runs_in_requested_directory() {
        let tmp = TempDir::new().unwrap();
        let args = vec!["-c".to_string(), "pwd".to_string()];
        let out = ChildGuard::spawn(&sh(), &args, tmp.path())
            .unwrap()
            .finish()
            .unwrap();
        let reported = PathBuf::from(out.stdout.trim());
        assert_eq!(
            reported.canonicalize().unwrap(),
            tmp.path().canonicalize().unwrap()
        );
    }

    #[test]
    fn dropping_guard_kills_child() {
        let tmp = TempDir::new().unwrap();
        let args = vec!["-c".to_string(), "sleep 30".to_string()];
        let guard = ChildGuard::spawn(&sh(), &args, tmp.path()).unwrap();
        let pid = guard.id().unwrap();
        drop(guard);

        // kill -0 fails once the process is gone and reaped.
        let alive = Command::new("kill")
            .args(["-0", &pid.to_string()])
            .status()
            .map(|s| s.success())
            .unwrap_or(false);
        assert!(!alive, "child {pid} survived guard drop");
    }

    #[test]
    fn missing_program_is_spawn_error() {
        let tmp = TempDir::new().unwrap();
        let err = ChildGuard::spawn(&tmp.path().join("nope.sh"), &[], tmp.path())
            .err()
            .expect("spawn should fail");
        assert!(matches!(err, AgentError::Spawn { .. }));
    }
}
