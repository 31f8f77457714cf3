//! Long-lived shell processes standing in for editor terminals.

pub mod session;

pub use session::Session;

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdin, Command, ExitStatus, Stdio};

/// A shell reading command lines from a pipe.
pub struct Terminal {
    name: String,
    child: Child,
    stdin: Option<ChildStdin>,
}

impl Terminal {
    /// Start a shell in `cwd`. Hidden terminals discard their output.
    pub fn spawn(name: &str, cwd: &Path, show: bool) -> io::Result<Self> {
        let output = || if show { Stdio::inherit() } else { Stdio::null() };
        let mut child = Command::new(shell_program())
            .current_dir(cwd)
            .stdin(Stdio::piped())
            .stdout(output())
            .stderr(output())
            .spawn()?;
        let stdin = child.stdin.take();
        tracing::debug!("Spawned terminal '{}' in {}", name, cwd.display());
        Ok(Self { name: name.to_string(), child, stdin })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Send one command line, newline-terminated.
    pub fn send_text(&mut self, line: &str) -> io::Result<()> {
        let stdin = self
            .stdin
            .as_mut()
            .ok_or_else(|| io::Error::new(io::ErrorKind::BrokenPipe, "terminal closed"))?;
        tracing::debug!("[{}] {}", self.name, line);
        writeln!(stdin, "{line}")?;
        stdin.flush()
    }

    /// Close the input pipe and wait for the shell to finish.
    pub fn close(mut self) -> io::Result<ExitStatus> {
        drop(self.stdin.take());
        self.child.wait()
    }
}

fn shell_program() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var_os("COMSPEC").map(PathBuf::from).unwrap_or_else(|| PathBuf::from("cmd.exe"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var_os("SHELL")
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("/bin/sh"))
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn runs_sent_lines_in_cwd_and_reports_last_status() {
        let tmp = TempDir::new().expect("tmp");
        let mut term = Terminal::spawn("t", tmp.path(), false).expect("spawn");
        term.send_text("touch marker").expect("send");
        term.send_text("exit 3").expect("send");
        let status = term.close().expect("close");
        assert_eq!(status.code(), Some(3));
        assert!(tmp.path().join("marker").exists());
    }
}
