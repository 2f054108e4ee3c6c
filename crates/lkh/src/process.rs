use std::{
    path::{Path, PathBuf},
    process::{Command, Output},
};

use crate::{LkhError, LkhResult};

/// Handle on an LKH executable.
#[derive(Clone, Debug)]
pub struct LkhProcess {
    exe_path: PathBuf,
    current_dir: Option<PathBuf>,
}

impl LkhProcess {
    pub fn new(exe_path: impl Into<PathBuf>) -> Self {
        Self {
            exe_path: exe_path.into(),
            current_dir: None,
        }
    }

    pub fn with_current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.current_dir = Some(dir.into());
        self
    }

    pub fn exe_path(&self) -> &Path {
        &self.exe_path
    }

    /// True when the executable path points at an existing regular file.
    pub fn is_available(&self) -> bool {
        self.exe_path.is_file()
    }

    /// Runs LKH on a parameter file; a non-zero exit is reported as `ProcessFailed`.
    pub fn run(&self, par_path: &Path) -> LkhResult<Output> {
        let mut cmd = Command::new(&self.exe_path);
        cmd.arg(par_path);
        if let Some(dir) = &self.current_dir {
            cmd.current_dir(dir);
        }

        log::trace!(
            "lkh.process: exe={} par={}",
            self.exe_path.display(),
            par_path.display()
        );
        let output = cmd.output()?;

        if output.status.success() {
            Ok(output)
        } else {
            Err(LkhError::ProcessFailed {
                context: format!("LKH exited with {}", output.status),
                stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::LkhProcess;

    #[test]
    fn missing_executable_is_not_available() {
        let process = LkhProcess::new(std::env::temp_dir().join("definitely-not-lkh-binary"));
        assert!(!process.is_available());
    }

    #[test]
    fn running_missing_executable_is_an_io_error() {
        let process = LkhProcess::new(std::env::temp_dir().join("definitely-not-lkh-binary"));
        let err = process
            .run(std::path::Path::new("problem.par"))
            .expect_err("spawn should fail");
        assert!(matches!(err, crate::LkhError::Io(_)));
    }
}
