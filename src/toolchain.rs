//! External C compiler
//!
//! [`Toolchain`] builds emitted C into an executable inside a work directory
//! and runs it, returning whatever the program wrote to stdout.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};
use thiserror::Error;

/// Compilers tried, in order, when none is configured
const CANDIDATES: &[&str] = &["cc", "gcc", "clang"];

pub const SOURCE_FILE: &str = "output.c";
pub const EXECUTABLE_FILE: &str = "output";

#[derive(Debug, Error)]
pub enum ToolchainError {
    #[error("no C compiler found (tried $CC, {})", CANDIDATES.join(", "))]
    CompilerNotFound,

    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },

    #[error("C compilation failed:\n{stderr}")]
    CompileFailed { stderr: String },

    #[error("program exited with {status}:\n{stderr}")]
    ExecutionFailed { status: ExitStatus, stderr: String },
}

fn io_error(context: impl Into<String>) -> impl FnOnce(io::Error) -> ToolchainError {
    let context = context.into();
    move |source| ToolchainError::Io { context, source }
}

#[derive(Debug, Clone)]
pub struct Toolchain {
    compiler: PathBuf,
    work_dir: PathBuf,
}

impl Toolchain {
    /// Use `compiler` if given, else `$CC`, else the first candidate on `PATH`.
    pub fn detect(
        compiler: Option<PathBuf>,
        work_dir: impl Into<PathBuf>,
    ) -> Result<Self, ToolchainError> {
        let compiler = match compiler.or_else(|| std::env::var_os("CC").map(PathBuf::from)) {
            Some(path) if !path.as_os_str().is_empty() => path,
            _ => CANDIDATES
                .iter()
                .find_map(|name| which::which(name).ok())
                .ok_or(ToolchainError::CompilerNotFound)?,
        };
        tracing::debug!(compiler = %compiler.display(), "using C compiler");

        Ok(Self {
            compiler,
            work_dir: work_dir.into(),
        })
    }

    pub fn compiler(&self) -> &Path {
        &self.compiler
    }

    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    /// Write `c_source` to the work directory, compile it, run the result
    /// and return its stdout.
    pub fn compile_and_run(&self, c_source: &str) -> Result<String, ToolchainError> {
        let executable = self.build(c_source)?;
        self.run(&executable)
    }

    /// Write and compile `c_source`, returning the executable's path.
    pub fn build(&self, c_source: &str) -> Result<PathBuf, ToolchainError> {
        fs::create_dir_all(&self.work_dir)
            .map_err(io_error(format!("creating {}", self.work_dir.display())))?;

        let source_path = self.work_dir.join(SOURCE_FILE);
        let executable = self.work_dir.join(EXECUTABLE_FILE);
        fs::write(&source_path, c_source)
            .map_err(io_error(format!("writing {}", source_path.display())))?;
        tracing::debug!(path = %source_path.display(), "wrote C source");

        let output = Command::new(&self.compiler)
            .arg(&source_path)
            .arg("-o")
            .arg(&executable)
            .output()
            .map_err(io_error(format!("running {}", self.compiler.display())))?;

        if !output.status.success() {
            return Err(ToolchainError::CompileFailed {
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }
        tracing::debug!(path = %executable.display(), "compiled executable");
        Ok(executable)
    }

    fn run(&self, executable: &Path) -> Result<String, ToolchainError> {
        let output = Command::new(executable)
            .output()
            .map_err(io_error(format!("running {}", executable.display())))?;

        if !output.status.success() {
            return Err(ToolchainError::ExecutionFailed {
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_compiler_wins() {
        let toolchain = Toolchain::detect(Some(PathBuf::from("/opt/cc/bin/mycc")), "build")
            .unwrap();
        assert_eq!(toolchain.compiler(), Path::new("/opt/cc/bin/mycc"));
        assert_eq!(toolchain.work_dir(), Path::new("build"));
    }

    #[test]
    fn test_missing_compiler_binary_is_io_error() {
        let dir = std::env::temp_dir().join(format!("cccp-toolchain-{}", std::process::id()));
        let toolchain =
            Toolchain::detect(Some(PathBuf::from("/nonexistent/cccp-no-such-cc")), &dir)
                .unwrap();
        let err = toolchain.build("int main() { return 0; }\n").unwrap_err();
        assert!(matches!(err, ToolchainError::Io { .. }), "{}", err);
        assert!(dir.join(SOURCE_FILE).exists());
        let _ = fs::remove_dir_all(&dir);
    }
}
