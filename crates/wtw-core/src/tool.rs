//! The wtwitch subprocess boundary.
//!
//! Every call blocks until the process exits. Only the captured text is
//! handed back; the exit status is recorded for logging but not interpreted.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::{debug, info};

use crate::error::{CoreError, Result};
use crate::platform;

/// wtwitch verbs used by the front-end.
pub mod verb {
    pub const CHECK: &str = "c";
    pub const VODS: &str = "v";
    pub const WATCH: &str = "w";
    pub const SUBSCRIBE: &str = "s";
    pub const UNSUBSCRIBE: &str = "u";
    pub const QUALITY: &str = "q";
    pub const PLAYER: &str = "p";
    pub const TOGGLE_COLORS: &str = "l";
    pub const TOGGLE_OFFLINE: &str = "f";
}

/// Captured result of one tool invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolOutput {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: Option<i32>,
}

pub trait ToolRunner {
    fn run(&self, args: &[&str]) -> Result<ToolOutput>;
}

impl<T: ToolRunner + ?Sized> ToolRunner for &T {
    fn run(&self, args: &[&str]) -> Result<ToolOutput> {
        (**self).run(args)
    }
}

/// Runs the real `wtwitch` executable.
#[derive(Debug, Clone)]
pub struct Wtwitch {
    binary: PathBuf,
}

impl Wtwitch {
    /// Use an explicit binary if given, otherwise search `$WTWITCH_PATH` and
    /// `$PATH`. When nothing is found the bare name is kept so the launch
    /// error comes from the OS.
    pub fn locate(explicit: Option<PathBuf>) -> Self {
        let binary = explicit
            .or_else(platform::find_wtwitch_binary)
            .unwrap_or_else(platform::wtwitch_fallback_name);
        debug!("using wtwitch at {}", binary.display());
        Self { binary }
    }

    pub fn with_binary(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }
}

impl ToolRunner for Wtwitch {
    fn run(&self, args: &[&str]) -> Result<ToolOutput> {
        info!("running {} {}", self.binary.display(), args.join(" "));

        let output = Command::new(&self.binary)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|source| CoreError::Launch {
                binary: self.binary.clone(),
                source,
            })?;

        debug!("wtwitch exited with status: {:?}", output.status.code());

        Ok(ToolOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            exit_code: output.status.code(),
        })
    }
}
