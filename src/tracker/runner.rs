use super::{grep_match::GrepMatch, invocation::Invocation, parser};
use crate::error::{Result, TraceError};
use std::{
    io,
    process::{Command, Stdio},
};
use tracing::{debug, warn};

/// Everything a finished search process left behind.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawOutput {
    pub stdout: String,
    pub stderr: String,
    /// `None` when the process was killed by a signal.
    pub status: Option<i32>,
}

/// Runs one invocation of the search tool to completion.
#[cfg_attr(test, mockall::automock)]
pub trait Runner {
    fn run(&self, invocation: &Invocation) -> Result<RawOutput>;
}

/// Spawns the search tool as a child process and waits for it.
#[derive(Default, Debug, Clone, Copy)]
pub struct ProcessRunner;

impl Runner for ProcessRunner {
    fn run(&self, invocation: &Invocation) -> Result<RawOutput> {
        let program = invocation.program();
        let path = which::which(program).map_err(|error| {
            debug!(program, %error, "search tool lookup failed");
            TraceError::tool_unavailable(program, Some(error.into()))
        })?;

        debug!(command = %invocation, "running search");

        let output = Command::new(path)
            .args(invocation.args())
            .stdin(Stdio::null())
            .output()
            .map_err(|source| match source.kind() {
                io::ErrorKind::NotFound => {
                    TraceError::tool_unavailable(program, Some(source.into()))
                }
                _ => TraceError::InvocationFailed {
                    command: invocation.to_string(),
                    source,
                },
            })?;

        let raw = RawOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            status: output.status.code(),
        };

        // 0 = matches, 1 = no matches, anything else is an error of the tool
        if !matches!(raw.status, Some(0) | Some(1)) {
            warn!(
                command = %invocation,
                status = ?raw.status,
                stderr = raw.stderr.trim(),
                "search exited with an error"
            );
        }

        Ok(raw)
    }
}

/// Outcome of a single invocation once its output has been parsed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InvocationResult {
    Completed(Vec<GrepMatch>),
    Failed(String),
}

/// Runs and parses one invocation. Only an unavailable tool is returned as
/// an error; every other failure is folded into [`InvocationResult::Failed`].
pub fn execute<R: Runner + ?Sized>(runner: &R, invocation: &Invocation) -> Result<InvocationResult> {
    match runner.run(invocation) {
        Ok(raw) => Ok(InvocationResult::Completed(parser::parse_json_stream(
            &raw.stdout,
            invocation.pattern(),
        ))),
        Err(error) if error.is_tool_unavailable() => Err(error),
        Err(error) => Ok(InvocationResult::Failed(error.to_string())),
    }
}
