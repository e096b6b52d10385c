use std::io;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Failures raised while running the external search tool.
#[derive(thiserror::Error, Debug)]
pub enum TraceError {
    /// The search tool could not be located or started. Nothing else can
    /// work without it, so this aborts the whole run.
    #[error("{program} is not installed or not on PATH")]
    ToolUnavailable {
        program: String,
        #[source]
        source: Option<BoxError>,
    },

    /// A single invocation failed for any other reason.
    #[error("failed to run `{command}`: {source}")]
    InvocationFailed {
        command: String,
        #[source]
        source: io::Error,
    },
}

impl TraceError {
    pub fn tool_unavailable<S: Into<String>>(program: S, source: Option<BoxError>) -> Self {
        Self::ToolUnavailable {
            program: program.into(),
            source,
        }
    }

    pub fn is_tool_unavailable(&self) -> bool {
        matches!(self, Self::ToolUnavailable { .. })
    }
}

pub type Result<T> = std::result::Result<T, TraceError>;
