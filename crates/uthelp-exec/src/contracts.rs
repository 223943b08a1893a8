use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptStatus {
    Succeeded,
    /// Exited cleanly but wrote to stderr.
    Diagnostics,
    Failed,
}

impl ScriptStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Succeeded => "succeeded",
            Self::Diagnostics => "diagnostics",
            Self::Failed => "failed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptInvocation {
    pub path: PathBuf,
    /// Menu row text, used for the processing banner and logs.
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptReport {
    pub path: PathBuf,
    pub status: ScriptStatus,
    pub stdout: String,
    pub stderr: String,
    /// User-facing summary for the failure paths.
    pub message: Option<String>,
    pub exit_code: Option<i32>,
}
