use std::process::Command;
use std::process::Output;
use std::process::Stdio;

use tracing::info;
use tracing::warn;

use crate::adapters::adapter_for;
use crate::adapters::ExecRequest;
use crate::contracts::ScriptInvocation;
use crate::contracts::ScriptReport;
use crate::contracts::ScriptStatus;

pub trait ScriptExecutor {
    fn execute(&self, invocation: &ScriptInvocation) -> ScriptReport;
}

/// Runs the script as a child process and waits for it. Stdout and stderr
/// are captured separately; stdin is closed so the child never competes
/// with the menu for key presses.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessScriptExecutor;

impl ScriptExecutor for ProcessScriptExecutor {
    fn execute(&self, invocation: &ScriptInvocation) -> ScriptReport {
        let Some(adapter) = adapter_for(&invocation.path) else {
            return failed(
                invocation,
                format!("Error: no interpreter for {}", invocation.path.display()),
            );
        };
        let request = adapter.request(&invocation.path);
        info!(
            script = %invocation.path.display(),
            entry = %invocation.label,
            adapter = adapter.name(),
            "running script"
        );

        match run(&request) {
            Ok(output) => report_from_output(invocation, &request, output),
            Err(err) => {
                warn!(program = %request.program, error = %err, "spawn failed");
                failed(
                    invocation,
                    format!("Error: failed to start {}: {err}", request.program),
                )
            }
        }
    }
}

fn run(request: &ExecRequest) -> std::io::Result<Output> {
    Command::new(&request.program)
        .args(&request.args)
        .envs(request.env.iter().map(|(k, v)| (k, v)))
        .stdin(Stdio::null())
        .output()
}

fn report_from_output(
    invocation: &ScriptInvocation,
    request: &ExecRequest,
    output: Output,
) -> ScriptReport {
    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
    let exit_code = output.status.code();

    let (status, message) = if !output.status.success() {
        let mut message = format!(
            "Error: Command failed: {} {} ({})",
            request.program,
            request.args.join(" "),
            output.status
        );
        if !stderr.trim().is_empty() {
            message.push('\n');
            message.push_str(stderr.trim_end());
        }
        (ScriptStatus::Failed, Some(message))
    } else if !stderr.is_empty() {
        (
            ScriptStatus::Diagnostics,
            Some(format!("Stderr: {}", stderr.trim_end())),
        )
    } else {
        (ScriptStatus::Succeeded, None)
    };

    info!(
        script = %invocation.path.display(),
        status = status.label(),
        exit_code = ?exit_code,
        "script finished"
    );
    ScriptReport {
        path: invocation.path.clone(),
        status,
        stdout,
        stderr,
        message,
        exit_code,
    }
}

fn failed(invocation: &ScriptInvocation, message: String) -> ScriptReport {
    ScriptReport {
        path: invocation.path.clone(),
        status: ScriptStatus::Failed,
        stdout: String::new(),
        stderr: String::new(),
        message: Some(message),
        exit_code: None,
    }
}
