use std::path::Path;

/// Command line for one script run. The child inherits the working
/// directory of the menu process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecRequest {
    pub program: String,
    pub args: Vec<String>,
    pub env: Vec<(String, String)>,
}

/// Maps a script file to the interpreter command that runs it.
pub trait ScriptAdapter {
    fn name(&self) -> &'static str;

    fn request(&self, script: &Path) -> ExecRequest;
}

pub struct ShellAdapter;

pub struct NodeAdapter;

fn req(script: &Path, program: &str) -> ExecRequest {
    ExecRequest {
        program: program.to_string(),
        args: vec![script.to_string_lossy().into_owned()],
        env: Vec::new(),
    }
}

impl ScriptAdapter for ShellAdapter {
    fn name(&self) -> &'static str {
        "shell"
    }

    fn request(&self, script: &Path) -> ExecRequest {
        req(script, "sh")
    }
}

impl ScriptAdapter for NodeAdapter {
    fn name(&self) -> &'static str {
        "node"
    }

    fn request(&self, script: &Path) -> ExecRequest {
        req(script, "node")
    }
}

pub fn adapter_for(script: &Path) -> Option<&'static dyn ScriptAdapter> {
    match script.extension()?.to_str()? {
        "sh" => Some(&ShellAdapter),
        "js" => Some(&NodeAdapter),
        _ => None,
    }
}
