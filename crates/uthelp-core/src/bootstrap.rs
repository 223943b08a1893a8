use std::fs;
use std::path::Path;
use std::path::PathBuf;

use tracing::info;

use super::error::BootstrapError;

pub const SAMPLE_SCRIPT_NAME: &str = "example-script.sh";
pub const SAMPLE_SCRIPT: &str = "#!/bin/bash\n# This is an example script\necho \"Hello, world!\"\n";

pub fn missing_root_message(root: &Path) -> String {
    let name = root
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| root.display().to_string());
    format!("The '{name}' directory does not exist in the current path.")
}

pub fn setup_instructions(root: &Path) -> String {
    let dir = root.display();
    [
        String::new(),
        format!("Please create a directory named '{dir}' and place your scripts inside it."),
        String::new(),
        "To create the directory and an example script, run the following commands:".to_string(),
        String::new(),
        format!("  mkdir {dir}"),
        format!(
            "  printf '#!/bin/bash\\n# This is an example script\\necho \"Hello, world!\"\\n' > {dir}/{SAMPLE_SCRIPT_NAME}"
        ),
        format!("  chmod +x {dir}/{SAMPLE_SCRIPT_NAME}"),
        String::new(),
        "Would you like to create the directory and example script automatically? (y/n)"
            .to_string(),
    ]
    .join("\n")
}

/// Only a literal `y` (any case, surrounding whitespace ignored) accepts.
pub fn is_affirmative(answer: &str) -> bool {
    answer.trim().eq_ignore_ascii_case("y")
}

/// Creates `root` with one executable example script and returns the
/// script path.
pub fn create_sample_root(root: &Path) -> Result<PathBuf, BootstrapError> {
    if root.exists() {
        return Err(BootstrapError::AlreadyExists(root.to_path_buf()));
    }
    fs::create_dir(root).map_err(|source| BootstrapError::CreateDir {
        path: root.to_path_buf(),
        source,
    })?;

    let script = root.join(SAMPLE_SCRIPT_NAME);
    fs::write(&script, SAMPLE_SCRIPT).map_err(|source| BootstrapError::WriteScript {
        path: script.clone(),
        source,
    })?;
    make_executable(&script)?;

    info!(root = %root.display(), "created sample scripts directory");
    Ok(script)
}

#[cfg(unix)]
fn make_executable(path: &Path) -> Result<(), BootstrapError> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, fs::Permissions::from_mode(0o755)).map_err(|source| {
        BootstrapError::Permissions {
            path: path.to_path_buf(),
            source,
        }
    })
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> Result<(), BootstrapError> {
    Ok(())
}
