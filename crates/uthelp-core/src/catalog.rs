use std::fs;
use std::fs::File;
use std::io::BufRead;
use std::io::BufReader;
use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;
use tracing::warn;

use super::config::MenuConfig;
use super::error::CatalogError;
use super::state::EntryKind;
use super::state::MenuEntry;
use super::state::EXIT_DESCRIPTION;
use super::state::GO_BACK_DESCRIPTION;
use super::state::NO_DESCRIPTION;

pub const SCRIPT_EXTENSIONS: &[&str] = &["sh", "js"];
pub const FOLDER_README: &str = "readme.md";
pub const BREADCRUMB_ROOT: &str = "Utilities";

static CAMEL_BOUNDARY: OnceLock<Regex> = OnceLock::new();
static COMMENT_MARKER: OnceLock<Regex> = OnceLock::new();

fn camel_boundary() -> &'static Regex {
    CAMEL_BOUNDARY.get_or_init(|| Regex::new(r"([A-Z])").expect("valid camel-case pattern"))
}

fn comment_marker() -> &'static Regex {
    COMMENT_MARKER.get_or_init(|| Regex::new(r"^(//|#)").expect("valid comment pattern"))
}

pub fn is_script_name(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| SCRIPT_EXTENSIONS.contains(&ext))
}

/// `myCoolScript` -> `My Cool Script`.
pub fn camel_case_to_words(name: &str) -> String {
    let spaced = camel_boundary().replace_all(name, " $1");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `myCoolScript.sh` -> `My Cool Script (myCoolScript.sh)`.
pub fn display_label(file_name: &str, kind: EntryKind) -> String {
    let stem = match kind {
        EntryKind::Script => SCRIPT_EXTENSIONS
            .iter()
            .find_map(|ext| file_name.strip_suffix(&format!(".{ext}")))
            .unwrap_or(file_name),
        _ => file_name,
    };
    format!("{} ({file_name})", camel_case_to_words(stem))
        .trim()
        .to_string()
}

/// Lists `dir` as menu entries: Go Back first below the root, then
/// subdirectories and scripts by name, then Exit.
pub fn load_menu_items(config: &MenuConfig, dir: &Path) -> Result<Vec<MenuEntry>, CatalogError> {
    let read_dir = fs::read_dir(dir).map_err(|source| CatalogError::ReadDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut listed = Vec::new();
    for item in read_dir {
        let item = item.map_err(|source| CatalogError::ReadDir {
            path: dir.to_path_buf(),
            source,
        })?;
        let name = item.file_name().to_string_lossy().into_owned();
        let is_dir = item.file_type().is_ok_and(|ft| ft.is_dir());
        if is_dir {
            listed.push((name, EntryKind::Directory));
        } else if is_script_name(&name) {
            listed.push((name, EntryKind::Script));
        }
    }
    listed.sort_by(|a, b| a.0.cmp(&b.0));

    let mut entries = Vec::with_capacity(listed.len() + 2);
    if dir != config.root {
        entries.push(MenuEntry::go_back(0));
    }
    for (ordinal, (name, kind)) in listed.into_iter().enumerate() {
        let index = entries.len();
        let label = display_label(&name, kind);
        let path = dir.join(&name);
        entries.push(match kind {
            EntryKind::Directory => MenuEntry::directory(index, ordinal + 1, label, path),
            _ => MenuEntry::script(index, ordinal + 1, label, path),
        });
    }
    entries.push(MenuEntry::exit(entries.len()));

    debug!(dir = %dir.display(), count = entries.len(), "loaded menu entries");
    Ok(entries)
}

/// `Utilities` at the root, `Utilities > a > b` below it.
pub fn breadcrumb(root: &Path, current: &Path) -> String {
    let segments: Vec<String> = current
        .strip_prefix(root)
        .map(|rel| {
            rel.components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect()
        })
        .unwrap_or_default();
    if segments.is_empty() {
        BREADCRUMB_ROOT.to_string()
    } else {
        format!("{BREADCRUMB_ROOT} > {}", segments.join(" > "))
    }
}

pub fn describe(config: &MenuConfig, entry: &MenuEntry) -> String {
    match (entry.kind, entry.path.as_deref()) {
        (EntryKind::GoBack, _) => GO_BACK_DESCRIPTION.to_string(),
        (EntryKind::Exit, _) => EXIT_DESCRIPTION.to_string(),
        (EntryKind::Directory, Some(path)) => folder_description(path),
        (EntryKind::Script, Some(path)) => script_description(config, path),
        (_, None) => NO_DESCRIPTION.to_string(),
    }
}

fn strip_marker(line: &str) -> String {
    comment_marker().replace(line, "").trim().to_string()
}

/// The whole `readme.md` of a folder, one comment marker stripped per line.
pub fn folder_description(dir: &Path) -> String {
    let readme = dir.join(FOLDER_README);
    match fs::read_to_string(&readme) {
        Ok(text) => {
            let description = text.lines().map(strip_marker).collect::<Vec<_>>().join("\n");
            let description = description.trim_end();
            if description.is_empty() {
                NO_DESCRIPTION.to_string()
            } else {
                description.to_string()
            }
        }
        Err(err) => {
            if readme.exists() {
                warn!(path = %readme.display(), error = %err, "unreadable folder readme");
            }
            NO_DESCRIPTION.to_string()
        }
    }
}

/// Comment lines among the first few lines of a script. A shebang counts
/// as a `#` line like any other.
pub fn script_description(config: &MenuConfig, path: &Path) -> String {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(err) => {
            warn!(path = %path.display(), error = %err, "unreadable script");
            return NO_DESCRIPTION.to_string();
        }
    };

    let mut kept = Vec::new();
    for line in BufReader::new(file).lines().take(config.description_lines) {
        let Ok(line) = line else {
            return NO_DESCRIPTION.to_string();
        };
        if line.chars().count() <= config.min_comment_len {
            continue;
        }
        if line.starts_with("//") || line.starts_with('#') {
            kept.push(strip_marker(&line));
        }
    }

    if kept.is_empty() {
        NO_DESCRIPTION.to_string()
    } else {
        kept.join("\n")
    }
}
