use std::path::Path;
use std::path::PathBuf;

use super::config::MenuConfig;

pub const GO_BACK_DESCRIPTION: &str = "Go back to the previous menu";
pub const EXIT_DESCRIPTION: &str = "Exit the program";
pub const NO_DESCRIPTION: &str = "No description available";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Directory,
    Script,
    GoBack,
    Exit,
}

impl EntryKind {
    pub fn icon(self) -> &'static str {
        match self {
            Self::Directory => "📦",
            Self::Script => "🔧",
            Self::GoBack => "🔙",
            Self::Exit => "🚪",
        }
    }
}

/// One selectable row of the menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuEntry {
    /// Position in the current menu, Go Back included.
    pub index: usize,
    /// 1-based number shown for listed entries, 0 for Go Back and Exit.
    pub ordinal: usize,
    pub kind: EntryKind,
    pub label: String,
    pub path: Option<PathBuf>,
}

impl MenuEntry {
    pub fn directory(index: usize, ordinal: usize, label: String, path: PathBuf) -> Self {
        Self {
            index,
            ordinal,
            kind: EntryKind::Directory,
            label,
            path: Some(path),
        }
    }

    pub fn script(index: usize, ordinal: usize, label: String, path: PathBuf) -> Self {
        Self {
            index,
            ordinal,
            kind: EntryKind::Script,
            label,
            path: Some(path),
        }
    }

    pub fn go_back(index: usize) -> Self {
        Self {
            index,
            ordinal: 0,
            kind: EntryKind::GoBack,
            label: "[ Go Back (Backspace) ]".to_string(),
            path: None,
        }
    }

    pub fn exit(index: usize) -> Self {
        Self {
            index,
            ordinal: 0,
            kind: EntryKind::Exit,
            label: "[ Exit Program (ESC) ]".to_string(),
            path: None,
        }
    }

    /// Row text without the selection marker, e.g. `🔧 2. Backup Db (backupDb.sh)`.
    pub fn display_text(&self) -> String {
        match self.kind {
            EntryKind::Directory | EntryKind::Script => {
                format!("{} {}. {}", self.kind.icon(), self.ordinal, self.label)
            }
            EntryKind::GoBack | EntryKind::Exit => format!("{} {}", self.kind.icon(), self.label),
        }
    }
}

/// Outcome of a script run, as reported back to the menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptOutcome {
    Completed { output: String },
    Failed { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuMode {
    Navigating,
    AwaitingScriptCompletion { label: String, path: PathBuf },
    ShowingOutput { label: String, output: String },
    AwaitingExitConfirmation,
}

impl MenuMode {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Navigating => "navigating",
            Self::AwaitingScriptCompletion { .. } => "running",
            Self::ShowingOutput { .. } => "output",
            Self::AwaitingExitConfirmation => "confirm-exit",
        }
    }
}

#[derive(Debug, Clone)]
pub struct NavigationState {
    pub config: MenuConfig,
    pub current_dir: PathBuf,
    pub entries: Vec<MenuEntry>,
    pub selected: usize,
    /// Selection index of each parent level, innermost last.
    pub stack: Vec<usize>,
    pub mode: MenuMode,
    /// Last execution error, cleared by the next key press.
    pub status: Option<String>,
}

impl NavigationState {
    pub fn new(config: MenuConfig) -> Self {
        let current_dir = config.root.clone();
        Self {
            config,
            current_dir,
            entries: Vec::new(),
            selected: 0,
            stack: Vec::new(),
            mode: MenuMode::Navigating,
            status: None,
        }
    }

    pub fn root(&self) -> &Path {
        &self.config.root
    }

    pub fn at_root(&self) -> bool {
        self.current_dir == self.config.root
    }

    pub fn selected_entry(&self) -> Option<&MenuEntry> {
        self.entries.get(self.selected)
    }

    /// Replace the listing and clamp `selected` into range.
    pub fn set_entries(&mut self, dir: PathBuf, entries: Vec<MenuEntry>, selected: usize) {
        self.current_dir = dir;
        self.entries = entries;
        self.selected = if self.entries.is_empty() {
            0
        } else {
            selected.min(self.entries.len() - 1)
        };
    }
}
