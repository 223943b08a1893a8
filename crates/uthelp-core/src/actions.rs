use std::path::PathBuf;

use super::state::MenuEntry;
use super::state::ScriptOutcome;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuAction {
    User(UserAction),
    Runtime(RuntimeAction),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserAction {
    MoveUp,
    MoveDown,
    /// Right arrow: enter the selected directory, never run a script.
    Descend,
    /// Enter: open, run, go back or ask to exit depending on the entry.
    Activate,
    Ascend,
    RequestExit,
    ConfirmExit,
    CancelExit,
    AcknowledgeOutput,
    Interrupt,
}

impl UserAction {
    /// Actions that only apply while the menu itself has focus.
    pub fn is_navigation(self) -> bool {
        matches!(
            self,
            Self::MoveUp
                | Self::MoveDown
                | Self::Descend
                | Self::Activate
                | Self::Ascend
                | Self::RequestExit
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeAction {
    EntriesLoaded {
        dir: PathBuf,
        entries: Vec<MenuEntry>,
        selected: usize,
    },
    ScriptFinished(ScriptOutcome),
    SetStatus(Option<String>),
}
