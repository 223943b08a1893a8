use std::path::PathBuf;

use tracing::debug;

use super::actions::MenuAction;
use super::actions::RuntimeAction;
use super::actions::UserAction;
use super::state::EntryKind;
use super::state::MenuMode;
use super::state::NavigationState;
use super::state::ScriptOutcome;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuEffect {
    RequestFrame,
    /// List `dir` and make it current with `selected` highlighted.
    LoadDirectory {
        dir: PathBuf,
        selected: usize,
    },
    RunScript {
        label: String,
        path: PathBuf,
    },
    Exit,
}

pub fn reduce(state: &mut NavigationState, action: MenuAction) -> Vec<MenuEffect> {
    match action {
        MenuAction::User(user) => reduce_user(state, user),
        MenuAction::Runtime(runtime) => {
            reduce_runtime(state, runtime);
            Vec::new()
        }
    }
}

fn reduce_user(state: &mut NavigationState, action: UserAction) -> Vec<MenuEffect> {
    if state.mode == MenuMode::Navigating {
        state.status = None;
    } else if action.is_navigation() {
        return Vec::new();
    }
    match action {
        UserAction::MoveUp => {
            let len = state.entries.len();
            if len == 0 {
                return Vec::new();
            }
            state.selected = (state.selected + len - 1) % len;
            vec![MenuEffect::RequestFrame]
        }
        UserAction::MoveDown => {
            let len = state.entries.len();
            if len == 0 {
                return Vec::new();
            }
            state.selected = (state.selected + 1) % len;
            vec![MenuEffect::RequestFrame]
        }
        UserAction::Descend => descend(state),
        UserAction::Activate => {
            let Some(entry) = state.selected_entry() else {
                return Vec::new();
            };
            match entry.kind {
                EntryKind::Directory => descend(state),
                EntryKind::Script => {
                    let Some(path) = entry.path.clone() else {
                        return Vec::new();
                    };
                    let label = entry.display_text();
                    debug!(path = %path.display(), "script selected");
                    state.mode = MenuMode::AwaitingScriptCompletion {
                        label: label.clone(),
                        path: path.clone(),
                    };
                    vec![MenuEffect::RequestFrame, MenuEffect::RunScript { label, path }]
                }
                EntryKind::GoBack => ascend(state),
                EntryKind::Exit => request_exit(state),
            }
        }
        UserAction::Ascend => ascend(state),
        UserAction::RequestExit => request_exit(state),
        UserAction::ConfirmExit => {
            if state.mode != MenuMode::AwaitingExitConfirmation {
                return Vec::new();
            }
            vec![MenuEffect::Exit]
        }
        UserAction::CancelExit => {
            if state.mode != MenuMode::AwaitingExitConfirmation {
                return Vec::new();
            }
            state.mode = MenuMode::Navigating;
            vec![MenuEffect::RequestFrame]
        }
        UserAction::AcknowledgeOutput => {
            if !matches!(state.mode, MenuMode::ShowingOutput { .. }) {
                return Vec::new();
            }
            state.mode = MenuMode::Navigating;
            vec![MenuEffect::RequestFrame]
        }
        UserAction::Interrupt => vec![MenuEffect::Exit],
    }
}

fn descend(state: &mut NavigationState) -> Vec<MenuEffect> {
    let Some(entry) = state.selected_entry() else {
        return Vec::new();
    };
    if entry.kind != EntryKind::Directory {
        return Vec::new();
    }
    let Some(dir) = entry.path.clone() else {
        return Vec::new();
    };
    let selected = state.selected;
    state.stack.push(selected);
    debug!(dir = %dir.display(), depth = state.stack.len(), "descend");
    // The child opens at the pushed index; set_entries clamps it.
    vec![MenuEffect::LoadDirectory { dir, selected }]
}

fn ascend(state: &mut NavigationState) -> Vec<MenuEffect> {
    if state.at_root() {
        return Vec::new();
    }
    let Some(parent) = state.current_dir.parent().map(PathBuf::from) else {
        return Vec::new();
    };
    let selected = state.stack.pop().unwrap_or(0);
    debug!(dir = %parent.display(), selected, "ascend");
    vec![MenuEffect::LoadDirectory {
        dir: parent,
        selected,
    }]
}

fn request_exit(state: &mut NavigationState) -> Vec<MenuEffect> {
    state.mode = MenuMode::AwaitingExitConfirmation;
    vec![MenuEffect::RequestFrame]
}

fn reduce_runtime(state: &mut NavigationState, action: RuntimeAction) {
    match action {
        RuntimeAction::EntriesLoaded {
            dir,
            entries,
            selected,
        } => {
            state.set_entries(dir, entries, selected);
        }
        RuntimeAction::ScriptFinished(outcome) => {
            let label = match &state.mode {
                MenuMode::AwaitingScriptCompletion { label, .. } => label.clone(),
                _ => return,
            };
            match outcome {
                ScriptOutcome::Completed { output } => {
                    state.mode = MenuMode::ShowingOutput { label, output };
                }
                ScriptOutcome::Failed { message } => {
                    state.mode = MenuMode::Navigating;
                    state.status = Some(message);
                }
            }
        }
        RuntimeAction::SetStatus(status) => {
            state.status = status;
        }
    }
}

#[cfg(test)]
mod tests;
