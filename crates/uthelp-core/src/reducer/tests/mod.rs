use std::fs;
use std::path::Path;
use std::path::PathBuf;

use pretty_assertions::assert_eq;
use tempfile::TempDir;

pub(super) use super::reduce;
pub(super) use super::MenuEffect;
pub(super) use crate::actions::MenuAction;
pub(super) use crate::actions::RuntimeAction;
pub(super) use crate::actions::UserAction;
pub(super) use crate::config::MenuConfig;
pub(super) use crate::controller::MenuController;
pub(super) use crate::keys::MenuKey;
pub(super) use crate::state::EntryKind;
pub(super) use crate::state::MenuEntry;
pub(super) use crate::state::MenuMode;
pub(super) use crate::state::NavigationState;
pub(super) use crate::state::ScriptOutcome;


const ROOT: &str = "/menu";

/// Root-level state with `scripts` script rows followed by Exit.
fn state(scripts: usize) -> NavigationState {
    let mut state = NavigationState::new(MenuConfig::new(ROOT));
    let mut entries: Vec<MenuEntry> = (0..scripts)
        .map(|i| {
            MenuEntry::script(
                i,
                i + 1,
                format!("Script {i} (script{i}.sh)"),
                PathBuf::from(ROOT).join(format!("script{i}.sh")),
            )
        })
        .collect();
    entries.push(MenuEntry::exit(scripts));
    run_runtime(
        &mut state,
        RuntimeAction::EntriesLoaded {
            dir: PathBuf::from(ROOT),
            entries,
            selected: 0,
        },
    );
    state
}

fn run_user(state: &mut NavigationState, action: UserAction) -> Vec<MenuEffect> {
    reduce(state, MenuAction::User(action))
}

fn run_runtime(state: &mut NavigationState, action: RuntimeAction) {
    let effects = reduce(state, MenuAction::Runtime(action));
    assert!(effects.is_empty());
}

/// Scripts tree on disk:
///
/// ```text
/// root/
///   alpha.sh
///   backup/
///     readme.md
///     nightly/
///       full.sh
///     restore.sh
///   zeta.js
/// ```
fn tree() -> TempDir {
    let dir = tempfile::tempdir().expect("tempdir");
    let root = dir.path();
    fs::write(root.join("alpha.sh"), "# Alpha tool\necho alpha\n").unwrap();
    fs::create_dir(root.join("backup")).unwrap();
    fs::write(root.join("backup").join("readme.md"), "Backup tools\n").unwrap();
    fs::create_dir(root.join("backup").join("nightly")).unwrap();
    fs::write(root.join("backup").join("nightly").join("full.sh"), "echo full\n").unwrap();
    fs::write(root.join("backup").join("restore.sh"), "# Restore\necho r\n").unwrap();
    fs::write(root.join("zeta.js"), "// Zeta\nconsole.log('z')\n").unwrap();
    dir
}

fn controller(root: &Path) -> MenuController {
    MenuController::open(MenuConfig::new(root)).expect("open menu")
}

fn select_kind(controller: &mut MenuController, kind: EntryKind, label_prefix: &str) {
    let target = controller
        .state()
        .entries
        .iter()
        .position(|e| e.kind == kind && e.label.starts_with(label_prefix))
        .expect("entry present");
    while controller.state().selected != target {
        controller.handle_key(MenuKey::Down);
    }
}

fn assert_selection_in_range(state: &NavigationState) {
    assert!(!state.entries.is_empty());
    assert!(state.selected < state.entries.len());
    assert_eq!(state.entries[state.selected].index, state.selected);
}
