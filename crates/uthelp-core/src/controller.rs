use tracing::debug;
use tracing::warn;

use super::actions::MenuAction;
use super::actions::RuntimeAction;
use super::catalog::breadcrumb;
use super::catalog::describe;
use super::catalog::load_menu_items;
use super::config::MenuConfig;
use super::error::CatalogError;
use super::keys::action_for_key;
use super::keys::MenuKey;
use super::reducer::reduce;
use super::reducer::MenuEffect;
use super::state::NavigationState;
use super::state::ScriptOutcome;
use super::state::NO_DESCRIPTION;

/// Owns the navigation state and resolves directory loads against the
/// filesystem. Whatever it cannot resolve itself (frames, script runs, exit)
/// is handed back to the caller as effects.
#[derive(Debug)]
pub struct MenuController {
    state: NavigationState,
}

impl MenuController {
    pub fn open(config: MenuConfig) -> Result<Self, CatalogError> {
        let entries = load_menu_items(&config, &config.root)?;
        let mut state = NavigationState::new(config);
        let root = state.root().to_path_buf();
        reduce(
            &mut state,
            MenuAction::Runtime(RuntimeAction::EntriesLoaded {
                dir: root,
                entries,
                selected: 0,
            }),
        );
        Ok(Self { state })
    }

    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    pub fn handle_key(&mut self, key: MenuKey) -> Vec<MenuEffect> {
        match action_for_key(&self.state.mode, key) {
            Some(action) => self.dispatch(MenuAction::User(action)),
            None => Vec::new(),
        }
    }

    pub fn dispatch(&mut self, action: MenuAction) -> Vec<MenuEffect> {
        let stack = self.state.stack.clone();
        let effects = reduce(&mut self.state, action);

        let mut pending = Vec::with_capacity(effects.len());
        for effect in effects {
            match effect {
                MenuEffect::LoadDirectory { dir, selected } => {
                    match load_menu_items(&self.state.config, &dir) {
                        Ok(entries) => {
                            reduce(
                                &mut self.state,
                                MenuAction::Runtime(RuntimeAction::EntriesLoaded {
                                    dir,
                                    entries,
                                    selected,
                                }),
                            );
                        }
                        Err(err) => {
                            warn!(error = %err, "directory load failed");
                            self.state.stack = stack.clone();
                            reduce(
                                &mut self.state,
                                MenuAction::Runtime(RuntimeAction::SetStatus(Some(
                                    err.to_string(),
                                ))),
                            );
                        }
                    }
                    pending.push(MenuEffect::RequestFrame);
                }
                other => pending.push(other),
            }
        }
        pending.dedup();
        pending
    }

    pub fn finish_script(&mut self, outcome: ScriptOutcome) -> Vec<MenuEffect> {
        debug!(mode = self.state.mode.label(), "script finished");
        let mut effects = self.dispatch(MenuAction::Runtime(RuntimeAction::ScriptFinished(
            outcome,
        )));
        effects.push(MenuEffect::RequestFrame);
        effects
    }

    pub fn breadcrumb(&self) -> String {
        breadcrumb(self.state.root(), &self.state.current_dir)
    }

    pub fn description(&self) -> String {
        self.state
            .selected_entry()
            .map(|entry| describe(&self.state.config, entry))
            .unwrap_or_else(|| NO_DESCRIPTION.to_string())
    }
}
