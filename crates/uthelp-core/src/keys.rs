use super::actions::UserAction;
use super::state::MenuMode;

/// Terminal-independent key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuKey {
    Up,
    Down,
    Left,
    Right,
    Enter,
    Backspace,
    Escape,
    Interrupt,
    Char(char),
    Other,
}

/// Interprets `key` according to the current mode. `None` means the key is
/// ignored in that mode.
pub fn action_for_key(mode: &MenuMode, key: MenuKey) -> Option<UserAction> {
    if key == MenuKey::Interrupt {
        return Some(UserAction::Interrupt);
    }
    match mode {
        MenuMode::Navigating => navigating_action(key),
        MenuMode::AwaitingScriptCompletion { .. } => None,
        MenuMode::ShowingOutput { .. } => Some(UserAction::AcknowledgeOutput),
        MenuMode::AwaitingExitConfirmation => match key {
            MenuKey::Char('y') | MenuKey::Char('Y') => Some(UserAction::ConfirmExit),
            _ => Some(UserAction::CancelExit),
        },
    }
}

fn navigating_action(key: MenuKey) -> Option<UserAction> {
    match key {
        MenuKey::Up => Some(UserAction::MoveUp),
        MenuKey::Down => Some(UserAction::MoveDown),
        MenuKey::Right => Some(UserAction::Descend),
        MenuKey::Enter => Some(UserAction::Activate),
        MenuKey::Left | MenuKey::Backspace => Some(UserAction::Ascend),
        MenuKey::Escape => Some(UserAction::RequestExit),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn navigation_keys_map_to_moves() {
        let mode = MenuMode::Navigating;
        assert_eq!(action_for_key(&mode, MenuKey::Up), Some(UserAction::MoveUp));
        assert_eq!(action_for_key(&mode, MenuKey::Left), Some(UserAction::Ascend));
        assert_eq!(action_for_key(&mode, MenuKey::Backspace), Some(UserAction::Ascend));
        assert_eq!(action_for_key(&mode, MenuKey::Right), Some(UserAction::Descend));
        assert_eq!(action_for_key(&mode, MenuKey::Char('q')), None);
    }

    #[test]
    fn running_script_swallows_keys_except_interrupt() {
        let mode = MenuMode::AwaitingScriptCompletion {
            label: "x".to_string(),
            path: PathBuf::from("/x.sh"),
        };
        assert_eq!(action_for_key(&mode, MenuKey::Enter), None);
        assert_eq!(action_for_key(&mode, MenuKey::Down), None);
        assert_eq!(
            action_for_key(&mode, MenuKey::Interrupt),
            Some(UserAction::Interrupt)
        );
    }

    #[test]
    fn only_y_confirms_exit() {
        let mode = MenuMode::AwaitingExitConfirmation;
        assert_eq!(
            action_for_key(&mode, MenuKey::Char('y')),
            Some(UserAction::ConfirmExit)
        );
        assert_eq!(
            action_for_key(&mode, MenuKey::Char('n')),
            Some(UserAction::CancelExit)
        );
        assert_eq!(
            action_for_key(&mode, MenuKey::Enter),
            Some(UserAction::CancelExit)
        );
    }

    #[test]
    fn any_key_acknowledges_output() {
        let mode = MenuMode::ShowingOutput {
            label: "x".to_string(),
            output: String::new(),
        };
        assert_eq!(
            action_for_key(&mode, MenuKey::Other),
            Some(UserAction::AcknowledgeOutput)
        );
    }
}
