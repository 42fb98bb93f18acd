use crossterm::event::KeyCode;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TuiAction {
    Quit,
    SwitchTabCases,
    SwitchTabCitizens,
    SwitchTabPenalCode,
    SwitchTabReport,
    SwitchTabLookup,
    NextTab,
    MoveSelectionUp,
    MoveSelectionDown,
    Activate,
    RemoveCharge,
    FinalizeReport,
    EditNotes,
    NewIncident,
    Search,
    ToggleWantedOnly,
    CycleClassFilter,
    ToggleHelp,
}

/// Keys while a text field has focus.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputAction {
    Insert(char),
    Backspace,
    NextField,
    PrevField,
    Cycle,
    Submit,
    Cancel,
}

pub fn key_to_action(key: KeyCode) -> Option<TuiAction> {
    match key {
        KeyCode::Char('q') | KeyCode::Esc => Some(TuiAction::Quit),
        KeyCode::Char('1') => Some(TuiAction::SwitchTabCases),
        KeyCode::Char('2') => Some(TuiAction::SwitchTabCitizens),
        KeyCode::Char('3') => Some(TuiAction::SwitchTabPenalCode),
        KeyCode::Char('4') => Some(TuiAction::SwitchTabReport),
        KeyCode::Char('5') => Some(TuiAction::SwitchTabLookup),
        KeyCode::Tab => Some(TuiAction::NextTab),
        KeyCode::Up | KeyCode::Char('k') => Some(TuiAction::MoveSelectionUp),
        KeyCode::Down | KeyCode::Char('j') => Some(TuiAction::MoveSelectionDown),
        KeyCode::Enter | KeyCode::Char(' ') => Some(TuiAction::Activate),
        KeyCode::Char('x') | KeyCode::Delete => Some(TuiAction::RemoveCharge),
        KeyCode::Char('f') | KeyCode::Char('F') => Some(TuiAction::FinalizeReport),
        KeyCode::Char('n') | KeyCode::Char('N') => Some(TuiAction::EditNotes),
        KeyCode::Char('i') | KeyCode::Char('I') => Some(TuiAction::NewIncident),
        KeyCode::Char('/') => Some(TuiAction::Search),
        KeyCode::Char('w') | KeyCode::Char('W') => Some(TuiAction::ToggleWantedOnly),
        KeyCode::Char('c') | KeyCode::Char('C') => Some(TuiAction::CycleClassFilter),
        KeyCode::Char('?') | KeyCode::Char('h') | KeyCode::Char('H') => Some(TuiAction::ToggleHelp),
        _ => None,
    }
}

pub fn key_to_input(key: KeyCode) -> Option<InputAction> {
    match key {
        KeyCode::Char(c) => Some(InputAction::Insert(c)),
        KeyCode::Backspace => Some(InputAction::Backspace),
        KeyCode::Tab | KeyCode::Down => Some(InputAction::NextField),
        KeyCode::BackTab | KeyCode::Up => Some(InputAction::PrevField),
        KeyCode::Left | KeyCode::Right => Some(InputAction::Cycle),
        KeyCode::Enter => Some(InputAction::Submit),
        KeyCode::Esc => Some(InputAction::Cancel),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_keys() {
        assert_eq!(key_to_action(KeyCode::Char('4')), Some(TuiAction::SwitchTabReport));
        assert_eq!(key_to_action(KeyCode::Esc), Some(TuiAction::Quit));
        assert_eq!(key_to_action(KeyCode::Char('z')), None);
    }

    #[test]
    fn test_input_keys_capture_letters() {
        // 'q' types a letter while editing instead of quitting.
        assert_eq!(key_to_input(KeyCode::Char('q')), Some(InputAction::Insert('q')));
        assert_eq!(key_to_input(KeyCode::Esc), Some(InputAction::Cancel));
    }
}
