use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    Quit,
    ToggleTime,        // t
    ToggleSpeed,       // s
    ToggleRpm,         // r
    ToggleRevolutions, // v
    CycleTheme,        // c
    ShowHelp,
    Back,
    None,
}

pub fn handle_key(key: KeyEvent) -> Action {
    match (key.code, key.modifiers) {
        (KeyCode::Char('q'), _)
        | (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Quit,

        // Panel visibility
        (KeyCode::Char('t'), _) => Action::ToggleTime,
        (KeyCode::Char('s'), _) => Action::ToggleSpeed,
        (KeyCode::Char('r'), _) => Action::ToggleRpm,
        (KeyCode::Char('v'), _) => Action::ToggleRevolutions,

        (KeyCode::Char('c'), _) => Action::CycleTheme,
        (KeyCode::Char('?'), _)
        | (KeyCode::F(1), _)   => Action::ShowHelp,
        (KeyCode::Esc, _)      => Action::Back,

        _ => Action::None,
    }
}
