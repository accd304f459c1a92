use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::snake::Direction::{self, *};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InputEvent {
    Start,
    PauseToggle,
    Steer(Direction),
    Quit,
}

const KEY_BINDINGS: &[(KeyCode, InputEvent)] = &[
    (KeyCode::Up, InputEvent::Steer(Up)),
    (KeyCode::Down, InputEvent::Steer(Down)),
    (KeyCode::Left, InputEvent::Steer(Left)),
    (KeyCode::Right, InputEvent::Steer(Right)),
    (KeyCode::Char('w'), InputEvent::Steer(Up)),
    (KeyCode::Char('s'), InputEvent::Steer(Down)),
    (KeyCode::Char('a'), InputEvent::Steer(Left)),
    (KeyCode::Char('d'), InputEvent::Steer(Right)),
    (KeyCode::Char(' '), InputEvent::Start),
    (KeyCode::Char('p'), InputEvent::PauseToggle),
    (KeyCode::Esc, InputEvent::PauseToggle),
    (KeyCode::Char('q'), InputEvent::Quit),
];

pub fn map_key(ev: &KeyEvent) -> Option<InputEvent> {
    if ev.kind == KeyEventKind::Release {
        return None;
    }

    if is_ctrl_c(ev) {
        return Some(InputEvent::Quit);
    }

    // WASD/P work with caps lock or shift held
    let code = match ev.code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    };

    KEY_BINDINGS.iter().find(|(key, _)| *key == code).map(|(_, event)| *event)
}

fn is_ctrl_c(ev: &KeyEvent) -> bool {
    ev.code == KeyCode::Char('c') && ev.modifiers.contains(KeyModifiers::CONTROL)
}
