//! What the game loop needs from the platform: something to draw on, something
//! to read input from and something to make noise with.

use std::io;

use crate::input::InputEvent;
use crate::session::GameSession;

pub trait Renderer {
    /// Repaints from the session. Must not change it.
    fn render(&mut self, session: &GameSession) -> io::Result<()>;
}

pub trait InputSource {
    /// Everything that arrived since the last call, oldest first. Never blocks
    /// for long.
    fn poll_input(&mut self) -> io::Result<Vec<InputEvent>>;
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Cue {
    DirectionChange,
    Collision,
    GameOver,
}

/// Fire-and-forget sound effects.
pub trait AudioCue {
    fn play(&mut self, cue: Cue);
}
