use std::{io, thread::sleep, time::{Duration, Instant}};

use log::debug;

use crate::driver::IntervalTimer;
use crate::frontend::{AudioCue, Cue, InputSource, Renderer};
use crate::input::InputEvent;
use crate::session::{GameSession, TickOutcome};

const POLL_INTERVAL_MS: u64 = 5;

#[derive(Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Owns the session and wires it to the timer, the screen and the speaker.
pub struct Game<T, A> {
    session: GameSession,
    timer: IntervalTimer,
    term: T,
    audio: A,
    dirty: bool,
}

impl<T: Renderer + InputSource, A: AudioCue> Game<T, A> {
    pub fn new(session: GameSession, term: T, audio: A) -> Self {
        Game { session, timer: IntervalTimer::new(), term, audio, dirty: true }
    }

    /// Runs until the player quits.
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            if self.step(Instant::now())? == Flow::Quit {
                return Ok(());
            }

            sleep(Duration::from_millis(POLL_INTERVAL_MS));
        }
    }

    /// One pass of the loop: input, at most one tick, then a redraw if
    /// anything changed.
    pub fn step(&mut self, now: Instant) -> io::Result<Flow> {
        for event in self.term.poll_input()? {
            if self.handle_input(event, now) == Flow::Quit {
                return Ok(Flow::Quit);
            }
        }

        if self.timer.poll(now) {
            self.on_tick(now);
        }

        if self.dirty {
            self.term.render(&self.session)?;
            self.dirty = false;
        }

        Ok(Flow::Continue)
    }

    pub fn handle_input(&mut self, event: InputEvent, now: Instant) -> Flow {
        match event {
            InputEvent::Quit => return Flow::Quit,
            InputEvent::Start => {
                if self.session.start() {
                    self.timer.start(self.session.interval(), now);
                    self.dirty = true;
                }
            }
            InputEvent::PauseToggle => {
                if self.session.toggle_pause() {
                    if self.session.paused() {
                        self.timer.stop();
                    } else {
                        self.timer.start(self.session.interval(), now);
                    }
                    self.dirty = true;
                }
            }
            InputEvent::Steer(dir) => {
                // Two turns inside one tick could point the head back at the neck
                if self.session.snake().len() > 1 && dir == self.session.last_moved().opposite() {
                    return Flow::Continue;
                }

                if self.session.set_direction(dir) {
                    debug!("Heading {:?}", self.session.direction());
                    self.audio.play(Cue::DirectionChange);
                }
            }
        }

        Flow::Continue
    }

    fn on_tick(&mut self, now: Instant) {
        match self.session.tick() {
            TickOutcome::Idle => self.timer.stop(),
            TickOutcome::Moved => {}
            TickOutcome::Grew { interval } => {
                self.timer.set_period(interval, now);
                debug!("Ticking every {:?}", self.timer.period());
            }
            TickOutcome::GameOver { cleared, .. } => {
                if !cleared {
                    self.audio.play(Cue::Collision);
                }
                self.audio.play(Cue::GameOver);
                self.timer.stop();
            }
        }

        self.dirty = true;
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn into_term(self) -> T {
        self.term
    }
}
