use std::cmp::max;
use std::time::Duration;

use log::{debug, info};

use crate::Position;
use crate::config::{Config, MIN_GRID_SIZE};
use crate::food::FoodSpawner;
use crate::snake::{Snake, Direction::{self, *}};

const START_DIRECTION: Direction = Right;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    NotStarted,
    Running,
    Paused,
}

#[derive(Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// The session isn't running; nothing moved.
    Idle,
    Moved,
    /// Food was eaten. The driver must switch to the new period.
    Grew { interval: Duration },
    /// The run ended and the session is back to NotStarted. `cleared` means
    /// the snake filled the grid instead of crashing.
    GameOver { final_score: u32, cleared: bool },
}

#[derive(Copy, Clone, Debug)]
enum Collision {
    Wall,
    Body,
}

/// Next tick period after eating. Faster while slow, finer near the floor.
pub fn next_interval(ms: u64) -> u64 {
    if ms > 150 {
        ms - 5
    } else if ms > 100 {
        ms - 3
    } else if ms > 50 {
        ms - 2
    } else if ms > 25 {
        ms - 1
    } else {
        ms
    }
}

pub struct GameSession {
    grid_size: i16,
    initial_interval_ms: u64,
    snake: Snake,
    food: Position,
    interval_ms: u64,
    phase: Phase,
    high_score: u32,
    spawner: FoodSpawner,
}

impl GameSession {
    /// Grids smaller than `MIN_GRID_SIZE` are widened to it.
    pub fn new(config: &Config) -> Self {
        let grid_size = max(config.grid_size, MIN_GRID_SIZE);

        let mut session = GameSession {
            grid_size,
            initial_interval_ms: config.initial_interval_ms,
            snake: Snake::new(center(grid_size), START_DIRECTION),
            food: (1, 1),
            interval_ms: config.initial_interval_ms,
            phase: Phase::NotStarted,
            high_score: 0,
            spawner: FoodSpawner::new(config.seed),
        };
        session.food = session.fresh_food();
        session
    }

    pub fn tick(&mut self) -> TickOutcome {
        if self.phase != Phase::Running {
            return TickOutcome::Idle;
        }

        let new_head = self.snake.advance();

        let outcome = if new_head == self.food {
            match self.spawner.place(self.grid_size, &self.snake) {
                Some(food) => self.food = food,
                None => return self.end_run(true),
            }
            self.increase_speed();
            TickOutcome::Grew { interval: self.interval() }
        } else {
            self.snake.drop_tail();
            TickOutcome::Moved
        };

        if self.check_collision() {
            return self.end_run(false);
        }

        outcome
    }

    /// Wall or self collision for the current head.
    pub fn check_collision(&self) -> bool {
        self.collision().is_some()
    }

    fn collision(&self) -> Option<Collision> {
        let (x, y) = self.snake.head();
        let n = self.grid_size;

        if x < 1 || x > n || y < 1 || y > n {
            Some(Collision::Wall)
        } else if self.snake.bites_itself() {
            Some(Collision::Body)
        } else {
            None
        }
    }

    pub fn increase_speed(&mut self) {
        let next = next_interval(self.interval_ms);
        if next != self.interval_ms {
            debug!("Tick interval {}ms -> {}ms", self.interval_ms, next);
        }
        self.interval_ms = next;
    }

    /// Applies to the next tick. Reversals are ignored and return false.
    /// Accepted in any phase; a paused session just doesn't consume it yet.
    pub fn set_direction(&mut self, requested: Direction) -> bool {
        self.snake.set_direction(requested)
    }

    /// Returns true if this call started the run.
    pub fn start(&mut self) -> bool {
        if self.phase != Phase::NotStarted {
            return false;
        }

        info!("Run started");
        self.phase = Phase::Running;
        true
    }

    /// Running <-> Paused. A no-op (returning false) before the run starts.
    pub fn toggle_pause(&mut self) -> bool {
        self.phase = match self.phase {
            Phase::NotStarted => return false,
            Phase::Running => Phase::Paused,
            Phase::Paused => Phase::Running,
        };

        debug!("Phase is now {:?}", self.phase);
        true
    }

    pub fn reset(&mut self) {
        self.high_score = max(self.high_score, self.score());
        self.snake = Snake::new(center(self.grid_size), START_DIRECTION);
        self.food = self.fresh_food();
        self.interval_ms = self.initial_interval_ms;
        self.phase = Phase::NotStarted;
    }

    /// Food for a freshly reset single-segment snake. On a grid of at least
    /// `MIN_GRID_SIZE` the cell right of the centre is always free, so it
    /// stands in if the spawner finds nothing.
    fn fresh_food(&mut self) -> Position {
        self.spawner
            .place(self.grid_size, &self.snake)
            .unwrap_or_else(|| Right.step(center(self.grid_size)))
    }

    fn end_run(&mut self, cleared: bool) -> TickOutcome {
        if let Some(collision) = self.collision() {
            debug!("{:?} collision at {:?}", collision, self.snake.head());
        }

        let final_score = self.score();
        self.reset();
        info!("Game over (cleared: {}), score {}, high score {}", cleared, final_score, self.high_score);
        TickOutcome::GameOver { final_score, cleared }
    }

    ///////////////////////////////////////////////////////////////////////////

    pub fn score(&self) -> u32 {
        (self.snake.len() - 1) as u32
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Position {
        self.food
    }

    pub fn direction(&self) -> Direction {
        self.snake.direction()
    }

    /// Direction the snake actually moved on the last tick.
    pub fn last_moved(&self) -> Direction {
        self.snake.last_moved()
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms())
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn started(&self) -> bool {
        self.phase != Phase::NotStarted
    }

    pub fn paused(&self) -> bool {
        self.phase == Phase::Paused
    }

    #[cfg(test)]
    pub(crate) fn arrange(&mut self, body: &[Position], food: Position, direction: Direction) {
        self.snake = Snake::from_body(body, direction);
        self.food = food;
    }
}

fn center(grid_size: i16) -> Position {
    let mid = (grid_size + 1) / 2;
    (mid, mid)
}
