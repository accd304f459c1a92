use crate::{Position, TermInt};
use crate::frontend::{AudioCue, Cue, InputSource, Renderer};
use crate::input::{map_key, InputEvent};
use crate::session::{GameSession, Phase};
use std::{io::{self, Stdout, Write, stdout}, time::Duration};

use crossterm::{cursor, execute, queue, style, terminal};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::event::{Event, read, poll};
use log::debug;

const SNAKE_BODY: [char; 2] = ['█', '█'];
const FOOD: [char; 2] = ['(', ')'];

const INTRO_LINES: &[&str] = &[
    "SNAKE",
    "",
    "Space to start",
    "Arrow keys or WASD to move",
    "P or Esc to pause",
    "Q or Ctrl+C to quit",
];
const PAUSE_LINES: &[&str] = &["Paused", "P or Esc to resume"];

/// Draws the board into an off-screen frame and writes only the characters
/// that differ from what the terminal already shows.
pub struct TermManager {
    width: TermInt,
    height: TermInt,
    grid_size: TermInt,
    origin: (TermInt, TermInt),
    stdout: Stdout,
    screen: Vec<char>,
    frame: Vec<char>,
}

impl TermManager {
    pub fn new(grid_size: i16) -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        Ok(TermManager::with_size(width, height, grid_size))
    }

    pub fn with_size(width: TermInt, height: TermInt, grid_size: i16) -> Self {
        let grid_size = grid_size as TermInt;
        let (board_w, board_h) = board_size(grid_size);
        let origin = (width.saturating_sub(board_w) / 2, height.saturating_sub(board_h + 1) / 2);
        let cells = width as usize * height as usize;

        TermManager {
            width,
            height,
            grid_size,
            origin,
            stdout: stdout(),
            screen: vec![' '; cells],
            frame: vec![' '; cells],
        }
    }

    /// Columns and rows needed for the board, its border and the status line.
    pub fn required_size(&self) -> (TermInt, TermInt) {
        let (board_w, board_h) = board_size(self.grid_size);
        (board_w, board_h + 1)
    }

    pub fn terminal_size(&self) -> (TermInt, TermInt) {
        (self.width, self.height)
    }

    pub fn fits(&self) -> bool {
        let (w, h) = self.required_size();
        self.width >= w && self.height >= h
    }

    pub fn setup(&mut self) -> io::Result<()> {
        execute!(self.stdout, EnterAlternateScreen)?;
        terminal::enable_raw_mode()?;
        execute!(self.stdout, cursor::Hide, cursor::DisableBlinking, terminal::Clear(ClearType::All))?;
        self.screen.iter_mut().for_each(|ch| *ch = ' ');
        Ok(())
    }

    pub fn restore(&mut self) -> io::Result<()> {
        terminal::disable_raw_mode()?;
        execute!(self.stdout, cursor::Show, cursor::EnableBlinking, LeaveAlternateScreen)
    }

    ///////////////////////////////////////////////////////////////////////////

    fn compose(&mut self, session: &GameSession) {
        self.frame.iter_mut().for_each(|ch| *ch = ' ');
        self.draw_borders();

        if session.started() {
            self.put_cell(session.food(), FOOD);
        }

        let head = session.snake().head_char();
        for (i, pos) in session.snake().body().enumerate() {
            let chars = if i == 0 { [head, head] } else { SNAKE_BODY };
            self.put_cell(*pos, chars);
        }

        let status = format!("Score: {:03}  High: {:03}", session.score(), session.high_score());
        self.put_str((self.origin.0, self.origin.1 + self.grid_size + 2), &status);

        match session.phase() {
            Phase::NotStarted => self.draw_message(INTRO_LINES),
            Phase::Paused => self.draw_message(PAUSE_LINES),
            Phase::Running => {}
        }
    }

    fn draw_borders(&mut self) {
        let (width, height) = board_size(self.grid_size);
        let (ox, oy) = self.origin;
        let end_x = ox + width - 1;
        let end_y = oy + height - 1;

        for x in ox..=end_x {
            let ch = if x == ox || x == end_x {'+'} else {'-'};
            self.put((x, oy), ch);
            self.put((x, end_y), ch);
        }

        for y in oy + 1..end_y {
            self.put((ox, y), '|');
            self.put((end_x, y), '|');
        }
    }

    /// Boxed lines centered on the board.
    fn draw_message(&mut self, lines: &[&str]) {
        let (board_w, board_h) = board_size(self.grid_size);
        let msg_height = lines.len() as TermInt + 2;
        let msg_width = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0) as TermInt + 2;
        let center = (self.origin.0 + board_w / 2, self.origin.1 + board_h / 2);
        let top_left = (center.0.saturating_sub(msg_width / 2), center.1.saturating_sub(msg_height / 2));

        for y_diff in 0..msg_height {
            for x_diff in 0..msg_width {
                self.put((top_left.0 + x_diff, top_left.1 + y_diff), ' ');
            }
        }

        for (i, line) in lines.iter().enumerate() {
            let padded_line = format!("{line: ^width$}", line = line, width = msg_width as usize);
            self.put_str((top_left.0, top_left.1 + i as TermInt + 1), &padded_line);
        }
    }

    /// A grid cell is two terminal columns wide.
    fn put_cell(&mut self, pos: Position, chars: [char; 2]) {
        let n = self.grid_size as i16;
        if pos.0 < 1 || pos.1 < 1 || pos.0 > n || pos.1 > n {
            return;
        }

        let x = self.origin.0 + 1 + 2 * (pos.0 as TermInt - 1);
        let y = self.origin.1 + pos.1 as TermInt;
        self.put((x, y), chars[0]);
        self.put((x + 1, y), chars[1]);
    }

    fn put_str(&mut self, start: (TermInt, TermInt), s: &str) {
        for (x_diff, ch) in s.chars().enumerate() {
            self.put((start.0 + x_diff as TermInt, start.1), ch);
        }
    }

    fn put(&mut self, (x, y): (TermInt, TermInt), ch: char) {
        if x < self.width && y < self.height {
            self.frame[self.width as usize * y as usize + x as usize] = ch;
        }
    }

    /// Copies the frame onto the screen buffer and returns the cells that
    /// changed.
    fn sync_screen(&mut self) -> Vec<(TermInt, TermInt, char)> {
        let width = self.width as usize;
        let mut changed = vec![];

        for (i, (&want, have)) in self.frame.iter().zip(self.screen.iter_mut()).enumerate() {
            if want != *have {
                changed.push(((i % width) as TermInt, (i / width) as TermInt, want));
                *have = want;
            }
        }

        changed
    }

    fn flush_frame(&mut self) -> io::Result<()> {
        for (x, y, ch) in self.sync_screen() {
            queue!(self.stdout, cursor::MoveTo(x, y), style::Print(ch))?;
        }

        self.stdout.flush()
    }
}

impl Renderer for TermManager {
    fn render(&mut self, session: &GameSession) -> io::Result<()> {
        self.compose(session);
        self.flush_frame()
    }
}

impl InputSource for TermManager {
    fn poll_input(&mut self) -> io::Result<Vec<InputEvent>> {
        let mut events = vec![];

        while poll(Duration::from_millis(1))? {
            if let Event::Key(ev) = read()? {
                events.extend(map_key(&ev));
            }
        }

        Ok(events)
    }
}

/// Rings the terminal bell for every cue.
pub struct Bell {
    muted: bool,
    stdout: Stdout,
}

impl Bell {
    pub fn new(muted: bool) -> Self {
        Bell { muted, stdout: stdout() }
    }
}

impl AudioCue for Bell {
    fn play(&mut self, cue: Cue) {
        if self.muted {
            return;
        }

        if let Err(e) = write!(self.stdout, "\x07").and_then(|_| self.stdout.flush()) {
            debug!("Bell for {:?} failed: {}", cue, e);
        }
    }
}

fn board_size(grid_size: TermInt) -> (TermInt, TermInt) {
    (grid_size * 2 + 2, grid_size + 2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::session::TickOutcome;
    use crate::snake::Direction::*;

    fn session() -> GameSession {
        GameSession::new(&Config { grid_size: 10, seed: Some(4), ..Config::default() })
    }

    fn term() -> TermManager {
        TermManager::with_size(40, 25, 10)
    }

    fn cells(term: &TermManager, x: usize, y: usize, len: usize) -> String {
        let start = y * term.width as usize + x;
        term.frame[start..start + len].iter().collect()
    }

    fn text(term: &TermManager) -> String {
        term.frame
            .chunks(term.width as usize)
            .map(|row| row.iter().collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn food_is_hidden_until_the_run_starts() {
        let mut term = term();
        let mut session = session();

        term.compose(&session);
        assert!(!text(&term).contains('('));
        assert!(!text(&term).contains(')'));

        session.start();
        term.compose(&session);
        assert!(text(&term).contains("()"));
    }

    #[test]
    fn status_line_is_zero_padded() {
        let mut term = term();
        let mut session = session();
        session.start();
        session.arrange(&[(5, 5)], (6, 5), Right);
        assert!(matches!(session.tick(), TickOutcome::Grew { .. }));

        term.compose(&session);
        // status line sits right under the board: origin (9, 6) + 12 rows
        assert_eq!(cells(&term, 9, 18, 21), "Score: 001  High: 000");
    }

    #[test]
    fn overlays_follow_the_phase() {
        let mut term = term();
        let mut session = session();

        term.compose(&session);
        assert!(text(&term).contains("Space to start"));

        session.start();
        term.compose(&session);
        assert!(!text(&term).contains("Space to start"));
        assert!(!text(&term).contains("Paused"));

        session.toggle_pause();
        term.compose(&session);
        assert!(text(&term).contains("Paused"));
    }

    #[test]
    fn board_is_bordered_and_cells_are_two_columns() {
        let mut term = term();
        let mut session = session();
        session.start();
        session.arrange(&[(1, 1), (2, 1)], (10, 10), Left);

        term.compose(&session);
        // origin is (9, 6) for a 22x12 board in a 40x25 terminal
        assert_eq!(cells(&term, 9, 6, 22), format!("+{}+", "-".repeat(20)));
        assert_eq!(cells(&term, 9, 7, 6), "|<<██ ");
        assert_eq!(cells(&term, 28, 16, 3), "()|");
        assert_eq!(cells(&term, 9, 17, 22), format!("+{}+", "-".repeat(20)));
    }

    #[test]
    fn only_changed_cells_are_written() {
        let mut term = term();
        let mut session = session();
        session.start();
        session.arrange(&[(5, 5)], (1, 1), Right);

        term.compose(&session);
        assert!(!term.sync_screen().is_empty());
        assert!(term.sync_screen().is_empty());

        assert_eq!(session.tick(), TickOutcome::Moved);
        term.compose(&session);
        let mut changed = term.sync_screen();
        changed.sort();
        // old cell blanked, new cell drawn; x = 9 + 1 + 2 * (col - 1), y = 6 + 5
        assert_eq!(changed, vec![(18, 11, ' '), (19, 11, ' '), (20, 11, '>'), (21, 11, '>')]);
    }

    #[test]
    fn terminal_too_small_for_the_board() {
        assert!(TermManager::with_size(40, 25, 10).fits());
        assert!(!TermManager::with_size(21, 25, 10).fits());
        assert!(!TermManager::with_size(40, 12, 10).fits());
        assert_eq!(TermManager::with_size(40, 25, 10).required_size(), (22, 13));
    }
}
