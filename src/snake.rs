use std::collections::VecDeque;

use crate::Position;
use Direction::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

impl Direction {
    pub fn opposite(self) -> Direction {
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }

    /// The cell one step away from `pos` in this direction. y grows downwards.
    pub fn step(self, pos: Position) -> Position {
        match self {
            Up => (pos.0, pos.1 - 1),
            Down => (pos.0, pos.1 + 1),
            Left => (pos.0 - 1, pos.1),
            Right => (pos.0 + 1, pos.1),
        }
    }
}

/// Snake body, head first.
pub struct Snake {
    body: VecDeque<Position>,
    direction: Direction,
    last_moved: Direction,
}

impl Snake {
    pub fn new(head: Position, direction: Direction) -> Self {
        Snake::from_body(&[head], direction)
    }

    pub fn from_body(body: &[Position], direction: Direction) -> Self {
        debug_assert!(!body.is_empty());
        Snake { body: body.iter().copied().collect(), direction, last_moved: direction }
    }

    pub fn head(&self) -> Position {
        self.body[0]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn body(&self) -> impl Iterator<Item = &Position> + '_ {
        self.body.iter()
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// True if the head shares a cell with any other segment.
    pub fn bites_itself(&self) -> bool {
        let head = self.head();
        self.body.iter().skip(1).any(|seg| *seg == head)
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Direction of the most recent `advance`.
    pub fn last_moved(&self) -> Direction {
        self.last_moved
    }

    /// Returns false (and changes nothing) when asked to reverse the queued
    /// direction.
    pub fn set_direction(&mut self, new_direction: Direction) -> bool {
        if new_direction == self.direction.opposite() {
            return false;
        }

        self.direction = new_direction;
        true
    }

    /// Pushes a new head one cell ahead. The snake is one segment longer until
    /// `drop_tail` is called.
    pub fn advance(&mut self) -> Position {
        let new_head = self.direction.step(self.head());
        self.body.push_front(new_head);
        self.last_moved = self.direction;
        new_head
    }

    pub fn drop_tail(&mut self) -> Option<Position> {
        if self.body.len() > 1 {
            self.body.pop_back()
        } else {
            None
        }
    }

    pub fn head_char(&self) -> char {
        match self.last_moved {
            Up => '^',
            Down => 'v',
            Left => '<',
            Right => '>',
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_moves_head_and_keeps_length_after_drop() {
        let mut snake = Snake::from_body(&[(5, 5), (4, 5)], Right);

        let head = snake.advance();
        assert_eq!(head, (6, 5));
        assert_eq!(snake.len(), 3);

        assert_eq!(snake.drop_tail(), Some((4, 5)));
        assert_eq!(snake.body().copied().collect::<Vec<_>>(), vec![(6, 5), (5, 5)]);
    }

    #[test]
    fn step_follows_screen_coordinates() {
        assert_eq!(Up.step((3, 3)), (3, 2));
        assert_eq!(Down.step((3, 3)), (3, 4));
        assert_eq!(Left.step((3, 3)), (2, 3));
        assert_eq!(Right.step((3, 3)), (4, 3));
    }

    #[test]
    fn reversal_is_rejected() {
        let mut snake = Snake::new((10, 10), Right);

        assert!(!snake.set_direction(Left));
        assert_eq!(snake.direction(), Right);

        assert!(snake.set_direction(Up));
        assert_eq!(snake.direction(), Up);
    }

    #[test]
    fn a_second_turn_is_checked_against_the_queued_direction() {
        let mut snake = Snake::from_body(&[(10, 10), (9, 10)], Right);

        assert!(snake.set_direction(Up));
        assert!(snake.set_direction(Left));
        assert_eq!(snake.direction(), Left);
        assert_eq!(snake.last_moved(), Right);

        assert!(!snake.set_direction(Right));

        snake.advance();
        assert_eq!(snake.last_moved(), Left);
    }

    #[test]
    fn self_bite_is_detected() {
        let snake = Snake::from_body(&[(11, 10), (10, 10), (11, 10), (11, 11)], Right);
        assert!(snake.bites_itself());

        let snake = Snake::from_body(&[(11, 10), (10, 10), (10, 11)], Right);
        assert!(!snake.bites_itself());
    }

    #[test]
    fn single_segment_tail_is_never_dropped() {
        let mut snake = Snake::new((1, 1), Down);
        assert_eq!(snake.drop_tail(), None);
        assert_eq!(snake.len(), 1);
    }
}
