use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::Position;
use crate::snake::Snake;

/// Random draws before giving up on rejection sampling and picking from the
/// list of free cells instead.
const MAX_SAMPLES: usize = 64;

pub struct FoodSpawner {
    rng: StdRng,
}

impl FoodSpawner {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        FoodSpawner { rng }
    }

    /// Picks a uniformly random cell in `[1, grid_size]²` not covered by the
    /// snake. `None` means the snake fills the whole grid.
    pub fn place(&mut self, grid_size: i16, snake: &Snake) -> Option<Position> {
        for _ in 0..MAX_SAMPLES {
            let pos = (self.rng.gen_range(1..=grid_size), self.rng.gen_range(1..=grid_size));
            if !snake.contains(pos) {
                return Some(pos);
            }
        }

        let free: Vec<Position> = (1..=grid_size)
            .flat_map(|y| (1..=grid_size).map(move |x| (x, y)))
            .filter(|pos| !snake.contains(*pos))
            .collect();
        free.choose(&mut self.rng).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snake::Direction::Right;

    #[test]
    fn food_never_lands_on_the_snake() {
        let mut spawner = FoodSpawner::new(Some(7));
        let snake = Snake::from_body(&[(2, 2), (1, 2), (1, 1), (2, 1)], Right);

        for _ in 0..500 {
            let food = spawner.place(3, &snake).unwrap();
            assert!(!snake.contains(food));
            assert!((1..=3).contains(&food.0) && (1..=3).contains(&food.1));
        }
    }

    #[test]
    fn the_last_free_cell_is_found() {
        let mut spawner = FoodSpawner::new(Some(1));
        let snake = Snake::from_body(&[(1, 1), (2, 1), (2, 2)], Right);

        assert_eq!(spawner.place(2, &snake), Some((1, 2)));
    }

    #[test]
    fn a_full_grid_has_no_room() {
        let mut spawner = FoodSpawner::new(Some(1));
        let snake = Snake::from_body(&[(1, 1), (2, 1), (2, 2), (1, 2)], Right);

        assert_eq!(spawner.place(2, &snake), None);
    }

    #[test]
    fn same_seed_same_food() {
        let snake = Snake::new((10, 10), Right);
        let mut a = FoodSpawner::new(Some(42));
        let mut b = FoodSpawner::new(Some(42));

        for _ in 0..20 {
            assert_eq!(a.place(20, &snake), b.place(20, &snake));
        }
    }
}
