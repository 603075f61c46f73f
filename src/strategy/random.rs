use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::engine::Direction;
use crate::game::Game;

use super::Strategy;

/// Baseline strategy: shuffle the four directions and play the first one
/// whose trial shift changes the board.
///
/// This is also the playout policy the Monte Carlo strategies run to the
/// end of each sampled game.
pub struct RandomStrategy {
    rng: StdRng,
}

impl RandomStrategy {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic picks for tests and reproducible runs.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl Strategy for RandomStrategy {
    fn best_move(&mut self, game: &Game) -> Option<Direction> {
        random_legal_move(game, &mut self.rng)
    }
}

/// Fisher-Yates shuffle over the directions, then the first legal one.
/// Trial shifts run on a board copy; `game` is never mutated.
pub(crate) fn random_legal_move<R: Rng + ?Sized>(game: &Game, rng: &mut R) -> Option<Direction> {
    let mut directions = Direction::ALL;
    directions.shuffle(rng);
    directions
        .into_iter()
        .find(|&direction| game.board().can_shift(direction))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Board;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn picks_a_legal_direction() {
        let mut rng = StdRng::seed_from_u64(21);
        let game = Game::new(&mut rng);
        let mut strategy = RandomStrategy::with_seed(22);
        for _ in 0..50 {
            let direction = strategy.best_move(&game).expect("fresh game has moves");
            assert!(game.board().can_shift(direction));
        }
    }

    #[test]
    fn returns_none_when_stuck() {
        let game = Game::from_board(Board::from_cells([
            2, 4, 2, 4, //
            4, 2, 4, 2, //
            2, 4, 2, 4, //
            4, 2, 4, 2,
        ]));
        let mut strategy = RandomStrategy::with_seed(23);
        assert_eq!(strategy.best_move(&game), None);
    }

    #[test]
    fn only_legal_direction_is_always_found() {
        // A fully packed first column: only Right changes the board.
        let game = Game::from_board(Board::from_cells([
            2, 0, 0, 0, //
            4, 0, 0, 0, //
            2, 0, 0, 0, //
            4, 0, 0, 0,
        ]));
        let mut strategy = RandomStrategy::with_seed(24);
        for _ in 0..20 {
            assert_eq!(strategy.best_move(&game), Some(Direction::Right));
        }
    }
}
