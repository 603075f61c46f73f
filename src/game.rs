use rand::Rng;
use std::fmt;

use crate::engine::{Board, Direction};
use crate::strategy::Strategy;

/// Tile value that counts as winning a game.
pub const WIN_TILE: u32 = 2048;

/// A board plus the running score and move count.
///
/// `Game` is value-like: `clone()` yields a fully independent copy, which is
/// what lets strategies explore hypothetical futures without corrupting the
/// real game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    board: Board,
    score: u64,
    moves: u64,
}

impl Game {
    /// Start a fresh game: empty board with two random tiles.
    ///
    /// ```
    /// use mc_2048::game::Game;
    /// use rand::{rngs::StdRng, SeedableRng};
    /// let mut rng = StdRng::seed_from_u64(42);
    /// let game = Game::new(&mut rng);
    /// assert_eq!(game.board().count_empty(), 14);
    /// assert_eq!(game.score(), 0);
    /// assert_eq!(game.moves(), 0);
    /// ```
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut board = Board::EMPTY;
        board.add_random_tile(rng);
        board.add_random_tile(rng);
        Game {
            board,
            score: 0,
            moves: 0,
        }
    }

    /// Wrap an existing board with zeroed counters.
    pub fn from_board(board: Board) -> Self {
        Game {
            board,
            score: 0,
            moves: 0,
        }
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn score(&self) -> u64 {
        self.score
    }

    #[inline]
    pub fn moves(&self) -> u64 {
        self.moves
    }

    /// Apply a move: shift, bank the merge points, spawn a new tile.
    ///
    /// Returns `false` without mutating anything when the shift is illegal.
    /// A successful shift always leaves at least one empty cell (the vacated
    /// source), so the spawn cannot fail.
    pub fn try_move<R: Rng + ?Sized>(&mut self, direction: Direction, rng: &mut R) -> bool {
        let outcome = self.board.try_shift(direction);
        if !outcome.moved {
            return false;
        }
        self.moves += 1;
        self.score += outcome.points as u64;
        self.board.add_random_tile(rng);
        true
    }

    /// True if no direction yields a legal shift.
    #[inline]
    pub fn is_over(&self) -> bool {
        self.board.is_game_over()
    }

    #[inline]
    pub fn highest_tile(&self) -> u32 {
        self.board.highest_tile()
    }

    /// True once any cell holds `tile` or more.
    #[inline]
    pub fn has_reached(&self, tile: u32) -> bool {
        self.board.highest_tile() >= tile
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Score: {} Moves: {}", self.score, self.moves)?;
        write!(f, "{}", self.board)
    }
}

/// Why [`play_until`] stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayOutcome {
    /// The stop predicate returned true.
    ConditionMet,
    /// The strategy found no legal direction.
    GameOver,
}

/// Drive `game` with `strategy` until `stop` returns true or no legal move
/// remains. `after_move` observes the state after each move together with
/// the direction just played.
///
/// ```
/// use mc_2048::game::{play_until, Game, PlayOutcome};
/// use mc_2048::strategy::RandomStrategy;
/// use rand::{rngs::StdRng, SeedableRng};
///
/// let mut rng = StdRng::seed_from_u64(1);
/// let mut game = Game::new(&mut rng);
/// let mut strategy = RandomStrategy::with_seed(2);
/// let outcome = play_until(
///     &mut game,
///     &mut strategy,
///     &mut rng,
///     |g| g.moves() >= 8,
///     |_, _| {},
/// );
/// assert_eq!(outcome, PlayOutcome::ConditionMet);
/// assert_eq!(game.moves(), 8);
/// ```
pub fn play_until<S, R, C, F>(
    game: &mut Game,
    strategy: &mut S,
    rng: &mut R,
    mut stop: C,
    mut after_move: F,
) -> PlayOutcome
where
    S: Strategy + ?Sized,
    R: Rng + ?Sized,
    C: FnMut(&Game) -> bool,
    F: FnMut(&Game, Direction),
{
    loop {
        if stop(game) {
            return PlayOutcome::ConditionMet;
        }
        let direction = match strategy.best_move(game) {
            Some(direction) => direction,
            None => return PlayOutcome::GameOver,
        };
        if !game.try_move(direction, rng) {
            return PlayOutcome::GameOver;
        }
        after_move(game, direction);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::RandomStrategy;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn stuck_board() -> Board {
        Board::from_cells([
            2, 4, 2, 4, //
            4, 2, 4, 2, //
            2, 4, 2, 4, //
            4, 2, 4, 2,
        ])
    }

    #[test]
    fn new_game_has_two_tiles_and_zero_counters() {
        let mut rng = StdRng::seed_from_u64(1);
        let game = Game::new(&mut rng);
        assert_eq!(game.board().count_empty(), 14);
        assert_eq!(game.score(), 0);
        assert_eq!(game.moves(), 0);
    }

    #[test]
    fn successful_move_updates_counters_and_spawns() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut game = Game::from_board(Board::from_cells([
            2, 2, 0, 0, //
            0, 0, 0, 0, //
            0, 0, 0, 0, //
            0, 0, 0, 0,
        ]));
        assert!(game.try_move(Direction::Left, &mut rng));
        assert_eq!(game.score(), 4);
        assert_eq!(game.moves(), 1);
        assert_eq!(game.board().cell(0, 0), 4);
        // merged pair left one tile, the spawn added another
        assert_eq!(game.board().count_empty(), 14);
    }

    #[test]
    fn illegal_move_is_a_no_op() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut game = Game::from_board(Board::from_cells([
            2, 0, 0, 0, //
            0, 0, 0, 0, //
            0, 0, 0, 0, //
            0, 0, 0, 0,
        ]));
        let before = game.clone();
        assert!(!game.try_move(Direction::Left, &mut rng));
        assert!(!game.try_move(Direction::Up, &mut rng));
        assert_eq!(game, before);
    }

    #[test]
    fn clone_is_isolated() {
        let mut rng = StdRng::seed_from_u64(4);
        let original = Game::new(&mut rng);
        let mut copy = original.clone();
        while copy.try_move(Direction::Left, &mut rng)
            || copy.try_move(Direction::Up, &mut rng)
            || copy.try_move(Direction::Right, &mut rng)
            || copy.try_move(Direction::Down, &mut rng)
        {
            if copy.moves() >= 10 {
                break;
            }
        }
        assert!(copy.moves() > 0);
        assert_eq!(original.moves(), 0);
        assert_eq!(original.score(), 0);
    }

    #[test]
    fn terminal_detection() {
        assert!(Game::from_board(stuck_board()).is_over());
        let mut rng = StdRng::seed_from_u64(5);
        assert!(!Game::new(&mut rng).is_over());
    }

    #[test]
    fn win_check_uses_at_least() {
        let mut cells = [0u32; 16];
        cells[7] = 4096;
        let game = Game::from_board(Board::from_cells(cells));
        assert!(game.has_reached(WIN_TILE));
        assert!(!game.board().contains(WIN_TILE));
    }

    #[test]
    fn play_until_stop_predicate_wins_over_moves() {
        let mut rng = StdRng::seed_from_u64(6);
        let mut game = Game::new(&mut rng);
        let mut strategy = RandomStrategy::with_seed(7);
        let outcome = play_until(&mut game, &mut strategy, &mut rng, |_| true, |_, _| {});
        assert_eq!(outcome, PlayOutcome::ConditionMet);
        assert_eq!(game.moves(), 0);
    }

    #[test]
    fn play_until_reports_game_over_when_stuck() {
        let mut rng = StdRng::seed_from_u64(8);
        let mut game = Game::from_board(stuck_board());
        let mut strategy = RandomStrategy::with_seed(9);
        let mut seen = 0;
        let outcome = play_until(
            &mut game,
            &mut strategy,
            &mut rng,
            |_| false,
            |_, _| seen += 1,
        );
        assert_eq!(outcome, PlayOutcome::GameOver);
        assert_eq!(seen, 0);
    }

    #[test]
    fn play_until_invokes_callback_per_move() {
        let mut rng = StdRng::seed_from_u64(10);
        let mut game = Game::new(&mut rng);
        let mut strategy = RandomStrategy::with_seed(11);
        let mut played = Vec::new();
        let outcome = play_until(
            &mut game,
            &mut strategy,
            &mut rng,
            |g| g.moves() >= 5,
            |g, direction| played.push((g.moves(), direction)),
        );
        assert_eq!(outcome, PlayOutcome::ConditionMet);
        assert_eq!(played.len(), 5);
        assert_eq!(played.first().map(|p| p.0), Some(1));
    }
}
