//! Move-selection strategies.
//!
//! This module provides:
//! - [`RandomStrategy`]: plays the first legal direction of a shuffled four;
//!   also the playout policy used inside the Monte Carlo strategies.
//! - [`MonteCarlo`]: single-threaded Monte Carlo move evaluation.
//! - [`MonteCarloParallel`]: rayon-based parallel playouts.
//!
//! Both Monte Carlo variants share the same public surface and defaults:
//! for every legal direction they sample random playouts from the post-move
//! state and pick the direction with the highest mean final score.
//!
//! Quick start
//! ```
//! use mc_2048::game::Game;
//! use mc_2048::strategy::{MonteCarlo, MonteCarloConfig, MonteCarloParallel};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let mut rng = StdRng::seed_from_u64(123);
//! let game = Game::new(&mut rng);
//!
//! let cfg = MonteCarloConfig { samples: 4, ..Default::default() };
//! let mut mc = MonteCarlo::with_config_and_seed(cfg.clone(), 5);
//! let m = mc.best_move(&game);
//!
//! let mut mc_par = MonteCarloParallel::with_config(cfg);
//! assert!(m.is_some() && mc_par.best_move(&game).is_some());
//! ```

use rand::Rng;

use crate::engine::Direction;
use crate::game::{Game, WIN_TILE};

mod random;
mod search_par;
mod search_seq;

pub use random::RandomStrategy;
pub use search_par::MonteCarloParallel;
pub use search_seq::MonteCarlo;

/// One capability: given a state, produce a direction — or `None` when no
/// direction is legal (the game is over).
pub trait Strategy {
    fn best_move(&mut self, game: &Game) -> Option<Direction>;
}

/// Configurable knobs for the Monte Carlo strategies.
#[derive(Debug, Clone)]
pub struct MonteCarloConfig {
    /// Random playouts sampled per legal direction. More samples buy better
    /// decisions for more compute; 10..=100 are the usual settings.
    pub samples: usize,
    /// A playout stops early once a tile of this value appears.
    pub win_tile: u32,
}

impl Default for MonteCarloConfig {
    fn default() -> Self {
        Self {
            samples: 100,
            win_tile: WIN_TILE,
        }
    }
}

/// Mean playout score for one root direction.
///
/// `legal` is false when the direction is a no-op for the current board; an
/// illegal direction contributes no outcomes and is never selected.
#[derive(Debug, Clone, Copy)]
pub struct BranchEval {
    pub dir: Direction,
    pub ev: f64,
    pub legal: bool,
}

/// Playout counters from the last evaluation call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RolloutStats {
    /// Playouts completed.
    pub rollouts: u64,
    /// Moves simulated across all playouts.
    pub moves: u64,
}

/// First legal direction with the strictly highest mean, in
/// [`Direction::ALL`] order. The strict comparison makes ties resolve to
/// the earliest direction, deterministically for a fixed enumeration.
pub(crate) fn select_best(branches: &[BranchEval; 4]) -> Option<Direction> {
    let mut best = None;
    let mut best_ev = f64::NEG_INFINITY;
    for branch in branches {
        if branch.legal && branch.ev > best_ev {
            best_ev = branch.ev;
            best = Some(branch.dir);
        }
    }
    best
}

pub(crate) fn unevaluated() -> [BranchEval; 4] {
    [
        BranchEval { dir: Direction::Up, ev: 0.0, legal: false },
        BranchEval { dir: Direction::Down, ev: 0.0, legal: false },
        BranchEval { dir: Direction::Left, ev: 0.0, legal: false },
        BranchEval { dir: Direction::Right, ev: 0.0, legal: false },
    ]
}

/// Play random moves on an owned clone until no direction is legal or a
/// `win_tile` appears. Returns the final cumulative score and the number of
/// moves simulated.
pub(crate) fn rollout<R: Rng + ?Sized>(mut game: Game, win_tile: u32, rng: &mut R) -> (u64, u64) {
    let start_moves = game.moves();
    loop {
        if game.has_reached(win_tile) {
            break;
        }
        match random::random_legal_move(&game, rng) {
            Some(direction) => {
                game.try_move(direction, rng);
            }
            None => break,
        }
    }
    (game.score(), game.moves() - start_moves)
}
