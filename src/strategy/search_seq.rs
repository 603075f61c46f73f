use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::engine::Direction;
use crate::game::Game;

use super::{rollout, select_best, unevaluated, BranchEval, MonteCarloConfig, RolloutStats, Strategy};

/// Single-threaded Monte Carlo move evaluation.
///
/// For each legal direction the strategy clones the game, applies the move,
/// then samples `samples` random playouts from the post-move state and
/// averages their final scores. Exhaustive search is infeasible at 2048's
/// branching factor; cheap forward simulation stands in as the estimate of
/// move value.
pub struct MonteCarlo {
    cfg: MonteCarloConfig,
    rng: StdRng,
    stats: RolloutStats,
}

impl MonteCarlo {
    pub fn new() -> Self {
        Self::with_config(MonteCarloConfig::default())
    }

    pub fn with_config(cfg: MonteCarloConfig) -> Self {
        Self {
            cfg,
            rng: StdRng::from_entropy(),
            stats: RolloutStats::default(),
        }
    }

    /// Deterministic playouts for tests and reproducible runs.
    pub fn with_config_and_seed(cfg: MonteCarloConfig, seed: u64) -> Self {
        Self {
            cfg,
            rng: StdRng::seed_from_u64(seed),
            stats: RolloutStats::default(),
        }
    }

    /// Pick the direction with the highest mean playout score.
    ///
    /// Example
    /// ```
    /// use mc_2048::game::Game;
    /// use mc_2048::strategy::{MonteCarlo, MonteCarloConfig};
    /// use rand::{rngs::StdRng, SeedableRng};
    /// let mut rng = StdRng::seed_from_u64(7);
    /// let game = Game::new(&mut rng);
    /// let cfg = MonteCarloConfig { samples: 2, ..Default::default() };
    /// let mut mc = MonteCarlo::with_config_and_seed(cfg, 8);
    /// assert!(mc.best_move(&game).is_some());
    /// ```
    #[inline]
    pub fn best_move(&mut self, game: &Game) -> Option<Direction> {
        let branches = self.branch_evals(game);
        select_best(&branches)
    }

    /// Mean playout score per direction, in `[Up, Down, Left, Right]` order.
    ///
    /// A direction whose shift is illegal contributes no outcomes: it is
    /// marked `legal = false` rather than scored.
    pub fn branch_evals(&mut self, game: &Game) -> [BranchEval; 4] {
        let samples = self.cfg.samples.max(1);
        let mut stats = RolloutStats::default();
        let mut out = unevaluated();
        for (i, &dir) in Direction::ALL.iter().enumerate() {
            let mut after = game.clone();
            if !after.try_move(dir, &mut self.rng) {
                continue;
            }
            let mut total = 0u64;
            for _ in 0..samples {
                let (score, steps) = rollout(after.clone(), self.cfg.win_tile, &mut self.rng);
                total += score;
                stats.rollouts += 1;
                stats.moves += steps;
            }
            out[i] = BranchEval {
                dir,
                ev: total as f64 / samples as f64,
                legal: true,
            };
        }
        self.stats = stats;
        out
    }

    /// Playout counters from the last call to [`best_move`](Self::best_move)
    /// or [`branch_evals`](Self::branch_evals).
    #[inline]
    pub fn last_stats(&self) -> RolloutStats {
        self.stats
    }

    /// Reset accumulated stats to zero.
    #[inline]
    pub fn reset_stats(&mut self) {
        self.stats = RolloutStats::default();
    }
}

impl Default for MonteCarlo {
    fn default() -> Self {
        Self::new()
    }
}

impl Strategy for MonteCarlo {
    fn best_move(&mut self, game: &Game) -> Option<Direction> {
        MonteCarlo::best_move(self, game)
    }
}
