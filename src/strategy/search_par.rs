use rayon::prelude::*;

use crate::engine::Direction;
use crate::game::Game;

use super::{rollout, select_best, unevaluated, BranchEval, MonteCarloConfig, RolloutStats, Strategy};

/// Monte Carlo move evaluation with rayon-parallel playouts.
///
/// Every playout runs on its own cloned game with a task-local RNG; there is
/// no shared mutable state. Outcomes are grouped by direction only after all
/// playouts finish, so completion order cannot affect the means and the
/// selection matches the sequential strategy's tie-break rule.
pub struct MonteCarloParallel {
    cfg: MonteCarloConfig,
    stats: RolloutStats,
}

impl MonteCarloParallel {
    pub fn new() -> Self {
        Self::with_config(MonteCarloConfig::default())
    }

    pub fn with_config(cfg: MonteCarloConfig) -> Self {
        Self {
            cfg,
            stats: RolloutStats::default(),
        }
    }

    /// Pick the direction with the highest mean playout score.
    #[inline]
    pub fn best_move(&mut self, game: &Game) -> Option<Direction> {
        let branches = self.branch_evals(game);
        select_best(&branches)
    }

    /// Mean playout score per direction, in `[Up, Down, Left, Right]` order.
    pub fn branch_evals(&mut self, game: &Game) -> [BranchEval; 4] {
        let samples = self.cfg.samples.max(1);
        let win_tile = self.cfg.win_tile;
        let evals: Vec<(usize, BranchEval, RolloutStats)> = Direction::ALL
            .par_iter()
            .enumerate()
            .map(|(i, &dir)| {
                let mut rng = rand::thread_rng();
                let mut after = game.clone();
                if !after.try_move(dir, &mut rng) {
                    return (i, BranchEval { dir, ev: 0.0, legal: false }, RolloutStats::default());
                }
                let outcomes: Vec<(u64, u64)> = (0..samples)
                    .into_par_iter()
                    .map(|_| {
                        let mut rng = rand::thread_rng();
                        rollout(after.clone(), win_tile, &mut rng)
                    })
                    .collect();
                let total: u64 = outcomes.iter().map(|&(score, _)| score).sum();
                let stats = RolloutStats {
                    rollouts: outcomes.len() as u64,
                    moves: outcomes.iter().map(|&(_, steps)| steps).sum(),
                };
                let eval = BranchEval {
                    dir,
                    ev: total as f64 / samples as f64,
                    legal: true,
                };
                (i, eval, stats)
            })
            .collect();

        let mut out = unevaluated();
        let mut stats = RolloutStats::default();
        for (i, eval, branch_stats) in evals {
            out[i] = eval;
            stats.rollouts += branch_stats.rollouts;
            stats.moves += branch_stats.moves;
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

impl Default for MonteCarloParallel {
    fn default() -> Self {
        Self::new()
    }
}

impl Strategy for MonteCarloParallel {
    fn best_move(&mut self, game: &Game) -> Option<Direction> {
        MonteCarloParallel::best_move(self, game)
    }
}
