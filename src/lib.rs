//! mc-2048: a 2048 game engine + Monte Carlo policy
//!
//! This crate provides:
//! - A value-semantics `Board`/`Game` pair with ergonomic methods
//!   (`try_shift`, `try_move`, `is_over`, ...)
//! - A Monte Carlo AI (`strategy` module) with single-threaded and parallel
//!   variants, plus the random baseline it uses for playouts
//! - A CSV history format for won games (`history` module)
//!
//! Quick start:
//! ```
//! use mc_2048::game::Game;
//! use mc_2048::strategy::{MonteCarlo, MonteCarloConfig};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! // Deterministic game setup with a seeded RNG
//! let mut rng = StdRng::seed_from_u64(42);
//! let mut game = Game::new(&mut rng);
//!
//! // A small sample count keeps the example fast
//! let cfg = MonteCarloConfig { samples: 4, ..Default::default() };
//! let mut policy = MonteCarlo::with_config_and_seed(cfg, 7);
//!
//! let mut played = 0;
//! while !game.is_over() && played < 4 {
//!     match policy.best_move(&game) {
//!         Some(direction) => {
//!             game.try_move(direction, &mut rng);
//!             played += 1;
//!         }
//!         None => break,
//!     }
//! }
//! assert!(played > 0 && game.moves() == played);
//! ```
//!
//! Full loop (simplest possible)
//! ```
//! use mc_2048::game::{play_until, Game, PlayOutcome};
//! use mc_2048::strategy::RandomStrategy;
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let mut rng = StdRng::seed_from_u64(123);
//! let mut game = Game::new(&mut rng);
//! let mut strategy = RandomStrategy::with_seed(5);
//!
//! // Random play always reaches a stop: here, a move cap
//! let outcome = play_until(
//!     &mut game,
//!     &mut strategy,
//!     &mut rng,
//!     |g| g.moves() >= 16,
//!     |_, _| {},
//! );
//! assert!(matches!(outcome, PlayOutcome::ConditionMet | PlayOutcome::GameOver));
//! ```
pub mod engine;
pub mod game;
pub mod history;
pub mod strategy;
