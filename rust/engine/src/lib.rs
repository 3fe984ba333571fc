//! # yamb-engine: Yamb Rule Engine
//!
//! A deterministic rule engine for the solitaire dice game yamb. It scores
//! dice results, enforces the fill order of every column and drives turns,
//! with seeded RNG for reproducible simulation.
//!
//! ## Core Modules
//!
//! - [`slot`] - The 17 slots, their categories and slot bitsets
//! - [`scorecard`] - Per-column score buffer with a filled bitset
//! - [`dice`] - ChaCha20 dice, including a pre-generated finite die
//! - [`scoring`] - Reference evaluator and auto-slot aggregation
//! - [`boost`] - Histogram scorer and bounded evaluation caches
//! - [`evaluator`] - Reference or boosted strategy chosen per column
//! - [`column`] - Ordered, free and announced columns
//! - [`rules`] - Argument validation for the orchestrator
//! - [`game`] - Turn orchestration over a set of columns
//! - [`player`] - Decision-making seam and the game driver
//! - [`outcomes`] - Exhaustive dice outcomes and score tables
//! - [`config`] - Layered TOML and environment configuration
//! - [`errors`] - Error types for game operations
//!
//! ## Quick Start
//!
//! ```rust
//! use yamb_engine::scoring::evaluate;
//! use yamb_engine::slot::Slot;
//!
//! assert_eq!(evaluate(Slot::Yamb, &[1, 1, 1, 1, 1]).unwrap(), 55);
//! assert_eq!(evaluate(Slot::Straight, &[6, 2, 4, 3, 5]).unwrap(), 45);
//! assert_eq!(evaluate(Slot::FullHouse, &[2, 2, 6, 6, 6]).unwrap(), 52);
//! ```
//!
//! ## Deterministic Gameplay
//!
//! Games with the same seed roll the same dice:
//!
//! ```rust
//! use yamb_engine::game::Yamb;
//!
//! let mut a = Yamb::standard(Some(42));
//! let mut b = Yamb::standard(Some(42));
//! for game in [&mut a, &mut b] {
//!     game.start_turn().unwrap();
//!     game.roll_dice(None).unwrap();
//! }
//! assert_eq!(a.results(), b.results());
//! ```
//!
//! ## Announcing
//!
//! ```rust
//! use yamb_engine::column::{PostFillingAction, PreFillingAction, PreFillingRequirement};
//! use yamb_engine::game::Yamb;
//! use yamb_engine::slot::Slot;
//!
//! let mut game = Yamb::standard(Some(1));
//! game.start_turn().unwrap();
//! game.roll_dice(None).unwrap();
//! assert_eq!(
//!     game.get_pre_filling_requirements(3).unwrap(),
//!     Some(PreFillingRequirement::Announcement)
//! );
//! game.make_pre_filling_action(3, PreFillingAction::Announce(Slot::Yamb)).unwrap();
//! assert_eq!(game.locked_column(), Some(3));
//! game.end_turn(3, Slot::Yamb).unwrap();
//! game.make_post_filling_action(3, PostFillingAction::Suppress).unwrap();
//! assert_eq!(game.locked_column(), None);
//! ```

pub mod boost;
pub mod column;
pub mod config;
pub mod dice;
pub mod errors;
pub mod evaluator;
pub mod game;
pub mod outcomes;
pub mod player;
pub mod rules;
pub mod scorecard;
pub mod scoring;
pub mod slot;
