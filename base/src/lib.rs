//! A deterministic, serializable hand state machine for Texas hold'em
//! and short-deck poker.
//!
//! The engine drives a single hand from deal through showdown: an
//! event-driven lifecycle with betting-round invariants, turn order
//! under all-in and short-stack conditions, and layered side-pot
//! settlement that reconciles chips exactly. Table management, timers,
//! transport and persistence belong to external drivers; the engine
//! consumes a pre-ordered deck and a linear sequence of actions, and
//! every snapshot it returns is JSON-serializable and resumable.
//!
//! ```
//! use holdem_engine_base::{Game, GameOptions, PlayerSetting};
//!
//! let mut options = GameOptions::standard();
//! options.seed = Some(1);
//! options.players = vec![
//!     PlayerSetting::new(1_000, &["dealer"]),
//!     PlayerSetting::new(1_000, &["sb"]),
//!     PlayerSetting::new(1_000, &["bb"]),
//! ];
//!
//! let mut game = Game::new(options);
//! game.start().unwrap();
//! game.ready_for_all().unwrap();
//! game.pay_blinds().unwrap();
//! game.ready_for_all().unwrap();
//! assert_eq!("RoundStarted", game.state().status.current_event);
//! ```

pub mod deck;
pub mod errors;
pub mod essential;
pub mod evaluator;
pub mod event;
pub mod game;
pub mod hand_history;
pub mod pot;
mod settlement;

pub use errors::GameError;
pub use essential::{
    ActionKind, BlindSetting, GameOptions, GameResult, GameState, LastAction, Meta, PlayerSetting,
    PlayerState, Round, Status,
};
pub use evaluator::{Category, CombinationInfo, CombinationPowers};
pub use event::GameEvent;
pub use game::Game;
pub use pot::Pot;
