//! # blackjack-engine: Multiplayer Blackjack Dealer Core
//!
//! A table-side blackjack engine: a multi-deck shoe, hand scoring, a
//! per-table round state machine and the settlement rules that move player
//! credits. Any number of tables run independently behind a fixed registry.
//!
//! ## Core Modules
//!
//! - [`cards`] - The 52-card catalog and card values
//! - [`shoe`] - Multi-deck shoe with cut-point reshuffling
//! - [`hand`] - Blackjack scoring with soft aces
//! - [`table`] - Seats, round state machine and client views
//! - [`rules`] - Precondition checks for table operations
//! - [`settlement`] - Round outcomes and credit deltas
//! - [`player`] - Player records and the directory tables settle against
//! - [`registry`] - The fixed set of lock-protected tables
//! - [`casino`] - Thread-safe request entry points
//! - [`config`] - Startup parameters
//! - [`logger`] - JSONL round history
//! - [`errors`] - Error types
//!
//! ## Quick Start
//!
//! ```rust
//! use blackjack_engine::cards::CardId;
//! use blackjack_engine::hand::score;
//!
//! // Ace of clubs and six of clubs
//! let hand = [CardId::new(0).unwrap(), CardId::new(5).unwrap()];
//! assert_eq!(score(&hand).unwrap(), 17);
//! ```
//!
//! ## Playing a Round
//!
//! ```rust
//! use blackjack_engine::casino::Casino;
//! use blackjack_engine::config::EngineConfig;
//! use blackjack_engine::table::TableState;
//!
//! let casino = Casino::new(EngineConfig { seed: Some(42), ..EngineConfig::default() }).unwrap();
//! let ann = casino.login("ann").unwrap();
//! casino.join_table(ann, 1).unwrap();
//! casino.bet(ann, 10).unwrap();
//! assert_eq!(casino.view_table(1).unwrap().state, TableState::Dealing);
//!
//! let summary = casino.stand(ann, 1).unwrap().expect("round settles");
//! let delta = summary.result_for(ann).unwrap().credit_delta;
//! assert_eq!(casino.player(ann).unwrap().credits, 1000 + delta);
//! ```

pub mod cards;
pub mod casino;
pub mod config;
pub mod errors;
pub mod hand;
pub mod logger;
pub mod player;
pub mod registry;
pub mod rules;
pub mod settlement;
pub mod shoe;
pub mod table;
