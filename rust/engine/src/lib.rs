//! # klondike-engine: Klondike Solitaire Rules Engine
//!
//! The rules and turn state machine of a Klondike Solitaire game driven by a
//! four-button input device: card model, seeded shuffle and deal, move legality and
//! execution, stock/talon cycling, the pile-selection cursor and a fixed 82-byte
//! save format.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card representation (Suit, Rank, Card) and the render-side `CardFace`
//! - [`deck`] - LCG generator and the deterministic shuffle
//! - [`piles`] - Tableau piles, stock/talon and foundations with checked capacities
//! - [`game`] - The `GameState` aggregate, pile ids, cursor and the deal
//! - [`rules`] - Move legality predicates
//! - [`moves`] - Move execution, auto-sweep and stock draws
//! - [`cursor`] - Source/destination pile selection
//! - [`engine`] - Command dispatch, settings mutators and host collaborators
//! - [`persist`] - Save format and the `PersistentStore` trait
//! - [`view`] - Read-only board snapshot for rendering
//! - [`settings`] - Draw mode, flip limit and score visibility
//! - [`errors`] - Error types
//!
//! ## Quick Start
//!
//! ```rust
//! use klondike_engine::engine::{Command, Engine, FixedClock};
//! use klondike_engine::persist::MemoryStore;
//! use klondike_engine::settings::Settings;
//!
//! let mut store = MemoryStore::new();
//! let mut engine = Engine::load_or_deal(&store, Settings::default(), &FixedClock(42));
//!
//! engine.apply(Command::DrawOrCancel);
//! engine.apply(Command::AutoSweep);
//! engine.save(&mut store).expect("save");
//!
//! let resumed = Engine::load_or_deal(&store, Settings::default(), &FixedClock(7));
//! assert_eq!(resumed.state().stock(), engine.state().stock());
//! ```
//!
//! ## Deterministic Deals
//!
//! ```rust
//! use klondike_engine::deck::Deck;
//!
//! let a = Deck::new_with_seed(1);
//! let b = Deck::new_with_seed(1);
//! assert_eq!(a.cards(), b.cards());
//! ```

pub mod cards;
pub mod cursor;
pub mod deck;
pub mod engine;
pub mod errors;
pub mod game;
pub mod moves;
pub mod persist;
pub mod piles;
pub mod rules;
pub mod settings;
pub mod view;
