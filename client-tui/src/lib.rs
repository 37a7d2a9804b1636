//! Interaction and synchronization layer of the ChessLink terminal client.
//!
//! [`sync::SyncController`] mirrors the authority's game state, turns local
//! input into authority requests and sequences confirmed moves through the
//! slide animation before committing them. The `ui` module draws it.

pub mod animation;
pub mod config;
pub mod move_log;
pub mod scene;
pub mod selection;
pub mod state;
pub mod sync;
pub mod ui;

pub use animation::{AnimationSequencer, SequencerState};
pub use config::TimingConfig;
pub use move_log::MoveLog;
pub use scene::{CellView, Overlay, Scene, Sprite};
pub use selection::{Activation, SelectionController, SelectionState};
pub use state::MatchState;
pub use sync::{SyncController, SyncPhase};
