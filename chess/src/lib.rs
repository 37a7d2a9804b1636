//! Board model and move notation shared by the ChessLink client crates.
//!
//! Nothing in here performs I/O or knows the rules of chess: positions and
//! moves arrive already validated from the game authority.

pub mod board;
pub mod moves;
pub mod notation;
pub mod types;

pub use board::Board;
pub use moves::MoveDescriptor;
pub use notation::{notate, NotationToken};
pub use types::{ParseError, Piece, PieceColor, PieceKind, Square};
