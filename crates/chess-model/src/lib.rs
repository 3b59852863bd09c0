//! Value types for the chess rules engine.
//!
//! This crate provides the vocabulary shared by the engine and its callers:
//! - [`Color`] for the two players
//! - [`Square`], [`File`], and [`Rank`] for board coordinates
//! - [`Role`] for the six piece kinds
//! - [`Move`] for a proposed source/target pair
//!
//! Everything here is a small immutable value with structural equality. Board
//! bounds are part of the types themselves: a [`Square`] can only name one of
//! the 64 squares, so off-board coordinates are unrepresentable rather than
//! checked at use sites.

mod color;
mod mov;
mod role;
mod square;

pub use color::Color;
pub use mov::Move;
pub use role::Role;
pub use square::{File, Rank, Square};
