//! Rule-evaluation core for chess: which moves are legal right now, and
//! what the overall game status is.
//!
//! Game states are immutable snapshots. Every move is a [`Command`] that
//! maps a state to an optional successor state; legality is decided by
//! applying candidate commands speculatively and discarding any result
//! that leaves the mover's own king attacked.

pub mod attacks;
pub mod board;
pub mod command;
pub mod movegen;
pub mod rulebook;
pub mod setup;
pub mod types;

pub use attacks::*;
pub use board::*;
pub use command::*;
pub use movegen::*;
pub use rulebook::*;
pub use setup::*;
pub use types::*;
