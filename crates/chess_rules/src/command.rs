use crate::board::{GameState, Occupancy, Update};
use crate::types::{Piece, PieceKind, Pos};

/// A side-effect-free state transformer. Applying a command either yields
/// the successor state or nothing at all; `None` means the transformation
/// is not applicable, never that something went wrong halfway.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Move the piece on `from` to `to`, capturing whatever stands there.
    Relocate { from: Pos, to: Pos },
    /// Clear an occupied square (the en-passant victim).
    Remove { at: Pos },
    /// Rewrite the pawn on `at` as another piece kind.
    Promote { at: Pos, kind: PieceKind },
    /// Swap the active and passive roles.
    EndTurn,
    /// Stamp the state's last-update field with the given command and a
    /// snapshot of the state being stamped.
    Record(Box<Command>),
    /// Both steps, in order; fails as a whole if either step fails.
    Sequence(Box<Command>, Box<Command>),
}

impl Command {
    pub fn relocate(from: Pos, to: Pos) -> Command {
        Command::Relocate { from, to }
    }

    pub fn then(self, next: Command) -> Command {
        Command::Sequence(Box::new(self), Box::new(next))
    }

    pub fn apply(&self, state: &GameState) -> Option<GameState> {
        match self {
            Command::Relocate { from, to } => {
                let piece = state.board().piece_at(*from)?;
                if let Occupancy::Friend(_) = state.board().occupancy(*to, piece.color) {
                    return None;
                }
                let board = state.board().without(*from).with(*to, piece);
                Some(state.with_board(board))
            }
            Command::Remove { at } => {
                state.board().piece_at(*at)?;
                Some(state.with_board(state.board().without(*at)))
            }
            Command::Promote { at, kind } => {
                let pawn = state.board().piece_at(*at)?;
                if pawn.kind != PieceKind::Pawn {
                    return None;
                }
                let board = state.board().with(
                    *at,
                    Piece {
                        color: pawn.color,
                        kind: *kind,
                    },
                );
                Some(state.with_board(board))
            }
            Command::EndTurn => Some(state.with_turn_passed()),
            Command::Record(command) => {
                let record = Update {
                    state: state.clone(),
                    command: (**command).clone(),
                };
                Some(state.with_last_update(record))
            }
            Command::Sequence(first, second) => {
                first.apply(state).and_then(|next| second.apply(&next))
            }
        }
    }

    /// The first relocation in application order. For a castle that is
    /// the king's step, for everything else the moving piece itself.
    pub fn main_move(&self) -> Option<(Pos, Pos)> {
        match self {
            Command::Relocate { from, to } => Some((*from, *to)),
            Command::Record(command) => command.main_move(),
            Command::Sequence(first, second) => {
                first.main_move().or_else(|| second.main_move())
            }
            _ => None,
        }
    }

    /// Whether any step of this command disturbs the given square.
    pub fn touches(&self, pos: Pos) -> bool {
        match self {
            Command::Relocate { from, to } => *from == pos || *to == pos,
            Command::Remove { at } => *at == pos,
            Command::Record(command) => command.touches(pos),
            Command::Sequence(first, second) => first.touches(pos) || second.touches(pos),
            _ => false,
        }
    }
}

#[cfg(test)]
#[path = "command_tests.rs"]
mod command_tests;
