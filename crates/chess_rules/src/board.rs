use std::collections::BTreeMap;
use std::sync::Arc;

use crate::command::Command;
use crate::types::{Color, Piece, PieceKind, PlacedPiece, Pos};

/// What a side finds when it looks at a square.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Occupancy {
    Empty,
    Friend(Piece),
    Foe(Piece),
}

/// An immutable mapping from square to occupying piece. Every operation
/// that "changes" a board returns a fresh one; the receiver is never
/// touched, so old game states stay valid.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Board {
    squares: BTreeMap<Pos, Piece>,
}

impl Board {
    pub fn empty() -> Board {
        Board::default()
    }

    pub fn piece_at(&self, pos: Pos) -> Option<Piece> {
        self.squares.get(&pos).copied()
    }

    pub fn occupancy(&self, pos: Pos, side: Color) -> Occupancy {
        match self.piece_at(pos) {
            None => Occupancy::Empty,
            Some(pc) if pc.color == side => Occupancy::Friend(pc),
            Some(pc) => Occupancy::Foe(pc),
        }
    }

    pub fn with(&self, pos: Pos, piece: Piece) -> Board {
        let mut squares = self.squares.clone();
        squares.insert(pos, piece);
        Board { squares }
    }

    pub fn without(&self, pos: Pos) -> Board {
        let mut squares = self.squares.clone();
        squares.remove(&pos);
        Board { squares }
    }

    /// All placed pieces in row-major square order.
    pub fn pieces(&self) -> impl Iterator<Item = PlacedPiece> + '_ {
        self.squares
            .iter()
            .map(|(&pos, &piece)| PlacedPiece { pos, piece })
    }

    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = PlacedPiece> + '_ {
        self.pieces().filter(move |pp| pp.piece.color == color)
    }

    pub fn king_pos(&self, color: Color) -> Option<Pos> {
        self.pieces()
            .find(|pp| pp.piece.color == color && pp.piece.kind == PieceKind::King)
            .map(|pp| pp.pos)
    }

    pub fn piece_count(&self) -> usize {
        self.squares.len()
    }
}

impl FromIterator<PlacedPiece> for Board {
    fn from_iter<I: IntoIterator<Item = PlacedPiece>>(iter: I) -> Board {
        let mut squares = BTreeMap::new();
        for pp in iter {
            let clash = squares.insert(pp.pos, pp.piece);
            assert!(clash.is_none(), "two pieces placed on {}", pp.pos);
        }
        Board { squares }
    }
}

/// A move that has been (or could be) played: the command together with
/// the state it produced.
#[derive(Clone, Debug)]
pub struct Update {
    pub state: GameState,
    pub command: Command,
}

/// An immutable snapshot of a game: the board, whose turn it is, and the
/// most recently recorded update. New snapshots are produced only by
/// applying a [`Command`]; the previous snapshot is never modified.
#[derive(Clone, Debug)]
pub struct GameState {
    board: Board,
    active: Color,
    last_update: Option<Arc<Update>>,
}

impl GameState {
    pub fn new(board: Board, active: Color) -> GameState {
        GameState {
            board,
            active,
            last_update: None,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The player to move.
    pub fn active(&self) -> Color {
        self.active
    }

    /// The player waiting; roles swap every ply.
    pub fn passive(&self) -> Color {
        self.active.other()
    }

    pub fn last_update(&self) -> Option<&Update> {
        self.last_update.as_deref()
    }

    /// Walks the recorded updates newest-first. The chain is shared
    /// between snapshots, so cloning a state does not copy the past.
    pub fn history(&self) -> impl Iterator<Item = &Update> {
        std::iter::successors(self.last_update.as_deref(), |u| {
            u.state.last_update.as_deref()
        })
    }

    pub(crate) fn with_board(&self, board: Board) -> GameState {
        GameState {
            board,
            active: self.active,
            last_update: self.last_update.clone(),
        }
    }

    pub(crate) fn with_turn_passed(&self) -> GameState {
        GameState {
            board: self.board.clone(),
            active: self.active.other(),
            last_update: self.last_update.clone(),
        }
    }

    pub(crate) fn with_last_update(&self, update: Update) -> GameState {
        GameState {
            board: self.board.clone(),
            active: self.active,
            last_update: Some(Arc::new(update)),
        }
    }
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod board_tests;
