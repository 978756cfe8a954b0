use crate::attacks;
use crate::board::{Board, GameState, Update};
use crate::command::Command;
use crate::movegen;
use crate::setup;
use crate::types::{PieceKind, PlacedPiece, Pos};

/// Overall classification of a game state. Derived on demand, never
/// stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    Ongoing,
    Check,
    Checkmate,
    Stalemate,
    Draw,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SetupPolicy {
    Standard,
    Reduced,
    Shuffled,
}

pub fn create_game(policy: SetupPolicy) -> GameState {
    match policy {
        SetupPolicy::Standard => setup::standard(),
        SetupPolicy::Reduced => setup::reduced(),
        SetupPolicy::Shuffled => setup::shuffled(),
    }
}

/// Every legal update available to the active player from `from`.
///
/// An empty square or an opponent's piece yields an empty sequence; that
/// is an answer, not an error. Each pseudo-legal command is extended with
/// a turn end and a record of itself, applied speculatively, and kept
/// only if it applies cleanly and does not leave the mover's own king
/// attacked.
pub fn legal_updates(state: &GameState, from: Pos) -> Vec<Update> {
    let mut out = Vec::new();
    let piece = match state.board().piece_at(from) {
        Some(pc) if pc.color == state.active() => pc,
        _ => return out,
    };
    for command in movegen::piece_commands(state, PlacedPiece { pos: from, piece }) {
        let played = command.then(Command::EndTurn);
        let full = played.clone().then(Command::Record(Box::new(played)));
        let Some(next) = full.apply(state) else {
            continue;
        };
        // The mover is the passive player once the turn has passed.
        if attacks::in_check(&next, next.passive()) {
            continue;
        }
        out.push(Update {
            state: next,
            command: full,
        });
    }
    out
}

/// Classify a game state by combining the check rule with the existence
/// of a legal move, plus the draw policies.
pub fn game_status(state: &GameState) -> Status {
    let in_check = attacks::in_check(state, state.active());
    let has_move = has_any_move(state);
    if has_move && is_draw(state) {
        return Status::Draw;
    }
    classify(in_check, has_move)
}

/// The end rule's four-way table.
pub fn classify(in_check: bool, has_move: bool) -> Status {
    match (in_check, has_move) {
        (false, true) => Status::Ongoing,
        (true, true) => Status::Check,
        (true, false) => Status::Checkmate,
        (false, false) => Status::Stalemate,
    }
}

fn has_any_move(state: &GameState) -> bool {
    state
        .board()
        .pieces_of(state.active())
        .any(|pp| !legal_updates(state, pp.pos).is_empty())
}

fn is_draw(state: &GameState) -> bool {
    insufficient_material(state.board()) || threefold_repetition(state)
}

/// Neither side can force mate: bare kings, a lone minor piece, or a
/// single bishop each on the same square shade.
fn insufficient_material(board: &Board) -> bool {
    let mut minors = Vec::new();
    for pp in board.pieces() {
        match pp.piece.kind {
            PieceKind::King => {}
            PieceKind::Bishop | PieceKind::Knight => minors.push(pp),
            // A pawn, rook or queen can still deliver mate.
            _ => return false,
        }
    }
    match minors.as_slice() {
        [] | [_] => true,
        [a, b] => {
            a.piece.kind == PieceKind::Bishop
                && b.piece.kind == PieceKind::Bishop
                && a.piece.color != b.piece.color
                && a.pos.is_dark() == b.pos.is_dark()
        }
        _ => false,
    }
}

/// The current position has occurred three times. Each recorded update
/// snapshots one ply's position, with the newest matching the state
/// itself, so counting matches along the history chain counts
/// occurrences of the position.
fn threefold_repetition(state: &GameState) -> bool {
    let occurrences = state
        .history()
        .filter(|u| u.state.board() == state.board() && u.state.active() == state.active())
        .count();
    occurrences >= 3
}

#[cfg(test)]
#[path = "rulebook_tests.rs"]
mod rulebook_tests;
