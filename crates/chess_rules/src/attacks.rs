use crate::board::{Board, GameState};
use crate::types::{Color, PieceKind, Pos};

/// Is `target` attacked by any piece of `by` on this board?
pub fn square_attacked(board: &Board, target: Pos, by: Color) -> bool {
    // Pawn attacks: an attacking pawn stands one step behind the target,
    // one file to either side.
    for d_col in [-1, 1] {
        if let Some(p) = target.offset(-by.forward(), d_col)
            && let Some(pc) = board.piece_at(p)
            && pc.color == by
            && pc.kind == PieceKind::Pawn
        {
            return true;
        }
    }

    // Knight leaps
    let knight = [
        (1, 2),
        (2, 1),
        (-1, 2),
        (-2, 1),
        (1, -2),
        (2, -1),
        (-1, -2),
        (-2, -1),
    ];
    for (d_row, d_col) in knight {
        if let Some(p) = target.offset(d_row, d_col)
            && let Some(pc) = board.piece_at(p)
            && pc.color == by
            && pc.kind == PieceKind::Knight
        {
            return true;
        }
    }

    // King adjacency
    let king = [
        (1, 1),
        (1, 0),
        (1, -1),
        (0, 1),
        (0, -1),
        (-1, 1),
        (-1, 0),
        (-1, -1),
    ];
    for (d_row, d_col) in king {
        if let Some(p) = target.offset(d_row, d_col)
            && let Some(pc) = board.piece_at(p)
            && pc.color == by
            && pc.kind == PieceKind::King
        {
            return true;
        }
    }

    // Sliding: bishop/rook/queen rays, cut off by the first blocker.
    let diag = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
    let ortho = [(1, 0), (-1, 0), (0, 1), (0, -1)];

    for (d_row, d_col) in diag {
        let mut step = target.offset(d_row, d_col);
        while let Some(p) = step {
            if let Some(pc) = board.piece_at(p) {
                if pc.color == by
                    && (pc.kind == PieceKind::Bishop || pc.kind == PieceKind::Queen)
                {
                    return true;
                }
                break;
            }
            step = p.offset(d_row, d_col);
        }
    }
    for (d_row, d_col) in ortho {
        let mut step = target.offset(d_row, d_col);
        while let Some(p) = step {
            if let Some(pc) = board.piece_at(p) {
                if pc.color == by && (pc.kind == PieceKind::Rook || pc.kind == PieceKind::Queen) {
                    return true;
                }
                break;
            }
            step = p.offset(d_row, d_col);
        }
    }

    false
}

/// Is this player's king attacked right now? A side with no king on the
/// board is never in check.
pub fn in_check(state: &GameState, player: Color) -> bool {
    let Some(king) = state.board().king_pos(player) else {
        return false;
    };
    square_attacked(state.board(), king, player.other())
}

#[cfg(test)]
#[path = "attacks_tests.rs"]
mod attacks_tests;
