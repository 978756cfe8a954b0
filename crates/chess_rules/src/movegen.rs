use crate::attacks;
use crate::board::{GameState, Occupancy};
use crate::command::Command;
use crate::types::{Color, PieceKind, PlacedPiece, Pos};

/// Every pseudo-legal command for one placed piece: plain geometry plus
/// whichever special moves (castle, en passant, promotion) currently have
/// their preconditions met. Whether a command leaves the mover's own king
/// attacked is not considered here; that filter belongs to the rulebook.
pub fn piece_commands(state: &GameState, placed: PlacedPiece) -> Vec<Command> {
    let mut out = Vec::new();
    let PlacedPiece { pos, piece } = placed;
    match piece.kind {
        PieceKind::Pawn => gen_pawn(state, pos, piece.color, &mut out),
        PieceKind::Knight => {
            let deltas = [
                (1, 2),
                (2, 1),
                (-1, 2),
                (-2, 1),
                (1, -2),
                (2, -1),
                (-1, -2),
                (-2, -1),
            ];
            gen_leaper(state, pos, piece.color, &deltas, &mut out);
        }
        PieceKind::Bishop => gen_slider(
            state,
            pos,
            piece.color,
            &[(1, 1), (1, -1), (-1, 1), (-1, -1)],
            &mut out,
        ),
        PieceKind::Rook => gen_slider(
            state,
            pos,
            piece.color,
            &[(1, 0), (-1, 0), (0, 1), (0, -1)],
            &mut out,
        ),
        PieceKind::Queen => gen_slider(
            state,
            pos,
            piece.color,
            &[
                (1, 1),
                (1, -1),
                (-1, 1),
                (-1, -1),
                (1, 0),
                (-1, 0),
                (0, 1),
                (0, -1),
            ],
            &mut out,
        ),
        PieceKind::King => {
            let deltas = [
                (1, 1),
                (1, 0),
                (1, -1),
                (0, 1),
                (0, -1),
                (-1, 1),
                (-1, 0),
                (-1, -1),
            ];
            gen_leaper(state, pos, piece.color, &deltas, &mut out);
            gen_castle(state, pos, piece.color, &mut out);
        }
    }
    out
}

fn gen_pawn(state: &GameState, from: Pos, color: Color, out: &mut Vec<Command>) {
    let dir = color.forward();

    // forward 1, and forward 2 from the pawn rank
    if let Some(to) = from.offset(dir, 0)
        && state.board().piece_at(to).is_none()
    {
        push_pawn_step(from, to, color, out);

        if from.row() == color.pawn_rank()
            && let Some(to2) = from.offset(2 * dir, 0)
            && state.board().piece_at(to2).is_none()
        {
            out.push(Command::relocate(from, to2));
        }
    }

    // diagonal captures
    for d_col in [-1, 1] {
        if let Some(to) = from.offset(dir, d_col)
            && let Occupancy::Foe(_) = state.board().occupancy(to, color)
        {
            push_pawn_step(from, to, color, out);
        }
    }

    gen_en_passant(state, from, color, out);
}

/// A pawn step onto the promotion rank fans out into one command per
/// promotion kind; anywhere else it is a plain relocation.
fn push_pawn_step(from: Pos, to: Pos, color: Color, out: &mut Vec<Command>) {
    if to.row() == color.promotion_rank() {
        for kind in [
            PieceKind::Queen,
            PieceKind::Rook,
            PieceKind::Bishop,
            PieceKind::Knight,
        ] {
            out.push(Command::relocate(from, to).then(Command::Promote { at: to, kind }));
        }
    } else {
        out.push(Command::relocate(from, to));
    }
}

fn gen_en_passant(state: &GameState, from: Pos, color: Color, out: &mut Vec<Command>) {
    let Some(update) = state.last_update() else {
        return;
    };
    let Some((prev_from, prev_to)) = update.command.main_move() else {
        return;
    };
    let Some(victim) = state.board().piece_at(prev_to) else {
        return;
    };
    if victim.color == color || victim.kind != PieceKind::Pawn {
        return;
    }
    // Only a double step that landed right beside this pawn qualifies.
    if (prev_from.row() - prev_to.row()).abs() != 2 || prev_from.col() != prev_to.col() {
        return;
    }
    if prev_to.row() != from.row() || (prev_to.col() - from.col()).abs() != 1 {
        return;
    }
    if let Some(to) = from.offset(color.forward(), prev_to.col() - from.col()) {
        out.push(Command::relocate(from, to).then(Command::Remove { at: prev_to }));
    }
}

fn gen_leaper(
    state: &GameState,
    from: Pos,
    color: Color,
    deltas: &[(i8, i8)],
    out: &mut Vec<Command>,
) {
    for &(d_row, d_col) in deltas {
        if let Some(to) = from.offset(d_row, d_col) {
            match state.board().occupancy(to, color) {
                Occupancy::Friend(_) => {}
                _ => out.push(Command::relocate(from, to)),
            }
        }
    }
}

fn gen_slider(
    state: &GameState,
    from: Pos,
    color: Color,
    dirs: &[(i8, i8)],
    out: &mut Vec<Command>,
) {
    for &(d_row, d_col) in dirs {
        let mut step = from.offset(d_row, d_col);
        while let Some(to) = step {
            match state.board().occupancy(to, color) {
                Occupancy::Empty => out.push(Command::relocate(from, to)),
                Occupancy::Foe(_) => {
                    out.push(Command::relocate(from, to));
                    break;
                }
                Occupancy::Friend(_) => break,
            }
            step = to.offset(d_row, d_col);
        }
    }
}

fn gen_castle(state: &GameState, from: Pos, color: Color, out: &mut Vec<Command>) {
    let back = color.back_rank();
    if from.row() != back || from.col() != 4 {
        return;
    }
    if piece_has_moved(state, from) {
        return;
    }
    // Castling out of check is illegal; crossing an attacked square is
    // checked per side below.
    if attacks::in_check(state, color) {
        return;
    }

    let at = |col: i8| Pos::new(back, col).expect("back rank square");

    // (rook column, columns that must be empty, columns the king crosses)
    let sides: [(i8, &[i8], [i8; 2]); 2] = [
        (7, &[5, 6], [5, 6]),    // king side
        (0, &[1, 2, 3], [3, 2]), // queen side
    ];
    for (rook_col, between, crossed) in sides {
        let rook_home = at(rook_col);
        let has_rook = matches!(
            state.board().piece_at(rook_home),
            Some(pc) if pc.color == color && pc.kind == PieceKind::Rook
        );
        if !has_rook || piece_has_moved(state, rook_home) {
            continue;
        }
        if between.iter().any(|&c| state.board().piece_at(at(c)).is_some()) {
            continue;
        }
        if crossed
            .iter()
            .any(|&c| attacks::square_attacked(state.board(), at(c), color.other()))
        {
            continue;
        }
        // The king lands on the far crossed column, the rook just inside.
        out.push(
            Command::relocate(from, at(crossed[1]))
                .then(Command::relocate(rook_home, at(crossed[0]))),
        );
    }
}

/// Has any recorded update disturbed this square? Initial placements are
/// not updates, so an untouched home square means the piece never moved.
fn piece_has_moved(state: &GameState, home: Pos) -> bool {
    state.history().any(|u| u.command.touches(home))
}

#[cfg(test)]
#[path = "movegen_tests.rs"]
mod movegen_tests;
