use rand::Rng;

use crate::board::GameState;
use crate::types::{Color, Piece, PieceKind, PlacedPiece, Pos};

const STANDARD_BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

const KING_COLUMN: usize = 4;

/// The regular starting position, white to move.
pub fn standard() -> GameState {
    game_from_back_rank(STANDARD_BACK_RANK)
}

/// A deliberately asymmetric variant layout: white fields rooks, bishops
/// and queen but no knights; black fields rooks and knights but neither
/// bishops nor queen. Both sides keep a full pawn rank.
pub fn reduced() -> GameState {
    const WHITE_BACK: [(i8, PieceKind); 6] = [
        (0, PieceKind::Rook),
        (2, PieceKind::Bishop),
        (3, PieceKind::Queen),
        (4, PieceKind::King),
        (5, PieceKind::Bishop),
        (7, PieceKind::Rook),
    ];
    const BLACK_BACK: [(i8, PieceKind); 5] = [
        (0, PieceKind::Rook),
        (1, PieceKind::Knight),
        (4, PieceKind::King),
        (6, PieceKind::Knight),
        (7, PieceKind::Rook),
    ];

    let mut pieces = Vec::new();
    for (col, kind) in WHITE_BACK {
        pieces.push(place(Color::White.back_rank(), col, Color::White, kind));
    }
    for (col, kind) in BLACK_BACK {
        pieces.push(place(Color::Black.back_rank(), col, Color::Black, kind));
    }
    for col in 0..8 {
        pieces.push(place(Color::White.pawn_rank(), col, Color::White, PieceKind::Pawn));
        pieces.push(place(Color::Black.pawn_rank(), col, Color::Black, PieceKind::Pawn));
    }
    GameState::new(pieces.into_iter().collect(), Color::White)
}

/// A game from a freshly shuffled back rank, applied to both colors.
pub fn shuffled() -> GameState {
    shuffled_with(&mut rand::thread_rng())
}

pub fn shuffled_with<R: Rng>(rng: &mut R) -> GameState {
    game_from_back_rank(shuffled_back_rank(rng))
}

/// Draws a randomized back rank: king fixed on its home column, one rook
/// on each side of it, one bishop per square shade, and knights and queen
/// rejection-sampled onto the remaining columns.
pub fn shuffled_back_rank<R: Rng>(rng: &mut R) -> [PieceKind; 8] {
    let mut rank: [Option<PieceKind>; 8] = [None; 8];
    rank[KING_COLUMN] = Some(PieceKind::King);

    // One rook from the columns below the king, one from above.
    rank[rng.gen_range(0..KING_COLUMN)] = Some(PieceKind::Rook);
    rank[rng.gen_range(KING_COLUMN + 1..8)] = Some(PieceKind::Rook);

    // Even and odd columns of a rank lie on opposite shades, so one
    // bishop on each parity keeps the pair on opposite-colored squares.
    draw_free_column(rng, &mut rank, PieceKind::Bishop, |col| col % 2 == 0);
    draw_free_column(rng, &mut rank, PieceKind::Bishop, |col| col % 2 == 1);

    draw_free_column(rng, &mut rank, PieceKind::Knight, |_| true);
    draw_free_column(rng, &mut rank, PieceKind::Knight, |_| true);
    draw_free_column(rng, &mut rank, PieceKind::Queen, |_| true);

    rank.map(|kind| kind.expect("every column filled"))
}

/// Rejection-samples a column for `kind`: draw uniformly, retry while the
/// column is taken or disallowed. The up-front assert guards the loop
/// against an empty domain, which the fixed placement order never
/// produces (at most two same-parity columns are occupied when the first
/// bishop is drawn).
fn draw_free_column<R: Rng>(
    rng: &mut R,
    rank: &mut [Option<PieceKind>; 8],
    kind: PieceKind,
    allowed: impl Fn(usize) -> bool,
) {
    assert!(
        (0..8).any(|col| rank[col].is_none() && allowed(col)),
        "no free column left for {kind:?}"
    );
    loop {
        let col = rng.gen_range(0..8);
        if rank[col].is_none() && allowed(col) {
            rank[col] = Some(kind);
            return;
        }
    }
}

fn game_from_back_rank(back_rank: [PieceKind; 8]) -> GameState {
    let mut pieces = Vec::with_capacity(32);
    for color in [Color::White, Color::Black] {
        for (col, kind) in back_rank.into_iter().enumerate() {
            pieces.push(place(color.back_rank(), col as i8, color, kind));
        }
        for col in 0..8 {
            pieces.push(place(color.pawn_rank(), col, color, PieceKind::Pawn));
        }
    }
    GameState::new(pieces.into_iter().collect(), Color::White)
}

fn place(row: i8, col: i8, color: Color, kind: PieceKind) -> PlacedPiece {
    PlacedPiece {
        pos: Pos::new(row, col).expect("rank squares are on the board"),
        piece: Piece { color, kind },
    }
}

#[cfg(test)]
#[path = "setup_tests.rs"]
mod setup_tests;
