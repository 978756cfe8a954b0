//! Full games driven exclusively through the rulebook: every ply is
//! picked out of `legal_updates`, so these exercise generation,
//! composition, application and filtering together.

use chess_rules::*;

fn p(row: i8, col: i8) -> Pos {
    Pos::new(row, col).unwrap()
}

/// Plays the move from `from` to `to`, which must be legal.
fn play(state: &GameState, from: Pos, to: Pos) -> GameState {
    legal_updates(state, from)
        .into_iter()
        .find(|u| u.command.main_move() == Some((from, to)))
        .unwrap_or_else(|| panic!("no legal move {from} -> {to}"))
        .state
}

#[test]
fn fools_mate_played_out() {
    let state = create_game(SetupPolicy::Standard);

    let state = play(&state, p(1, 5), p(2, 5)); // 1. f3
    let state = play(&state, p(6, 4), p(4, 4)); // 1... e5
    let state = play(&state, p(1, 6), p(3, 6)); // 2. g4
    assert_eq!(game_status(&state), Status::Ongoing);

    let state = play(&state, p(7, 3), p(3, 7)); // 2... Qh4#
    assert_eq!(state.active(), Color::White);
    assert_eq!(game_status(&state), Status::Checkmate);
}

#[test]
fn en_passant_capture_played_out() {
    let state = create_game(SetupPolicy::Standard);

    let state = play(&state, p(1, 4), p(3, 4)); // 1. e4
    let state = play(&state, p(6, 0), p(5, 0)); // 1... a6
    let state = play(&state, p(3, 4), p(4, 4)); // 2. e5
    let state = play(&state, p(6, 3), p(4, 3)); // 2... d5
    let state = play(&state, p(4, 4), p(5, 3)); // 3. exd6 e.p.

    assert!(
        state.board().piece_at(p(4, 3)).is_none(),
        "the double-stepper is captured off its own square"
    );
    let pawn = state.board().piece_at(p(5, 3)).unwrap();
    assert_eq!(pawn.color, Color::White);
    assert_eq!(pawn.kind, PieceKind::Pawn);
    assert_eq!(state.active(), Color::Black);
}

#[test]
fn en_passant_window_closes_after_one_ply() {
    let state = create_game(SetupPolicy::Standard);

    let state = play(&state, p(1, 4), p(3, 4)); // 1. e4
    let state = play(&state, p(6, 0), p(5, 0)); // 1... a6
    let state = play(&state, p(3, 4), p(4, 4)); // 2. e5
    let state = play(&state, p(6, 3), p(4, 3)); // 2... d5

    // the capture is on the table right now
    assert!(
        legal_updates(&state, p(4, 4))
            .iter()
            .any(|u| u.command.main_move() == Some((p(4, 4), p(5, 3))))
    );

    // but waiting a move forfeits it
    let state = play(&state, p(1, 0), p(2, 0)); // 3. a3
    let state = play(&state, p(6, 1), p(5, 1)); // 3... b6
    assert!(
        !legal_updates(&state, p(4, 4))
            .iter()
            .any(|u| u.command.main_move() == Some((p(4, 4), p(5, 3))))
    );
}

#[test]
fn both_sides_castle_short() {
    let state = create_game(SetupPolicy::Standard);

    let state = play(&state, p(0, 6), p(2, 5)); // 1. Nf3
    let state = play(&state, p(7, 6), p(5, 5)); // 1... Nf6
    let state = play(&state, p(1, 6), p(2, 6)); // 2. g3
    let state = play(&state, p(6, 6), p(5, 6)); // 2... g6
    let state = play(&state, p(0, 5), p(1, 6)); // 3. Bg2
    let state = play(&state, p(7, 5), p(6, 6)); // 3... Bg7

    let state = play(&state, p(0, 4), p(0, 6)); // 4. O-O
    assert_eq!(state.board().piece_at(p(0, 6)).unwrap().kind, PieceKind::King);
    assert_eq!(state.board().piece_at(p(0, 5)).unwrap().kind, PieceKind::Rook);
    assert!(state.board().piece_at(p(0, 7)).is_none());

    let state = play(&state, p(7, 4), p(7, 6)); // 4... O-O
    assert_eq!(state.board().piece_at(p(7, 6)).unwrap().kind, PieceKind::King);
    assert_eq!(state.board().piece_at(p(7, 5)).unwrap().kind, PieceKind::Rook);
    assert!(state.board().piece_at(p(7, 7)).is_none());
}

#[test]
fn a_king_trip_forfeits_castling() {
    let state = create_game(SetupPolicy::Standard);

    let state = play(&state, p(0, 6), p(2, 5)); // 1. Nf3
    let state = play(&state, p(7, 6), p(5, 5)); // 1... Nf6
    let state = play(&state, p(1, 6), p(2, 6)); // 2. g3
    let state = play(&state, p(6, 6), p(5, 6)); // 2... g6
    let state = play(&state, p(0, 5), p(1, 6)); // 3. Bg2
    let state = play(&state, p(7, 5), p(6, 6)); // 3... Bg7

    // the king steps out and back, losing the right to castle
    let state = play(&state, p(0, 4), p(0, 5)); // 4. Kf1
    let state = play(&state, p(6, 3), p(5, 3)); // 4... d6
    let state = play(&state, p(0, 5), p(0, 4)); // 5. Ke1
    let state = play(&state, p(5, 3), p(4, 3)); // 5... d5

    assert!(
        !legal_updates(&state, p(0, 4))
            .iter()
            .any(|u| u.command.main_move() == Some((p(0, 4), p(0, 6))))
    );
}

#[test]
fn shuffling_knights_back_and_forth_draws_by_repetition() {
    let mut state = create_game(SetupPolicy::Standard);

    // each round restores the starting position
    for _ in 0..2 {
        state = play(&state, p(0, 6), p(2, 5)); // Nf3
        state = play(&state, p(7, 6), p(5, 5)); // Nf6
        state = play(&state, p(2, 5), p(0, 6)); // Ng1
        state = play(&state, p(5, 5), p(7, 6)); // Ng8
    }
    // two recorded recurrences are not yet a draw
    assert_eq!(game_status(&state), Status::Ongoing);

    state = play(&state, p(0, 6), p(2, 5));
    state = play(&state, p(7, 6), p(5, 5));
    state = play(&state, p(2, 5), p(0, 6));
    state = play(&state, p(5, 5), p(7, 6));
    // the third recurrence ends the game
    assert_eq!(game_status(&state), Status::Draw);
}

#[test]
fn every_played_update_keeps_the_mover_safe() {
    // a handful of plies from the standard start; after each one, the
    // player who just moved must not be left in check
    let mut state = create_game(SetupPolicy::Standard);
    let moves = [
        (p(1, 4), p(3, 4)),
        (p(6, 4), p(4, 4)),
        (p(0, 6), p(2, 5)),
        (p(7, 1), p(5, 2)),
        (p(0, 5), p(3, 2)),
        (p(7, 6), p(5, 5)),
    ];
    for (from, to) in moves {
        state = play(&state, from, to);
        assert!(!in_check(&state, state.passive()));
    }
}
