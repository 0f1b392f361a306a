//! Property tests for move generation and move application over random boards

use proptest::prelude::*;
use xiangqi_core::{legal_moves, Board, Coord, Game, Piece, PieceKind, Side};

// ============================================================================
// STRATEGIES
// ============================================================================

fn arb_piece() -> impl Strategy<Value = Piece> {
    (any::<bool>(), 0..PieceKind::ALL.len()).prop_map(|(red, kind)| {
        let side = if red { Side::Red } else { Side::Black };
        Piece::new(side, PieceKind::ALL[kind])
    })
}

fn arb_coord() -> impl Strategy<Value = Coord> {
    (0i8..9, 0i8..10).prop_map(|(col, row)| Coord::new(col, row))
}

fn arb_board() -> impl Strategy<Value = Board> {
    prop::collection::vec((arb_coord(), arb_piece()), 0..32)
        .prop_map(|placements| Board::from_pieces(&placements))
}

// ============================================================================
// PROPERTIES
// ============================================================================

proptest! {
    #[test]
    fn never_lands_on_own_piece(board in arb_board()) {
        for (at, piece) in board.pieces() {
            for to in legal_moves(piece, at, &board) {
                prop_assert!(to.is_valid(), "{} at {} reached {}", piece, at, to);
                prop_assert_ne!(to, at);
                if let Some(occupant) = board.get(to) {
                    prop_assert_ne!(occupant.side, piece.side);
                }
            }
        }
    }

    #[test]
    fn turn_alternates_only_on_success(
        board in arb_board(),
        from in arb_coord(),
        to in arb_coord(),
        red_to_move in any::<bool>(),
    ) {
        let turn = if red_to_move { Side::Red } else { Side::Black };
        let mut game = Game::from_board(board, turn);
        let before = game.clone();

        match game.apply_move(from, to) {
            Some(step) => {
                prop_assert_eq!(game.turn, turn.opponent());
                prop_assert_eq!(game.board.get(to), Some(step.piece));
                prop_assert_eq!(game.board.get(from), None);
                let captured = game.red_captured.len() + game.black_captured.len();
                prop_assert_eq!(captured, usize::from(step.captured.is_some()));
            }
            None => {
                prop_assert_eq!(game, before);
            }
        }
    }

    #[test]
    fn captures_go_to_the_mover(board in arb_board()) {
        let game = Game::from_board(board, Side::Red);
        for (at, piece) in game.board.pieces() {
            for to in legal_moves(piece, at, &game.board) {
                let Some(target) = game.board.get(to) else { continue };
                let mut after = game.clone();
                after.apply_move(at, to).expect("generated move applies");
                prop_assert_eq!(after.captured_by(piece.side), &[target][..]);
                prop_assert!(after.captured_by(piece.side.opponent()).is_empty());
            }
        }
    }
}
