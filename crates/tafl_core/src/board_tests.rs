use super::*;

fn empty_with_king() -> Vec<&'static str> {
    vec![
        ".......", ".......", ".......", "...K...", ".......", ".......", ".......",
    ]
}

#[test]
fn test_init_board_matches_layout() {
    let board = Board::new(VariantConfig::brandubh()).unwrap();
    assert_eq!(board.king_square(), Some(Square::new(3, 3)));
    assert_eq!(board.count(Piece::Attacker), 8);
    assert_eq!(board.count(Piece::Defender), 4);
    assert_eq!(board.no_capture_count, 0);
    assert_eq!(board.to_diagram(), VariantConfig::brandubh().layout);
}

#[test]
fn test_init_board_rejects_malformed_config() {
    let mut config = VariantConfig::brandubh();
    config.cols = 0;
    assert!(Board::new(config).is_err());
}

#[test]
fn test_from_diagram() {
    let board = Board::from_diagram(
        VariantConfig::brandubh(),
        &[
            ".......", ".A.....", ".D.....", ".......", ".......", ".......", "...K...",
        ],
    )
    .unwrap();
    assert_eq!(board.piece_at(Square::new(1, 1)), Some(Piece::Attacker));
    assert_eq!(board.piece_at(Square::new(2, 1)), Some(Piece::Defender));
    assert_eq!(board.king_square(), Some(Square::new(6, 3)));
}

#[test]
fn test_from_diagram_rejects_king_on_escape() {
    let result = Board::from_diagram(
        VariantConfig::brandubh(),
        &[
            "K......", ".......", ".......", ".......", ".......", ".......", ".......",
        ],
    );
    assert!(matches!(
        result,
        Err(ConfigError::PieceOnRestricted { piece: Piece::King, .. })
    ));
}

#[test]
fn test_pieces_by_side_row_major() {
    let board = Board::new(VariantConfig::brandubh()).unwrap();
    let defenders: Vec<_> = board.pieces(Side::Defender).map(|(sq, _)| sq).collect();
    assert_eq!(
        defenders,
        vec![
            Square::new(2, 3),
            Square::new(3, 2),
            Square::new(3, 3),
            Square::new(3, 4),
            Square::new(4, 3),
        ]
    );
}

#[test]
fn test_invariants() {
    let mut board = Board::from_diagram(VariantConfig::brandubh(), &empty_with_king()).unwrap();
    assert!(board.check_invariants().is_ok());
    board.set_piece(Square::new(1, 1), Some(Piece::King));
    assert_eq!(board.check_invariants(), Err(InvariantViolation { kings: 2 }));
    board.set_piece(Square::new(1, 1), None);
    board.set_piece(Square::new(3, 3), None);
    assert_eq!(board.check_invariants(), Err(InvariantViolation { kings: 0 }));
}

#[test]
fn test_position_key_depends_on_side_and_cells() {
    let board = Board::new(VariantConfig::brandubh()).unwrap();
    let mut other = board.clone();
    assert_eq!(board.position_key(Side::Attacker), other.position_key(Side::Attacker));
    assert_ne!(board.position_key(Side::Attacker), board.position_key(Side::Defender));
    other.set_piece(Square::new(0, 3), None);
    assert_ne!(board.position_key(Side::Attacker), other.position_key(Side::Attacker));
    assert!(!board.same_position(&other));
}

#[test]
fn test_clone_is_independent() {
    let board = Board::new(VariantConfig::brandubh()).unwrap();
    let mut copy = board.clone();
    copy.set_piece(Square::new(0, 3), None);
    copy.no_capture_count = 7;
    assert_eq!(board.piece_at(Square::new(0, 3)), Some(Piece::Attacker));
    assert_eq!(board.no_capture_count, 0);
    assert_ne!(board, copy);
    assert_eq!(board, board.initial());
}

#[test]
fn test_display() {
    let board = Board::new(VariantConfig::brandubh()).unwrap();
    let text = board.to_string();
    assert_eq!(text.lines().nth(3), Some("AADKDAA"));
}
