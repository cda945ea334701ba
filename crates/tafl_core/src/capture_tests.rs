use super::*;
use crate::config::{CaptureRules, VariantConfig};

fn board_with(rules: CaptureRules, rows: &[&str]) -> Board {
    let mut config = VariantConfig::brandubh();
    config.capture = rules;
    Board::from_diagram(config, rows).unwrap()
}

fn board(rows: &[&str]) -> Board {
    board_with(CaptureRules::default(), rows)
}

fn mv(fr: u8, fc: u8, tr: u8, tc: u8) -> Move {
    Move::new(Square::new(fr, fc), Square::new(tr, tc))
}

#[test]
fn test_custodian_capture() {
    let mut b = board(&[
        ".......", ".A.....", ".D.....", ".......", ".......", ".A.....", "...K...",
    ]);
    b.no_capture_count = 5;
    let outcome = apply(&mut b, mv(5, 1, 3, 1)).unwrap();
    assert_eq!(outcome.captured, BTreeSet::from([Square::new(2, 1)]));
    assert!(!outcome.king_captured);
    assert!(b.is_empty(Square::new(2, 1)));
    assert_eq!(b.piece_at(Square::new(3, 1)), Some(Piece::Attacker));
    assert_eq!(b.no_capture_count, 0);
}

#[test]
fn test_moving_into_sandwich_is_safe() {
    let mut b = board(&[
        ".......", ".A.....", "....D..", ".A.....", ".......", ".......", "...K...",
    ]);
    let outcome = apply(&mut b, mv(2, 4, 2, 1)).unwrap();
    assert!(!outcome.any());
    assert_eq!(b.piece_at(Square::new(2, 1)), Some(Piece::Defender));
    assert_eq!(b.no_capture_count, 1);
}

#[test]
fn test_double_capture() {
    let mut b = board(&[
        ".......", ".......", "AD.DA..", ".......", "..A....", ".......", "...K...",
    ]);
    let outcome = apply(&mut b, mv(4, 2, 2, 2)).unwrap();
    assert_eq!(
        outcome.captured,
        BTreeSet::from([Square::new(2, 1), Square::new(2, 3)])
    );
}

#[test]
fn test_corner_is_anchor() {
    let mut b = board(&[
        ".D.....", ".......", ".......", ".......", "..A....", ".......", "...K...",
    ]);
    let outcome = apply(&mut b, mv(4, 2, 0, 2)).unwrap();
    assert_eq!(outcome.captured, BTreeSet::from([Square::new(0, 1)]));
}

#[test]
fn test_empty_throne_anchor_is_configurable() {
    let rows = [
        ".......", ".......", ".......", "..A....", ".......", ".D.....", ".....K.",
    ];
    let mut b = board(&rows);
    let outcome = apply(&mut b, mv(5, 1, 3, 1)).unwrap();
    assert_eq!(outcome.captured, BTreeSet::from([Square::new(3, 2)]));

    let rules = CaptureRules {
        restricted_is_hostile: false,
        ..CaptureRules::default()
    };
    let mut b = board_with(rules, &rows);
    let outcome = apply(&mut b, mv(5, 1, 3, 1)).unwrap();
    assert!(outcome.captured.is_empty());
}

#[test]
fn test_edge_anchor_is_configurable() {
    let rows = [
        "....D..", "......A", ".......", ".......", ".......", ".......", "...K...",
    ];
    let mut b = board(&rows);
    assert!(!apply(&mut b, mv(1, 6, 1, 4)).unwrap().any());

    let rules = CaptureRules {
        edge_is_hostile: true,
        ..CaptureRules::default()
    };
    let mut b = board_with(rules, &rows);
    let outcome = apply(&mut b, mv(1, 6, 1, 4)).unwrap();
    assert_eq!(outcome.captured, BTreeSet::from([Square::new(0, 4)]));
}

#[test]
fn test_armed_king_anchors_and_captures() {
    let rows = [
        ".......", ".......", ".KA..D.", ".......", ".......", ".......", ".......",
    ];
    let mut b = board(&rows);
    let outcome = apply(&mut b, mv(2, 5, 2, 3)).unwrap();
    assert_eq!(outcome.captured, BTreeSet::from([Square::new(2, 2)]));

    let unarmed = CaptureRules {
        king_is_armed: false,
        ..CaptureRules::default()
    };
    let mut b = board_with(unarmed.clone(), &rows);
    assert!(!apply(&mut b, mv(2, 5, 2, 3)).unwrap().any());

    // The king itself as the moving piece.
    let mut b = board(&[
        ".......", ".......", "...AD..", ".......", "..K....", ".......", ".......",
    ]);
    let outcome = apply(&mut b, mv(4, 2, 2, 2)).unwrap();
    assert_eq!(outcome.captured, BTreeSet::from([Square::new(2, 3)]));
    let mut b = board_with(
        unarmed,
        &[
            ".......", ".......", "...AD..", ".......", "..K....", ".......", ".......",
        ],
    );
    assert!(!apply(&mut b, mv(4, 2, 2, 2)).unwrap().any());
}

#[test]
fn test_king_not_captured_custodially_under_four_side_rule() {
    let mut b = board(&[
        ".......", ".......", ".AK....", ".......", ".......", ".......", ".....A.",
    ]);
    let outcome = apply(&mut b, mv(6, 5, 2, 5)).unwrap();
    assert!(!outcome.king_captured);
    let outcome = apply(&mut b, mv(2, 5, 2, 3)).unwrap();
    assert!(!outcome.king_captured);
    assert_eq!(b.king_square(), Some(Square::new(2, 2)));
}

#[test]
fn test_king_captured_on_four_sides() {
    let mut b = board(&[
        ".......", "..A....", ".AKA...", ".......", "A......", ".......", ".......",
    ]);
    let outcome = apply(&mut b, mv(4, 0, 4, 2)).unwrap();
    assert!(!outcome.king_captured);
    let outcome = apply(&mut b, mv(4, 2, 3, 2)).unwrap();
    assert!(outcome.king_captured);
    assert!(outcome.captured.is_empty());
    // The king stays on the board; the outcome carries the capture.
    assert_eq!(b.king_square(), Some(Square::new(2, 2)));
    assert_eq!(b.no_capture_count, 0);
}

#[test]
fn test_empty_throne_counts_toward_king_capture() {
    let mut b = board(&[
        ".......", "...A...", "..AK...", ".......", ".......", ".......", "....A..",
    ]);
    // King on (2, 3); throne (3, 3) below is empty and hostile.
    let outcome = apply(&mut b, mv(6, 4, 2, 4)).unwrap();
    assert!(outcome.king_captured);
}

#[test]
fn test_king_surround_three_uses_edge_shortfall() {
    let rules = CaptureRules {
        king_surround: 3,
        ..CaptureRules::default()
    };
    let mut b = board_with(
        rules,
        &[
            ".AKA...", ".......", "..A....", ".......", ".......", ".......", ".......",
        ],
    );
    let outcome = apply(&mut b, mv(2, 2, 1, 2)).unwrap();
    assert!(outcome.king_captured);
}

#[test]
fn test_king_surround_two_is_custodial() {
    let rules = CaptureRules {
        king_surround: 2,
        ..CaptureRules::default()
    };
    let mut b = board_with(
        rules.clone(),
        &[
            ".......", ".......", ".AK..A.", ".......", ".......", ".......", ".......",
        ],
    );
    assert!(apply(&mut b, mv(2, 5, 2, 3)).unwrap().king_captured);

    // Perpendicular neighbours do not count.
    let mut b = board_with(
        rules,
        &[
            ".......", "..A....", "..K..A.", ".......", ".......", ".......", ".......",
        ],
    );
    assert!(!apply(&mut b, mv(2, 5, 2, 3)).unwrap().king_captured);
}

#[test]
fn test_rejects_illegal_moves_without_mutation() {
    let b = Board::new(VariantConfig::brandubh()).unwrap();
    let cases = [
        mv(2, 2, 2, 1), // empty source
        mv(0, 3, 1, 4), // diagonal
        mv(1, 3, 2, 3), // onto a piece
        mv(0, 3, 2, 3), // through a piece
        mv(0, 3, 0, 6), // soldier onto a corner
        mv(0, 3, 0, 3), // null move
    ];
    for m in cases {
        let mut copy = b.clone();
        assert_eq!(apply(&mut copy, m), Err(MoveError::InvalidMove(m)));
        assert_eq!(copy, b);
    }
}

#[test]
fn test_preview_does_not_mutate() {
    let b = board(&[
        ".......", ".A.....", ".D.....", ".......", ".......", ".A.....", "...K...",
    ]);
    let before = b.clone();
    let (next, outcome) = preview_apply(&b, mv(5, 1, 3, 1)).unwrap();
    assert_eq!(b, before);
    assert_eq!(outcome.captured.len(), 1);
    assert!(next.is_empty(Square::new(2, 1)));
    assert!(preview_apply(&b, mv(5, 1, 5, 1)).is_err());
}

#[test]
#[should_panic(expected = "invariant violation")]
fn test_second_king_is_fatal() {
    let mut b = Board::new(VariantConfig::brandubh()).unwrap();
    b.set_piece(Square::new(1, 1), Some(Piece::King));
    let _ = apply(&mut b, mv(0, 3, 0, 4));
}

#[test]
fn test_outcome_json_lists_captured_squares() {
    let mut b = board(&[
        ".......", ".A.....", ".D.....", ".......", ".......", ".A.....", "...K...",
    ]);
    let outcome = apply(&mut b, mv(5, 1, 3, 1)).unwrap();
    let json = serde_json::to_string(&outcome).unwrap();
    assert_eq!(json, r#"{"captured":[[2,1]],"king_captured":false}"#);
    assert_eq!(serde_json::from_str::<CaptureOutcome>(&json).unwrap(), outcome);
}
