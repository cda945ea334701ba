use super::*;
use crate::config::VariantConfig;

fn board(rows: &[&str]) -> Board {
    Board::from_diagram(VariantConfig::brandubh(), rows).unwrap()
}

#[test]
fn test_startpos_moves() {
    let b = Board::new(VariantConfig::brandubh()).unwrap();
    assert_eq!(legal_moves(&b, Side::Attacker).len(), 40);
    assert_eq!(legal_moves(&b, Side::Defender).len(), 24);
}

#[test]
fn test_enumeration_order() {
    let b = Board::new(VariantConfig::brandubh()).unwrap();
    let moves = legal_moves(&b, Side::Attacker);
    let from = Square::new(0, 3);
    assert_eq!(
        &moves[..4],
        &[
            Move::new(from, Square::new(0, 4)),
            Move::new(from, Square::new(0, 5)),
            Move::new(from, Square::new(0, 2)),
            Move::new(from, Square::new(0, 1)),
        ]
    );
    assert_eq!(moves[4].from, Square::new(1, 3));
}

#[test]
fn test_king_blocked_at_start() {
    let b = Board::new(VariantConfig::brandubh()).unwrap();
    assert!(moves_from(&b, Square::new(3, 3)).is_empty());
}

#[test]
fn test_soldier_passes_but_never_lands_on_throne() {
    let b = board(&[
        "....K..", ".......", ".......", ".A.....", ".......", ".......", ".......",
    ]);
    let dests: Vec<_> = moves_from(&b, Square::new(3, 1))
        .into_iter()
        .map(|m| m.to)
        .collect();
    assert!(dests.contains(&Square::new(3, 2)));
    assert!(!dests.contains(&Square::new(3, 3)));
    assert!(dests.contains(&Square::new(3, 4)));
    assert!(dests.contains(&Square::new(3, 6)));
}

#[test]
fn test_only_king_reaches_corner() {
    let b = board(&[
        ".K.....", ".......", ".......", ".......", ".......", ".......", "..A....",
    ]);
    let king: Vec<_> = moves_from(&b, Square::new(0, 1))
        .into_iter()
        .map(|m| m.to)
        .collect();
    assert!(king.contains(&Square::new(0, 0)));
    assert!(king.contains(&Square::new(0, 6)));

    let b = board(&[
        ".A.....", ".......", ".......", ".......", ".......", ".......", "...K...",
    ]);
    let soldier: Vec<_> = moves_from(&b, Square::new(0, 1))
        .into_iter()
        .map(|m| m.to)
        .collect();
    assert!(!soldier.contains(&Square::new(0, 0)));
    assert!(!soldier.contains(&Square::new(0, 6)));
    assert!(soldier.contains(&Square::new(0, 5)));
}

#[test]
fn test_rays_stop_at_pieces() {
    let b = board(&[
        ".......", ".......", ".A.D...", ".......", ".......", ".......", "...K...",
    ]);
    let dests: Vec<_> = moves_from(&b, Square::new(2, 1))
        .into_iter()
        .map(|m| m.to)
        .collect();
    assert!(dests.contains(&Square::new(2, 2)));
    assert!(!dests.contains(&Square::new(2, 3)));
    assert!(!dests.contains(&Square::new(2, 4)));
}

#[test]
fn test_no_legal_moves_is_empty() {
    let b = board(&[
        ".AD....", ".D.....", ".......", ".......", ".......", ".......", "...K...",
    ]);
    assert!(legal_moves(&b, Side::Attacker).is_empty());
    assert!(!has_legal_move(&b, Side::Attacker));
    assert!(has_legal_move(&b, Side::Defender));
}

#[test]
fn test_is_legal_matches_enumeration() {
    let b = Board::new(VariantConfig::tablut()).unwrap();
    for side in [Side::Attacker, Side::Defender] {
        let legal = legal_moves(&b, side);
        for from in b.dims().squares() {
            if b.piece_at(from).map(|p| p.side()) != Some(side) {
                continue;
            }
            for to in b.dims().squares() {
                let mv = Move::new(from, to);
                assert_eq!(is_legal(&b, mv), legal.contains(&mv), "{mv}");
            }
        }
    }
}

#[test]
fn test_legal_moves_into_reuses_buffer() {
    let b = Board::new(VariantConfig::brandubh()).unwrap();
    let mut buf = vec![Move::new(Square::new(0, 0), Square::new(0, 1))];
    legal_moves_into(&b, Side::Defender, &mut buf);
    assert_eq!(buf, legal_moves(&b, Side::Defender));
}
