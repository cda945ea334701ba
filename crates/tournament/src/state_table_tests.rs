use super::*;
use crate::match_runner::{MatchConfig, MatchRunner};
use crate::players::RandomPlayer;
use tafl_core::{encode_move, EndReason, Move, Square, VariantConfig};

fn brandubh() -> Arc<Variant> {
    Arc::new(Variant::new(VariantConfig::brandubh()).unwrap())
}

fn shuffle_record() -> GameRecord {
    let dims = VariantConfig::brandubh().dims();
    let codes: Vec<u32> = [((0, 3), (0, 4)), ((2, 3), (2, 4)), ((0, 4), (0, 3)), ((2, 4), (2, 3))]
        .iter()
        .map(|&((fr, fc), (tr, tc))| {
            encode_move(Move::new(Square::new(fr, fc), Square::new(tr, tc)), dims)
        })
        .collect();
    let moves: Vec<u32> = codes.iter().chain(codes.iter()).copied().collect();
    GameRecord {
        attacker: "a".to_string(),
        defender: "b".to_string(),
        outcome: GameOutcome::Draw(EndReason::ThreefoldRepetition),
        turns: 8,
        moves,
    }
}

#[test]
fn test_record_scripted_game() {
    let mut table = StateTable::new();
    let credited = table.record_game(&brandubh(), &shuffle_record()).unwrap();
    assert_eq!(credited, 9);

    let start = Game::new(VariantConfig::brandubh()).unwrap();
    let key = state_key(&start.features());
    assert_eq!(table.get(&key), Some([0, 1, 0]));

    let total: u32 = table.iter().map(|(_, c)| c.iter().sum::<u32>()).sum();
    assert_eq!(total, 9);
    assert!(table.iter().all(|(_, c)| c[ATTACKER_WINS] == 0 && c[DEFENDER_WINS] == 0));
}

#[test]
fn test_record_played_game() {
    let config = MatchConfig {
        num_games: 1,
        verbose: false,
        ..Default::default()
    };
    let runner = MatchRunner::from_config(VariantConfig::brandubh(), config).unwrap();
    let record = runner
        .play_game(&mut RandomPlayer::new(1), &mut RandomPlayer::new(2))
        .unwrap();

    let mut table = StateTable::new();
    let credited = table.record_game(runner.variant(), &record).unwrap();
    assert_eq!(credited, record.moves.len() + 1);

    let slot = match record.outcome {
        GameOutcome::AttackerWin(_) => ATTACKER_WINS,
        GameOutcome::DefenderWin(_) => DEFENDER_WINS,
        _ => DRAWS,
    };
    let total: u32 = table.iter().map(|(_, c)| c[slot]).sum();
    assert_eq!(total as usize, credited);
}

#[test]
fn test_unfinished_game_is_ignored() {
    let mut record = shuffle_record();
    record.outcome = GameOutcome::Ongoing;
    let mut table = StateTable::new();
    assert_eq!(table.record_game(&brandubh(), &record).unwrap(), 0);
    assert!(table.is_empty());
}

#[test]
fn test_corrupt_record_is_rejected() {
    let mut record = shuffle_record();
    record.moves.insert(0, 0);
    let mut table = StateTable::new();
    assert!(matches!(
        table.record_game(&brandubh(), &record),
        Err(TournamentError::Replay(_))
    ));
}

#[test]
fn test_mismatched_outcome_is_rejected() {
    let mut record = shuffle_record();
    record.outcome = GameOutcome::AttackerWin(EndReason::KingCaptured);
    let mut table = StateTable::new();

    let err = table.record_game(&brandubh(), &record).unwrap_err();
    assert!(matches!(
        err,
        TournamentError::OutcomeMismatch {
            recorded: GameOutcome::AttackerWin(EndReason::KingCaptured),
            replayed: GameOutcome::Draw(EndReason::ThreefoldRepetition),
        }
    ));
    assert!(table.is_empty());
}

#[test]
fn test_truncated_record_is_rejected() {
    let mut record = shuffle_record();
    record.moves.truncate(5);
    let mut table = StateTable::new();
    assert!(matches!(
        table.record_game(&brandubh(), &record),
        Err(TournamentError::OutcomeMismatch {
            replayed: GameOutcome::Ongoing,
            ..
        })
    ));
    assert!(table.is_empty());
}

#[test]
fn test_merge_and_value() {
    let mut a = StateTable::new();
    a.bump("(0)".to_string(), GameOutcome::AttackerWin(EndReason::KingCaptured));
    a.bump("(0)".to_string(), GameOutcome::Ongoing);
    let mut b = StateTable::new();
    b.bump("(0)".to_string(), GameOutcome::DefenderWin(EndReason::KingEscaped));
    b.bump("(0)".to_string(), GameOutcome::AttackerWin(EndReason::NoLegalMoves));
    b.bump("(1)".to_string(), GameOutcome::Draw(EndReason::MoveLimit));

    a.merge(&b);
    assert_eq!(a.get("(0)"), Some([2, 0, 1]));
    assert_eq!(a.get("(1)"), Some([0, 1, 0]));
    assert_eq!(a.len(), 2);

    let v = a.value("(0)", Side::Attacker).unwrap();
    assert!((v - 1.0 / 3.0).abs() < 1e-9);
    assert_eq!(a.value("(1)", Side::Defender), Some(0.0));
    assert_eq!(a.value("(2)", Side::Attacker), None);
}

#[test]
fn test_save_and_load() {
    let mut table = StateTable::new();
    table.record_game(&brandubh(), &shuffle_record()).unwrap();

    let path = std::env::temp_dir().join(format!("tafl-{}-states.json", std::process::id()));
    table.save(&path).unwrap();
    let loaded = StateTable::load(&path).unwrap();
    std::fs::remove_file(&path).ok();
    assert_eq!(loaded, table);
}
