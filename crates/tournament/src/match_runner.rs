//! Match runner for playing games between players

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use tafl_core::{EndReason, Game, GameOutcome, Player, Side, Variant, VariantConfig};

use crate::error::TournamentError;

/// Configuration for a match
#[derive(Debug, Clone)]
pub struct MatchConfig {
    /// Number of games to play
    pub num_games: u32,
    /// Whether to swap attacker and defender each game
    pub alternate_roles: bool,
    /// Log every finished game at info level
    pub verbose: bool,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            num_games: 10,
            alternate_roles: true,
            verbose: true,
        }
    }
}

/// A finished game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    pub attacker: String,
    pub defender: String,
    pub outcome: GameOutcome,
    pub turns: u32,
    /// Encoded moves in the order played.
    pub moves: Vec<u32>,
}

impl GameRecord {
    pub fn winner(&self) -> Option<Side> {
        self.outcome.winner()
    }

    pub fn reason(&self) -> Option<EndReason> {
        self.outcome.reason()
    }

    /// Name of the winning player, `None` for a draw.
    pub fn winner_name(&self) -> Option<&str> {
        match self.winner()? {
            Side::Attacker => Some(&self.attacker),
            Side::Defender => Some(&self.defender),
        }
    }
}

/// Number of games in one outcome category and the turns they took.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Tally {
    pub count: u32,
    pub total_turns: u64,
}

impl Tally {
    fn add(&mut self, turns: u32) {
        self.count += 1;
        self.total_turns += turns as u64;
    }

    pub fn average_turns(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        self.total_turns as f64 / self.count as f64
    }
}

/// Outcomes of the games played with one role assignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RoleSplit {
    pub first_wins: Tally,
    pub second_wins: Tally,
    pub draws: Tally,
}

impl RoleSplit {
    pub fn games(&self) -> u32 {
        self.first_wins.count + self.second_wins.count + self.draws.count
    }
}

/// Aggregate of a match between two players.
///
/// "First" is the player passed first to [`MatchRunner::play_n_matches`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatchStats {
    pub first: String,
    pub second: String,
    pub first_wins: u32,
    pub second_wins: u32,
    /// Wins by whichever player held the attacker role.
    pub attacker_wins: u32,
    pub defender_wins: u32,
    pub draws: u32,
    /// Wins of the first player as attacker and as defender.
    pub first_attacker_wins: u32,
    pub first_defender_wins: u32,
    pub total_turns: u64,
    /// Games where the first player attacked.
    pub first_attacking: RoleSplit,
    /// Games where the second player attacked.
    pub second_attacking: RoleSplit,
    pub games: Vec<GameRecord>,
}

impl MatchStats {
    pub fn total_games(&self) -> u32 {
        self.games.len() as u32
    }

    pub fn average_turns(&self) -> f64 {
        if self.games.is_empty() {
            return 0.0;
        }
        self.total_turns as f64 / self.games.len() as f64
    }

    fn add(&mut self, record: GameRecord, first_attacks: bool) {
        let first_side = if first_attacks {
            Side::Attacker
        } else {
            Side::Defender
        };
        let split = if first_attacks {
            &mut self.first_attacking
        } else {
            &mut self.second_attacking
        };
        match record.winner() {
            Some(side) if side == first_side => split.first_wins.add(record.turns),
            Some(_) => split.second_wins.add(record.turns),
            None => split.draws.add(record.turns),
        }

        match record.winner() {
            Some(side) => {
                match side {
                    Side::Attacker => self.attacker_wins += 1,
                    Side::Defender => self.defender_wins += 1,
                }
                if side == first_side {
                    self.first_wins += 1;
                    match side {
                        Side::Attacker => self.first_attacker_wins += 1,
                        Side::Defender => self.first_defender_wins += 1,
                    }
                } else {
                    self.second_wins += 1;
                }
            }
            None => self.draws += 1,
        }
        self.total_turns += record.turns as u64;
        self.games.push(record);
    }
}

impl fmt::Display for MatchStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} vs {}: {}-{}-{} over {} games",
            self.first,
            self.second,
            self.first_wins,
            self.second_wins,
            self.draws,
            self.total_games()
        )?;
        writeln!(
            f,
            "  by role: attacker {} / defender {} / draw {}",
            self.attacker_wins, self.defender_wins, self.draws
        )?;
        for (label, split) in [
            (&self.first, &self.first_attacking),
            (&self.second, &self.second_attacking),
        ] {
            writeln!(
                f,
                "  {label} attacking: {} games, {}-{}-{} (avg turns {:.1} / {:.1} / {:.1})",
                split.games(),
                split.first_wins.count,
                split.second_wins.count,
                split.draws.count,
                split.first_wins.average_turns(),
                split.second_wins.average_turns(),
                split.draws.average_turns()
            )?;
        }
        write!(f, "  average length: {:.1} turns", self.average_turns())
    }
}

/// Runs games between players on one variant
pub struct MatchRunner {
    variant: Arc<Variant>,
    config: MatchConfig,
}

impl MatchRunner {
    pub fn new(variant: Arc<Variant>, config: MatchConfig) -> Self {
        Self { variant, config }
    }

    pub fn from_config(
        variant: VariantConfig,
        config: MatchConfig,
    ) -> Result<Self, TournamentError> {
        Ok(Self::new(Arc::new(Variant::new(variant)?), config))
    }

    pub fn variant(&self) -> &Arc<Variant> {
        &self.variant
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Play a single game from the variant's starting position.
    pub fn play_game(
        &self,
        attacker: &mut dyn Player,
        defender: &mut dyn Player,
    ) -> Result<GameRecord, TournamentError> {
        let mut game = Game::from_variant(Arc::clone(&self.variant));
        attacker.new_game();
        defender.new_game();

        while !game.is_over() {
            let player: &mut dyn Player = match game.side_to_move() {
                Side::Attacker => &mut *attacker,
                Side::Defender => &mut *defender,
            };
            let choice = player.choose_move(&game);
            let mv = choice.best_move.ok_or_else(|| TournamentError::NoMove {
                player: player.name().to_string(),
                turn: game.turn(),
            })?;
            game.play(mv)
                .map_err(|source| TournamentError::IllegalMove {
                    player: player.name().to_string(),
                    source,
                })?;
        }

        let record = GameRecord {
            attacker: attacker.name().to_string(),
            defender: defender.name().to_string(),
            outcome: game.outcome(),
            turns: game.turn(),
            moves: game.history().moves().to_vec(),
        };
        debug!(
            attacker = %record.attacker,
            defender = %record.defender,
            outcome = %record.outcome,
            turns = record.turns,
            "game finished"
        );
        Ok(record)
    }

    /// Play `num_games` games between two players, swapping roles every game
    /// when `alternate_roles` is set. `first` attacks in game 0.
    pub fn play_n_matches(
        &self,
        first: &mut dyn Player,
        second: &mut dyn Player,
    ) -> Result<MatchStats, TournamentError> {
        let mut stats = MatchStats {
            first: first.name().to_string(),
            second: second.name().to_string(),
            ..Default::default()
        };

        for game_num in 0..self.config.num_games {
            let first_attacks = !self.config.alternate_roles || game_num % 2 == 0;
            let record = if first_attacks {
                self.play_game(first, second)?
            } else {
                self.play_game(second, first)?
            };

            if self.config.verbose {
                info!(
                    game = game_num + 1,
                    of = self.config.num_games,
                    attacker = %record.attacker,
                    outcome = %record.outcome,
                    turns = record.turns,
                    "game {}/{}",
                    game_num + 1,
                    self.config.num_games
                );
            }
            stats.add(record, first_attacks);
        }

        info!(
            first = %stats.first,
            second = %stats.second,
            first_wins = stats.first_wins,
            second_wins = stats.second_wins,
            draws = stats.draws,
            avg_turns = stats.average_turns(),
            "match finished"
        );
        Ok(stats)
    }
}

/// Quick utility to run a match on a preset variant
pub fn quick_match(
    first: &mut dyn Player,
    second: &mut dyn Player,
    num_games: u32,
) -> Result<MatchStats, TournamentError> {
    let config = MatchConfig {
        num_games,
        verbose: false,
        ..Default::default()
    };
    let runner = MatchRunner::from_config(VariantConfig::default(), config)?;
    runner.play_n_matches(first, second)
}

#[cfg(test)]
#[path = "match_runner_tests.rs"]
mod match_runner_tests;
