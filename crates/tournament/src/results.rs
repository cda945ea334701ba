//! Round-robin tournaments, results storage and reporting

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

use tafl_core::{Player, Side};

use crate::error::TournamentError;
use crate::match_runner::{GameRecord, MatchRunner};

/// Points awarded per game result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scoring {
    pub win: u32,
    pub draw: u32,
    pub loss: u32,
}

impl Scoring {
    /// Three points for a win, one for a draw.
    pub const STANDARD: Scoring = Scoring {
        win: 3,
        draw: 1,
        loss: 0,
    };
}

impl Default for Scoring {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Complete tournament results
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TournamentResults {
    /// Name/description of the tournament
    pub name: String,
    /// Variant the games were played on
    pub variant: String,
    /// One standing per participant, in entry order
    pub standings: Vec<Standing>,
    /// Every game played, in order
    pub games: Vec<GameRecord>,
    pub attacker_wins: u32,
    pub defender_wins: u32,
    pub draws: u32,
    /// Points table the standings were computed with
    #[serde(default)]
    pub scoring: Scoring,
}

/// Score sheet of one participant
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    pub name: String,
    pub points: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
}

impl Standing {
    pub fn games(&self) -> u32 {
        self.wins + self.draws + self.losses
    }
}

impl TournamentResults {
    pub fn new(name: &str, variant: &str, participants: &[String]) -> Self {
        Self {
            name: name.to_string(),
            variant: variant.to_string(),
            standings: participants
                .iter()
                .map(|p| Standing {
                    name: p.clone(),
                    ..Default::default()
                })
                .collect(),
            games: Vec::new(),
            attacker_wins: 0,
            defender_wins: 0,
            draws: 0,
            scoring: Scoring::default(),
        }
    }

    /// Use `scoring` for every game added from now on.
    pub fn with_scoring(mut self, scoring: Scoring) -> Self {
        self.scoring = scoring;
        self
    }

    /// Add a game between participants `attacker` and `defender` (indices
    /// into `standings`).
    pub fn add_game(&mut self, attacker: usize, defender: usize, record: GameRecord) {
        match record.winner() {
            Some(side) => {
                let (winner, loser) = match side {
                    Side::Attacker => {
                        self.attacker_wins += 1;
                        (attacker, defender)
                    }
                    Side::Defender => {
                        self.defender_wins += 1;
                        (defender, attacker)
                    }
                };
                self.standings[winner].wins += 1;
                self.standings[winner].points += self.scoring.win;
                self.standings[loser].losses += 1;
                self.standings[loser].points += self.scoring.loss;
            }
            None => {
                self.draws += 1;
                for idx in [attacker, defender] {
                    self.standings[idx].draws += 1;
                    self.standings[idx].points += self.scoring.draw;
                }
            }
        }
        self.games.push(record);
    }

    /// Standings ordered by points, then wins. Entry order breaks ties.
    pub fn ranking(&self) -> Vec<&Standing> {
        let mut ranked: Vec<&Standing> = self.standings.iter().collect();
        ranked.sort_by(|a, b| b.points.cmp(&a.points).then(b.wins.cmp(&a.wins)));
        ranked
    }

    /// Save results to JSON file
    pub fn save(&self, path: &Path) -> Result<(), TournamentError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(|e| TournamentError::io(path, e))
    }

    /// Load results from JSON file
    pub fn load(path: &Path) -> Result<Self, TournamentError> {
        let contents = std::fs::read_to_string(path).map_err(|e| TournamentError::io(path, e))?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Generate a text report
    pub fn generate_report(&self) -> String {
        let mut report = String::new();
        report.push_str(&format!("=== Tournament: {} ===\n\n", self.name));
        report.push_str(&format!(
            "Variant: {}, {} games, scoring {}/{}/{}\n",
            self.variant,
            self.games.len(),
            self.scoring.win,
            self.scoring.draw,
            self.scoring.loss
        ));
        report.push_str(&format!(
            "By role: attacker {} / defender {} / draw {}\n\n",
            self.attacker_wins, self.defender_wins, self.draws
        ));

        report.push_str("Standings:\n");
        report.push_str(&format!(
            "{:<20} {:>6} {:>5}-{:<5}-{:<5}\n",
            "Player", "Pts", "W", "L", "D"
        ));
        report.push_str(&"-".repeat(50));
        report.push('\n');

        for s in self.ranking() {
            report.push_str(&format!(
                "{:<20} {:>6} {:>5}-{:<5}-{:<5}\n",
                s.name, s.points, s.wins, s.losses, s.draws
            ));
        }

        report
    }

    /// Print report to stdout
    pub fn print_report(&self) {
        println!("{}", self.generate_report());
    }
}

/// Every pair of players meets `rounds` times in each role.
pub struct RoundRobin {
    runner: MatchRunner,
    rounds: u32,
    scoring: Scoring,
}

impl RoundRobin {
    pub fn new(runner: MatchRunner, rounds: u32) -> Self {
        Self {
            runner,
            rounds: rounds.max(1),
            scoring: Scoring::default(),
        }
    }

    pub fn with_scoring(mut self, scoring: Scoring) -> Self {
        self.scoring = scoring;
        self
    }

    pub fn runner(&self) -> &MatchRunner {
        &self.runner
    }

    pub fn run(
        &self,
        name: &str,
        players: &mut [Box<dyn Player>],
    ) -> Result<TournamentResults, TournamentError> {
        if players.len() < 2 {
            return Err(TournamentError::TooFewPlayers(players.len()));
        }
        let names: Vec<String> = players.iter().map(|p| p.name().to_string()).collect();
        let variant = &self.runner.variant().config().name;
        let mut results =
            TournamentResults::new(name, variant, &names).with_scoring(self.scoring);
        info!(
            tournament = name,
            players = players.len(),
            rounds = self.rounds,
            "round robin started"
        );

        for i in 0..players.len() {
            for j in (i + 1)..players.len() {
                let (left, right) = players.split_at_mut(j);
                let a = left[i].as_mut();
                let b = right[0].as_mut();
                for _ in 0..self.rounds {
                    let record = self.runner.play_game(&mut *a, &mut *b)?;
                    results.add_game(i, j, record);
                    let record = self.runner.play_game(&mut *b, &mut *a)?;
                    results.add_game(j, i, record);
                }
                info!(first = %names[i], second = %names[j], "pairing finished");
            }
        }

        info!(
            tournament = name,
            games = results.games.len(),
            attacker_wins = results.attacker_wins,
            defender_wins = results.defender_wins,
            draws = results.draws,
            "round robin finished"
        );
        Ok(results)
    }
}

#[cfg(test)]
#[path = "results_tests.rs"]
mod results_tests;
