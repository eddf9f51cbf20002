//! Election tabulation summary consumed by the narrator.

use serde::{Deserialize, Serialize};

/// Votes moved away from winners whose tally exceeded the threshold.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Redistribution {
    /// Candidates whose surplus was transferred
    pub names: Vec<String>,
    /// Sum of transferred votes
    pub total: f64,
}

/// What happened in one round.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RoundSummary {
    /// Candidates eliminated in this round
    #[serde(default)]
    pub eliminated_names: Vec<String>,
    /// Candidates elected in this round
    #[serde(default)]
    pub winner_names: Vec<String>,
    /// Surplus transfer, when one happened
    #[serde(default)]
    pub redistribution: Option<Redistribution>,
}

/// Round-by-round outcome of a ranked-choice tabulation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ElectionSummary {
    /// Title of the contest
    pub title: String,
    /// Votes needed to win
    pub threshold: f64,
    /// Every elected candidate, in order of election
    #[serde(default)]
    pub winner_names: Vec<String>,
    /// Per-round detail
    pub rounds: Vec<RoundSummary>,
}

impl ElectionSummary {
    /// Number of elected candidates.
    pub fn num_winners(&self) -> usize {
        self.winner_names.len()
    }

    /// Number of eliminated candidates across all rounds.
    pub fn num_eliminated(&self) -> usize {
        self.rounds.iter().map(|r| r.eliminated_names.len()).sum()
    }

    /// Number of rounds.
    pub fn num_rounds(&self) -> usize {
        self.rounds.len()
    }
}
