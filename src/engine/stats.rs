use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::engine::problem::Difficulty;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifficultyTotals {
    pub solved: u32,
    pub total: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MasteryBand {
    Strong,
    Fair,
    Weak,
}

impl MasteryBand {
    pub fn from_percent(percent: u32) -> Self {
        if percent >= 80 {
            MasteryBand::Strong
        } else if percent >= 50 {
            MasteryBand::Fair
        } else {
            MasteryBand::Weak
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SessionStats {
    pub score_count: u32,
    pub attempt_count: u32,
    pub current_streak: u32,
    pub best_streak: u32,
    pub per_difficulty: BTreeMap<Difficulty, DifficultyTotals>,
    pub started_at: DateTime<Utc>,
}

impl Default for SessionStats {
    fn default() -> Self {
        Self {
            score_count: 0,
            attempt_count: 0,
            current_streak: 0,
            best_streak: 0,
            per_difficulty: Difficulty::ALL
                .iter()
                .map(|&d| (d, DifficultyTotals::default()))
                .collect(),
            started_at: Utc::now(),
        }
    }
}

impl SessionStats {
    /// Applies one verdict. Callers guarantee this runs at most once per problem.
    pub fn record(&mut self, difficulty: Difficulty, correct: bool) {
        self.attempt_count += 1;
        let totals = self.per_difficulty.entry(difficulty).or_default();
        totals.total += 1;

        if correct {
            self.score_count += 1;
            self.current_streak += 1;
            self.best_streak = self.best_streak.max(self.current_streak);
            totals.solved += 1;
        } else {
            self.current_streak = 0;
        }
    }

    pub fn totals(&self, difficulty: Difficulty) -> DifficultyTotals {
        self.per_difficulty
            .get(&difficulty)
            .copied()
            .unwrap_or_default()
    }

    pub fn accuracy_percent(&self) -> u32 {
        rounded_percent(self.score_count, self.attempt_count)
    }

    pub fn mastery_percent(&self, difficulty: Difficulty) -> u32 {
        let totals = self.totals(difficulty);
        rounded_percent(totals.solved, totals.total)
    }

    pub fn mastery_band(&self, difficulty: Difficulty) -> MasteryBand {
        MasteryBand::from_percent(self.mastery_percent(difficulty))
    }

    pub fn elapsed_secs(&self) -> i64 {
        (Utc::now() - self.started_at).num_seconds().max(0)
    }
}

fn rounded_percent(part: u32, whole: u32) -> u32 {
    if whole == 0 {
        return 0;
    }
    (f64::from(part) / f64::from(whole) * 100.0).round() as u32
}
