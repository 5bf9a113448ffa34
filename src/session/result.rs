use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::engine::evaluate::Verdict;
use crate::engine::problem::{Difficulty, Operation, Problem};
use crate::engine::regrouping::DigitTrace;
use crate::engine::stats::SessionStats;
use crate::session::attempt::AttemptState;

/// One scored problem, as it counted toward the session stats.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProblemResult {
    pub operand1: u32,
    pub operand2: u32,
    pub operation: Operation,
    pub difficulty: Difficulty,
    pub correct_answer: u32,
    pub user_value: u64,
    pub correct: bool,
    pub regroups: usize,
    pub elapsed_secs: f64,
    pub timestamp: DateTime<Utc>,
}

impl ProblemResult {
    pub fn from_attempt(
        problem: &Problem,
        trace: &DigitTrace,
        attempt: &AttemptState,
        verdict: &Verdict,
    ) -> Self {
        Self {
            operand1: problem.operand1(),
            operand2: problem.operand2(),
            operation: problem.operation(),
            difficulty: problem.difficulty(),
            correct_answer: trace.correct_answer,
            user_value: verdict.user_value,
            correct: verdict.is_wholly_correct,
            regroups: trace.regroup_count(),
            elapsed_secs: attempt.elapsed_secs(),
            timestamp: Utc::now(),
        }
    }

    pub fn expression(&self) -> String {
        format!(
            "{} {} {} = {}",
            self.operand1,
            self.operation.symbol(),
            self.operand2,
            self.user_value
        )
    }
}

/// What `--summary-json` prints when the session ends.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SessionSummary {
    pub stats: SessionStats,
    pub accuracy_percent: u32,
    pub history: Vec<ProblemResult>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::evaluate::Feedback;
    use crate::engine::regrouping::analyze;
    use crate::session::attempt::EntryOrder;

    #[test]
    fn test_result_captures_problem_and_verdict() {
        let problem =
            Problem::new(42, 17, Operation::Subtraction, Difficulty::TwoDigit).unwrap();
        let trace = analyze(&problem);
        let attempt = AttemptState::new(problem.answer_width(), EntryOrder::OnesFirst);
        let verdict = Verdict {
            user_value: 35,
            is_wholly_correct: false,
            feedback: vec![Feedback::Incorrect, Feedback::Correct],
        };
        let result = ProblemResult::from_attempt(&problem, &trace, &attempt, &verdict);
        assert_eq!(result.correct_answer, 25);
        assert_eq!(result.user_value, 35);
        assert!(!result.correct);
        assert_eq!(result.regroups, 1);
        assert_eq!(result.expression(), "42 \u{2212} 17 = 35");
    }

    #[test]
    fn test_summary_serializes_difficulty_tags() {
        let mut stats = SessionStats::default();
        stats.record(Difficulty::ThreeDigit, true);
        let summary = SessionSummary {
            accuracy_percent: stats.accuracy_percent(),
            stats,
            history: Vec::new(),
        };
        let json = serde_json::to_string(&summary).unwrap();
        assert!(json.contains("\"3digit\""));
        assert!(json.contains("\"accuracy_percent\":100"));
    }
}
