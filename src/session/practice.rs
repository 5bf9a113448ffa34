use std::collections::VecDeque;

use crate::engine::evaluate::{Verdict, evaluate};
use crate::engine::problem::{Difficulty, Operation, Problem};
use crate::engine::regrouping::{DigitTrace, analyze};
use crate::engine::stats::SessionStats;
use crate::error::Result;
use crate::generator::ProblemGenerator;
use crate::session::attempt::{AttemptState, EntryOrder};
use crate::session::input;
use crate::session::result::{ProblemResult, SessionSummary};

const MAX_HISTORY: usize = 500;

/// Generator → analyzer → attempt → evaluator → stats, one event at a time.
pub struct PracticeSession<G: ProblemGenerator> {
    generator: G,
    problem: Problem,
    trace: DigitTrace,
    pub difficulty: Difficulty,
    pub operation: Operation,
    pub entry_order: EntryOrder,
    pub attempt: AttemptState,
    pub last_verdict: Option<Verdict>,
    pub stats: SessionStats,
    /// Oldest first, capped at `MAX_HISTORY`.
    pub history: VecDeque<ProblemResult>,
}

impl<G: ProblemGenerator> PracticeSession<G> {
    pub fn new(
        mut generator: G,
        difficulty: Difficulty,
        operation: Operation,
        entry_order: EntryOrder,
    ) -> Self {
        let problem = generator.generate(difficulty, operation);
        let trace = analyze(&problem);
        let attempt = AttemptState::new(problem.answer_width(), entry_order);
        Self {
            generator,
            problem,
            trace,
            difficulty,
            operation,
            entry_order,
            attempt,
            last_verdict: None,
            stats: SessionStats::default(),
            history: VecDeque::new(),
        }
    }

    pub fn problem(&self) -> &Problem {
        &self.problem
    }

    pub fn trace(&self) -> &DigitTrace {
        &self.trace
    }

    pub fn new_problem(&mut self) {
        self.problem = self.generator.generate(self.difficulty, self.operation);
        self.trace = analyze(&self.problem);
        self.attempt = AttemptState::new(self.problem.answer_width(), self.entry_order);
        self.last_verdict = None;
    }

    /// Returns false (and keeps the current problem) when nothing changed.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) -> bool {
        if difficulty == self.difficulty {
            return false;
        }
        tracing::info!(difficulty = difficulty.as_str(), "difficulty changed");
        self.difficulty = difficulty;
        self.new_problem();
        true
    }

    pub fn set_operation(&mut self, operation: Operation) -> bool {
        if operation == self.operation {
            return false;
        }
        tracing::info!(operation = operation.as_str(), "operation changed");
        self.operation = operation;
        self.new_problem();
        true
    }

    /// Takes effect from the next problem so the current row keeps its cursor.
    pub fn set_entry_order(&mut self, entry_order: EntryOrder) {
        self.entry_order = entry_order;
    }

    pub fn enter_digit(&mut self, ch: char) -> Result<()> {
        input::process_digit(&mut self.attempt, ch).inspect_err(|err| {
            tracing::debug!(%err, "digit rejected");
        })
    }

    pub fn backspace(&mut self) {
        input::process_backspace(&mut self.attempt);
    }

    pub fn cursor_left(&mut self) {
        input::move_cursor_left(&mut self.attempt);
    }

    pub fn cursor_right(&mut self) {
        input::move_cursor_right(&mut self.attempt);
    }

    /// Evaluates the row. Stats change at most once per generated problem, no
    /// matter how often the same problem is resubmitted or retried.
    pub fn submit(&mut self) -> Result<&Verdict> {
        let verdict = evaluate(&self.trace, &self.attempt.cells).inspect_err(|err| {
            tracing::debug!(%err, "submission rejected");
        })?;
        self.attempt.apply_verdict(&verdict);

        if !self.attempt.scored {
            self.attempt.scored = true;
            self.stats
                .record(self.problem.difficulty(), verdict.is_wholly_correct);
            self.history.push_back(ProblemResult::from_attempt(
                &self.problem,
                &self.trace,
                &self.attempt,
                &verdict,
            ));
            if self.history.len() > MAX_HISTORY {
                self.history.pop_front();
            }
            tracing::info!(
                correct = verdict.is_wholly_correct,
                answer = self.trace.correct_answer,
                entered = verdict.user_value,
                streak = self.stats.current_streak,
                "answer scored"
            );
        } else {
            tracing::debug!(correct = verdict.is_wholly_correct, "retry evaluated, not scored");
        }

        Ok(self.last_verdict.insert(verdict))
    }

    /// Same problem, fresh row. Never scores a second time.
    pub fn retry(&mut self) {
        self.attempt.reset();
        self.last_verdict = None;
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            stats: self.stats.clone(),
            accuracy_percent: self.stats.accuracy_percent(),
            history: self.history.iter().cloned().collect(),
        }
    }
}
