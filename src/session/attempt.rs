use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::engine::evaluate::{DigitCell, Feedback, Verdict};

/// Which way the cursor walks after a digit is entered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EntryOrder {
    /// Start at the ones place and move left, the way column arithmetic is done.
    #[default]
    OnesFirst,
    LeftToRight,
}

impl EntryOrder {
    pub fn label(self) -> &'static str {
        match self {
            EntryOrder::OnesFirst => "ones first",
            EntryOrder::LeftToRight => "left to right",
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            EntryOrder::OnesFirst => EntryOrder::LeftToRight,
            EntryOrder::LeftToRight => EntryOrder::OnesFirst,
        }
    }
}

/// Answer row for the current problem. Lives exactly as long as the problem.
pub struct AttemptState {
    pub cells: Vec<DigitCell>,
    pub cursor: usize,
    pub entry_order: EntryOrder,
    pub submitted: bool,
    pub feedback: Vec<Feedback>,
    pub is_wholly_correct: bool,
    /// Set once the problem has counted toward session stats; survives `reset`.
    pub scored: bool,
    pub started_at: Instant,
    pub submitted_at: Option<Instant>,
}

impl AttemptState {
    pub fn new(width: usize, entry_order: EntryOrder) -> Self {
        Self {
            cells: vec![DigitCell::Empty; width],
            cursor: start_cursor(width, entry_order),
            entry_order,
            submitted: false,
            feedback: vec![Feedback::Unset; width],
            is_wholly_correct: false,
            scored: false,
            started_at: Instant::now(),
            submitted_at: None,
        }
    }

    pub fn width(&self) -> usize {
        self.cells.len()
    }

    pub fn has_input(&self) -> bool {
        self.cells.iter().any(|c| !c.is_empty())
    }

    pub fn apply_verdict(&mut self, verdict: &Verdict) {
        self.submitted = true;
        self.submitted_at = Some(Instant::now());
        self.is_wholly_correct = verdict.is_wholly_correct;
        // Verdict feedback is right-justified; keep the rightmost `width` entries.
        let skip = verdict.feedback.len().saturating_sub(self.width());
        let pad = self.width().saturating_sub(verdict.feedback.len());
        self.feedback = std::iter::repeat_n(Feedback::Unset, pad)
            .chain(verdict.feedback[skip..].iter().copied())
            .collect();
    }

    /// Clears the row for another go at the same problem.
    pub fn reset(&mut self) {
        let width = self.width();
        self.cells = vec![DigitCell::Empty; width];
        self.cursor = start_cursor(width, self.entry_order);
        self.submitted = false;
        self.feedback = vec![Feedback::Unset; width];
        self.is_wholly_correct = false;
        self.submitted_at = None;
    }

    pub fn elapsed_secs(&self) -> f64 {
        match self.submitted_at {
            Some(end) => end.duration_since(self.started_at).as_secs_f64(),
            None => self.started_at.elapsed().as_secs_f64(),
        }
    }

    /// Cursor index after a digit lands, clamped to the row.
    pub(crate) fn advanced_cursor(&self) -> usize {
        match self.entry_order {
            EntryOrder::OnesFirst => self.cursor.saturating_sub(1),
            EntryOrder::LeftToRight => (self.cursor + 1).min(self.width().saturating_sub(1)),
        }
    }

    /// Cursor index one step back against the entry direction.
    pub(crate) fn retreated_cursor(&self) -> usize {
        match self.entry_order {
            EntryOrder::OnesFirst => (self.cursor + 1).min(self.width().saturating_sub(1)),
            EntryOrder::LeftToRight => self.cursor.saturating_sub(1),
        }
    }
}

fn start_cursor(width: usize, order: EntryOrder) -> usize {
    match order {
        EntryOrder::OnesFirst => width.saturating_sub(1),
        EntryOrder::LeftToRight => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_attempt_is_blank() {
        let attempt = AttemptState::new(4, EntryOrder::OnesFirst);
        assert_eq!(attempt.width(), 4);
        assert_eq!(attempt.cursor, 3);
        assert!(!attempt.has_input());
        assert!(!attempt.submitted);
        assert!(attempt.feedback.iter().all(|f| *f == Feedback::Unset));
    }

    #[test]
    fn test_left_to_right_starts_at_first_cell() {
        let attempt = AttemptState::new(3, EntryOrder::LeftToRight);
        assert_eq!(attempt.cursor, 0);
    }

    #[test]
    fn test_reset_keeps_scored_flag() {
        let mut attempt = AttemptState::new(3, EntryOrder::OnesFirst);
        attempt.cells[2] = DigitCell::Digit(5);
        attempt.scored = true;
        attempt.apply_verdict(&Verdict {
            user_value: 5,
            is_wholly_correct: false,
            feedback: vec![Feedback::Unset, Feedback::Unset, Feedback::Incorrect],
        });
        attempt.reset();
        assert!(attempt.scored);
        assert!(!attempt.submitted);
        assert!(!attempt.has_input());
        assert_eq!(attempt.cursor, 2);
    }

    #[test]
    fn test_apply_verdict_pads_short_feedback() {
        let mut attempt = AttemptState::new(4, EntryOrder::OnesFirst);
        attempt.apply_verdict(&Verdict {
            user_value: 734,
            is_wholly_correct: true,
            feedback: vec![Feedback::Correct; 3],
        });
        assert_eq!(
            attempt.feedback,
            vec![
                Feedback::Unset,
                Feedback::Correct,
                Feedback::Correct,
                Feedback::Correct
            ]
        );
    }
}
