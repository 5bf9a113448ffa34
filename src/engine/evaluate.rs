use serde::{Deserialize, Serialize};

use crate::engine::regrouping::DigitTrace;
use crate::error::{PracticeError, Result};

/// One answer cell. Only `0-9` ever gets in; see `session::input::parse_digit`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DigitCell {
    Digit(u8),
    #[default]
    Empty,
}

impl DigitCell {
    pub fn digit(self) -> Option<u8> {
        match self {
            DigitCell::Digit(d) => Some(d),
            DigitCell::Empty => None,
        }
    }

    pub fn is_empty(self) -> bool {
        self == DigitCell::Empty
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Feedback {
    Correct,
    Incorrect,
    Unset,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Verdict {
    pub user_value: u64,
    pub is_wholly_correct: bool,
    /// Right-justified against the answer; same length as the wider of the
    /// entered row and `answer_digits`.
    pub feedback: Vec<Feedback>,
}

/// Checks an entered row against the trace.
///
/// Blank cells are only allowed as a leading run (unused high columns). A blank
/// anywhere else, or a fully blank row, is `IncompleteAnswer`. Leading zeros are
/// free, but a value more than one digit wider than the answer is `AnswerTooLong`.
pub fn evaluate(trace: &DigitTrace, entered: &[DigitCell]) -> Result<Verdict> {
    let leading_blanks = entered.iter().take_while(|c| c.is_empty()).count();
    let significant = &entered[leading_blanks..];
    if significant.is_empty() || significant.iter().any(|c| c.is_empty()) {
        return Err(PracticeError::IncompleteAnswer);
    }

    let value_digits: Vec<u8> = significant
        .iter()
        .filter_map(|c| c.digit())
        .skip_while(|&d| d == 0)
        .collect();
    let max_digits = trace.answer_digits.len() + 1;
    if value_digits.len() > max_digits {
        return Err(PracticeError::AnswerTooLong {
            digits: value_digits.len(),
            max: max_digits,
        });
    }
    // A u32 answer has at most 10 digits, so 11 always fit in a u64.
    let user_value = value_digits
        .iter()
        .fold(0u64, |acc, &d| acc * 10 + u64::from(d));
    let is_wholly_correct = user_value == u64::from(trace.correct_answer);

    let width = entered.len().max(trace.answer_digits.len());
    let entered_pad = width - entered.len();
    let expected_pad = width - trace.answer_digits.len();

    let feedback = (0..width)
        .map(|i| {
            let got = i.checked_sub(entered_pad).and_then(|j| entered[j].digit());
            let want = i
                .checked_sub(expected_pad)
                .map(|j| trace.answer_digits[j]);
            match (got, want) {
                (Some(g), Some(w)) if g == w => Feedback::Correct,
                (Some(0), None) => Feedback::Correct,
                (None, None) => Feedback::Unset,
                _ => Feedback::Incorrect,
            }
        })
        .collect();

    Ok(Verdict {
        user_value,
        is_wholly_correct,
        feedback,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::problem::{Difficulty, Operation, Problem};
    use crate::engine::regrouping::analyze;

    fn cells(digits: &[u8]) -> Vec<DigitCell> {
        digits.iter().map(|&d| DigitCell::Digit(d)).collect()
    }

    fn trace_456_plus_278() -> DigitTrace {
        analyze(&Problem::new(456, 278, Operation::Addition, Difficulty::ThreeDigit).unwrap())
    }

    #[test]
    fn test_exact_answer_is_correct() {
        let verdict = evaluate(&trace_456_plus_278(), &cells(&[7, 3, 4])).unwrap();
        assert!(verdict.is_wholly_correct);
        assert_eq!(verdict.user_value, 734);
        assert_eq!(
            verdict.feedback,
            vec![Feedback::Correct, Feedback::Correct, Feedback::Correct]
        );
    }

    #[test]
    fn test_wrong_ones_digit() {
        let verdict = evaluate(&trace_456_plus_278(), &cells(&[7, 3, 5])).unwrap();
        assert!(!verdict.is_wholly_correct);
        assert_eq!(
            verdict.feedback,
            vec![Feedback::Correct, Feedback::Correct, Feedback::Incorrect]
        );
    }

    #[test]
    fn test_leading_blank_cell_is_unset() {
        let mut row = vec![DigitCell::Empty];
        row.extend(cells(&[7, 3, 4]));
        let verdict = evaluate(&trace_456_plus_278(), &row).unwrap();
        assert!(verdict.is_wholly_correct);
        assert_eq!(verdict.feedback[0], Feedback::Unset);
        assert_eq!(verdict.feedback.len(), 4);
    }

    #[test]
    fn test_leading_zero_is_accepted() {
        let verdict = evaluate(&trace_456_plus_278(), &cells(&[0, 7, 3, 4])).unwrap();
        assert!(verdict.is_wholly_correct);
        assert!(verdict.feedback.iter().all(|f| *f == Feedback::Correct));
    }

    #[test]
    fn test_extra_leading_digit_is_incorrect() {
        let verdict = evaluate(&trace_456_plus_278(), &cells(&[1, 7, 3, 4])).unwrap();
        assert!(!verdict.is_wholly_correct);
        assert_eq!(verdict.feedback[0], Feedback::Incorrect);
        assert_eq!(&verdict.feedback[1..], &[Feedback::Correct; 3]);
    }

    #[test]
    fn test_overlong_row_is_rejected() {
        let row = vec![DigitCell::Digit(9); 21];
        assert_eq!(
            evaluate(&trace_456_plus_278(), &row),
            Err(PracticeError::AnswerTooLong { digits: 21, max: 4 })
        );
    }

    #[test]
    fn test_leading_zeros_do_not_count_toward_length() {
        let mut row = vec![DigitCell::Digit(0); 30];
        row.extend(cells(&[7, 3, 4]));
        let verdict = evaluate(&trace_456_plus_278(), &row).unwrap();
        assert!(verdict.is_wholly_correct);
        assert_eq!(verdict.user_value, 734);
    }

    #[test]
    fn test_value_past_u32_is_kept_whole() {
        let trace = analyze(
            &Problem::new(4_000_000_000, 294_967_295, Operation::Addition, Difficulty::FourDigit)
                .unwrap(),
        );
        assert_eq!(trace.correct_answer, u32::MAX);
        let mut row = cells(&[5]);
        row.extend(vec![DigitCell::Digit(0); 9]);
        let verdict = evaluate(&trace, &row).unwrap();
        assert_eq!(verdict.user_value, 5_000_000_000);
        assert!(!verdict.is_wholly_correct);
    }

    #[test]
    fn test_missing_overflow_digit_is_incorrect() {
        let trace =
            analyze(&Problem::new(999, 999, Operation::Addition, Difficulty::ThreeDigit).unwrap());
        let mut row = vec![DigitCell::Empty];
        row.extend(cells(&[9, 9, 8]));
        let verdict = evaluate(&trace, &row).unwrap();
        assert!(!verdict.is_wholly_correct);
        assert_eq!(verdict.feedback[0], Feedback::Incorrect);
    }

    #[test]
    fn test_gap_in_answer_is_incomplete() {
        let row = vec![DigitCell::Digit(7), DigitCell::Empty, DigitCell::Digit(4)];
        assert_eq!(
            evaluate(&trace_456_plus_278(), &row),
            Err(PracticeError::IncompleteAnswer)
        );
    }

    #[test]
    fn test_trailing_blank_is_incomplete() {
        let row = vec![DigitCell::Digit(7), DigitCell::Digit(3), DigitCell::Empty];
        assert_eq!(
            evaluate(&trace_456_plus_278(), &row),
            Err(PracticeError::IncompleteAnswer)
        );
    }

    #[test]
    fn test_blank_row_is_incomplete() {
        let row = vec![DigitCell::Empty; 4];
        assert_eq!(
            evaluate(&trace_456_plus_278(), &row),
            Err(PracticeError::IncompleteAnswer)
        );
    }

    #[test]
    fn test_wholly_correct_matches_feedback() {
        let trace = trace_456_plus_278();
        for row in [
            cells(&[7, 3, 4]),
            cells(&[7, 4, 3]),
            cells(&[0, 0, 7, 3, 4]),
            cells(&[1, 3, 4]),
        ] {
            let verdict = evaluate(&trace, &row).unwrap();
            let no_incorrect = !verdict.feedback.contains(&Feedback::Incorrect);
            assert_eq!(verdict.is_wholly_correct, no_incorrect, "row {row:?}");
        }
    }
}
