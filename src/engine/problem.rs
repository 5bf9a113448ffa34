use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::engine::regrouping::digit_count;
use crate::error::{PracticeError, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Difficulty {
    #[serde(rename = "2digit")]
    TwoDigit,
    #[serde(rename = "3digit")]
    ThreeDigit,
    #[serde(rename = "4digit")]
    FourDigit,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [
        Difficulty::TwoDigit,
        Difficulty::ThreeDigit,
        Difficulty::FourDigit,
    ];

    pub fn digits(self) -> u32 {
        match self {
            Difficulty::TwoDigit => 2,
            Difficulty::ThreeDigit => 3,
            Difficulty::FourDigit => 4,
        }
    }

    /// Inclusive operand range for this class: `10^(d-1) ..= 10^d - 1`.
    pub fn bounds(self) -> (u32, u32) {
        let d = self.digits();
        (10u32.pow(d - 1), 10u32.pow(d) - 1)
    }

    pub fn label(self) -> &'static str {
        match self {
            Difficulty::TwoDigit => "2-Digit",
            Difficulty::ThreeDigit => "3-Digit",
            Difficulty::FourDigit => "4-Digit",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::TwoDigit => "2digit",
            Difficulty::ThreeDigit => "3digit",
            Difficulty::FourDigit => "4digit",
        }
    }

    pub fn harder(self) -> Self {
        match self {
            Difficulty::TwoDigit => Difficulty::ThreeDigit,
            _ => Difficulty::FourDigit,
        }
    }

    pub fn easier(self) -> Self {
        match self {
            Difficulty::FourDigit => Difficulty::ThreeDigit,
            _ => Difficulty::TwoDigit,
        }
    }
}

impl TryFrom<u32> for Difficulty {
    type Error = PracticeError;

    fn try_from(digits: u32) -> Result<Self> {
        match digits {
            2 => Ok(Difficulty::TwoDigit),
            3 => Ok(Difficulty::ThreeDigit),
            4 => Ok(Difficulty::FourDigit),
            other => Err(PracticeError::InvalidDifficulty(other)),
        }
    }
}

/// Also the `--operation` value on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Addition,
    Subtraction,
}

impl Operation {
    pub fn symbol(self) -> char {
        match self {
            Operation::Addition => '+',
            Operation::Subtraction => '\u{2212}',
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Operation::Addition => "Addition",
            Operation::Subtraction => "Subtraction",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Operation::Addition => "addition",
            Operation::Subtraction => "subtraction",
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            Operation::Addition => Operation::Subtraction,
            Operation::Subtraction => Operation::Addition,
        }
    }
}

/// A single arithmetic problem. Immutable once built; superseded, never edited.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Problem {
    operand1: u32,
    operand2: u32,
    operation: Operation,
    difficulty: Difficulty,
}

impl Problem {
    /// Operands outside the difficulty class are accepted so hand-built problems
    /// (e.g. `500 + 0`) can be analyzed; only a negative difference is refused.
    pub fn new(
        operand1: u32,
        operand2: u32,
        operation: Operation,
        difficulty: Difficulty,
    ) -> Result<Self> {
        if operation == Operation::Subtraction && operand1 < operand2 {
            return Err(PracticeError::NegativeDifference {
                minuend: operand1,
                subtrahend: operand2,
            });
        }
        Ok(Self {
            operand1,
            operand2,
            operation,
            difficulty,
        })
    }

    /// For generators that already drew `operand2 <= operand1` on subtraction.
    pub(crate) fn from_draw(
        operand1: u32,
        operand2: u32,
        operation: Operation,
        difficulty: Difficulty,
    ) -> Self {
        debug_assert!(operation == Operation::Addition || operand1 >= operand2);
        Self {
            operand1,
            operand2,
            operation,
            difficulty,
        }
    }

    pub fn operand1(&self) -> u32 {
        self.operand1
    }

    pub fn operand2(&self) -> u32 {
        self.operand2
    }

    pub fn operation(&self) -> Operation {
        self.operation
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn correct_answer(&self) -> u32 {
        match self.operation {
            Operation::Addition => self.operand1 + self.operand2,
            Operation::Subtraction => self.operand1 - self.operand2,
        }
    }

    /// Number of operand columns: the class width, widened if a hand-built
    /// operand does not fit.
    pub fn column_count(&self) -> usize {
        (self.difficulty.digits() as usize)
            .max(digit_count(self.operand1))
            .max(digit_count(self.operand2))
    }

    /// Answer cells offered to the learner. Additions get one extra cell so an
    /// overflow digit has somewhere to go.
    pub fn answer_width(&self) -> usize {
        match self.operation {
            Operation::Addition => self.column_count() + 1,
            Operation::Subtraction => self.column_count(),
        }
    }

    /// Both operands have exactly `d` digits.
    pub fn has_class_digits(&self) -> bool {
        let (min, max) = self.difficulty.bounds();
        (min..=max).contains(&self.operand1) && (min..=max).contains(&self.operand2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_cli_names_match_config_tags() {
        for op in [Operation::Addition, Operation::Subtraction] {
            assert_eq!(Operation::from_str(op.as_str(), false), Ok(op));
        }
        assert!(Operation::from_str("multiply", false).is_err());
    }

    #[test]
    fn test_difficulty_bounds() {
        assert_eq!(Difficulty::TwoDigit.bounds(), (10, 99));
        assert_eq!(Difficulty::ThreeDigit.bounds(), (100, 999));
        assert_eq!(Difficulty::FourDigit.bounds(), (1000, 9999));
    }

    #[test]
    fn test_difficulty_from_digit_count() {
        assert_eq!(Difficulty::try_from(3), Ok(Difficulty::ThreeDigit));
        assert_eq!(
            Difficulty::try_from(5),
            Err(PracticeError::InvalidDifficulty(5))
        );
        assert_eq!(
            Difficulty::try_from(1),
            Err(PracticeError::InvalidDifficulty(1))
        );
    }

    #[test]
    fn test_difficulty_serde_uses_short_tags() {
        let json = serde_json::to_string(&Difficulty::FourDigit).unwrap();
        assert_eq!(json, "\"4digit\"");
        let back: Difficulty = serde_json::from_str("\"2digit\"").unwrap();
        assert_eq!(back, Difficulty::TwoDigit);
    }

    #[test]
    fn test_subtraction_rejects_negative_result() {
        let err = Problem::new(17, 42, Operation::Subtraction, Difficulty::TwoDigit).unwrap_err();
        assert_eq!(
            err,
            PracticeError::NegativeDifference {
                minuend: 17,
                subtrahend: 42
            }
        );
    }

    #[test]
    fn test_answer_width_leaves_room_for_overflow() {
        let add = Problem::new(999, 999, Operation::Addition, Difficulty::ThreeDigit).unwrap();
        assert_eq!(add.answer_width(), 4);
        let sub = Problem::new(999, 1, Operation::Subtraction, Difficulty::ThreeDigit).unwrap();
        assert_eq!(sub.answer_width(), 3);
    }

    #[test]
    fn test_hand_built_problem_outside_class() {
        let p = Problem::new(500, 0, Operation::Addition, Difficulty::ThreeDigit).unwrap();
        assert!(!p.has_class_digits());
        assert_eq!(p.column_count(), 3);
        assert_eq!(p.correct_answer(), 500);
    }
}
