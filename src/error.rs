use thiserror::Error;

pub type Result<T> = std::result::Result<T, PracticeError>;

/// Rejections surfaced to the presentation layer. None of these change state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PracticeError {
    #[error("unsupported digit count {0} (expected 2, 3 or 4)")]
    InvalidDifficulty(u32),

    #[error("answer has unfilled digit positions")]
    IncompleteAnswer,

    #[error("answer has {digits} digits, at most {max} expected")]
    AnswerTooLong { digits: usize, max: usize },

    #[error("'{0}' is not a digit")]
    NonDigitInput(char),

    #[error("{minuend} - {subtrahend} would be negative")]
    NegativeDifference { minuend: u32, subtrahend: u32 },
}
