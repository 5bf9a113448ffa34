pub mod arithmetic;

use crate::engine::problem::{Difficulty, Operation, Problem};
use crate::error::Result;

pub use arithmetic::RandomProblemGenerator;

pub trait ProblemGenerator {
    fn generate(&mut self, difficulty: Difficulty, operation: Operation) -> Problem;

    /// Same as `generate`, for callers holding a raw digit count.
    fn generate_for_digits(&mut self, digits: u32, operation: Operation) -> Result<Problem> {
        let difficulty = Difficulty::try_from(digits)?;
        Ok(self.generate(difficulty, operation))
    }
}
