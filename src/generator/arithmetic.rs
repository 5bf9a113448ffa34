use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::engine::problem::{Difficulty, Operation, Problem};
use crate::generator::ProblemGenerator;

/// Uniform operand draws from an injected RNG.
///
/// Additions draw both operands independently from the class range, so sums may
/// overflow into an extra digit. Subtractions draw the subtrahend from
/// `min..=operand1`, which keeps the result non-negative and within `d` digits.
pub struct RandomProblemGenerator {
    rng: SmallRng,
}

impl RandomProblemGenerator {
    pub fn new(rng: SmallRng) -> Self {
        Self { rng }
    }

    pub fn seeded(seed: u64) -> Self {
        Self::new(SmallRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(SmallRng::from_entropy())
    }
}

impl ProblemGenerator for RandomProblemGenerator {
    fn generate(&mut self, difficulty: Difficulty, operation: Operation) -> Problem {
        let (min, max) = difficulty.bounds();
        let operand1 = self.rng.gen_range(min..=max);
        let operand2 = match operation {
            Operation::Addition => self.rng.gen_range(min..=max),
            Operation::Subtraction => self.rng.gen_range(min..=operand1),
        };
        tracing::debug!(
            operand1,
            operand2,
            operation = operation.as_str(),
            difficulty = difficulty.as_str(),
            "generated problem"
        );
        Problem::from_draw(operand1, operand2, operation, difficulty)
    }
}
