pub mod evaluate;
pub mod problem;
pub mod regrouping;
pub mod stats;

pub use evaluate::{DigitCell, Feedback, Verdict, evaluate};
pub use problem::{Difficulty, Operation, Problem};
pub use regrouping::{DigitTrace, analyze};
pub use stats::SessionStats;
