pub mod attempt;
pub mod input;
pub mod practice;
pub mod result;
