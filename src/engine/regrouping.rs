use serde::{Deserialize, Serialize};

use crate::engine::problem::{Operation, Problem};

/// Column-by-column breakdown of a problem, most-significant digit first.
///
/// `carry_or_borrow[i]` is 1 when column `i` produced a carry (addition) or had
/// to borrow (subtraction). A carry out of column 0 is never recorded; it shows
/// up as the extra leading digit of `answer_digits` instead.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DigitTrace {
    pub correct_answer: u32,
    pub answer_digits: Vec<u8>,
    pub carry_or_borrow: Vec<u8>,
}

impl DigitTrace {
    pub fn regroup_count(&self) -> usize {
        self.carry_or_borrow.iter().filter(|&&c| c == 1).count()
    }

    pub fn has_regrouping(&self) -> bool {
        self.regroup_count() > 0
    }

    /// Whether `column` receives a carry from the column to its right.
    pub fn carry_into(&self, column: usize) -> bool {
        self.carry_or_borrow.get(column + 1) == Some(&1)
    }

    pub fn regrouped_at(&self, column: usize) -> bool {
        self.carry_or_borrow.get(column) == Some(&1)
    }

    /// The answer needs more digits than the operands have columns.
    pub fn overflows(&self) -> bool {
        self.answer_digits.len() > self.carry_or_borrow.len()
    }
}

/// Number of decimal digits needed for `n` (zero takes one).
pub fn digit_count(n: u32) -> usize {
    if n == 0 {
        return 1;
    }
    (n.ilog10() + 1) as usize
}

/// Decimal digits of `n`, most significant first, left-padded with zeros to
/// `width`. Never truncates.
pub fn digits_of(n: u32, width: usize) -> Vec<u8> {
    let len = digit_count(n).max(width);
    let mut digits = vec![0u8; len];
    let mut rest = n;
    for slot in digits.iter_mut().rev() {
        *slot = (rest % 10) as u8;
        rest /= 10;
    }
    digits
}

pub fn analyze(problem: &Problem) -> DigitTrace {
    let width = problem.column_count();
    let top = digits_of(problem.operand1(), width);
    let bottom = digits_of(problem.operand2(), width);

    let carry_or_borrow = match problem.operation() {
        Operation::Addition => carry_trace(&top, &bottom),
        Operation::Subtraction => borrow_trace(&top, &bottom),
    };

    let correct_answer = problem.correct_answer();
    DigitTrace {
        correct_answer,
        answer_digits: digits_of(correct_answer, 1),
        carry_or_borrow,
    }
}

fn carry_trace(top: &[u8], bottom: &[u8]) -> Vec<u8> {
    let mut trace = vec![0u8; top.len()];
    let mut carry = 0u8;
    for i in (0..top.len()).rev() {
        let sum = top[i] + bottom[i] + carry;
        carry = u8::from(sum >= 10);
        if i > 0 {
            trace[i] = carry;
        }
    }
    trace
}

fn borrow_trace(top: &[u8], bottom: &[u8]) -> Vec<u8> {
    let mut trace = vec![0u8; top.len()];
    let mut working: Vec<i16> = top.iter().map(|&d| i16::from(d)).collect();
    for i in (0..working.len()).rev() {
        if working[i] < i16::from(bottom[i]) {
            trace[i] = 1;
            working[i] += 10;
            if i > 0 {
                working[i - 1] -= 1;
            }
        }
    }
    trace
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::problem::Difficulty;

    fn problem(a: u32, b: u32, op: Operation, d: Difficulty) -> Problem {
        Problem::new(a, b, op, d).unwrap()
    }

    #[test]
    fn test_digit_helpers() {
        assert_eq!(digit_count(0), 1);
        assert_eq!(digit_count(9), 1);
        assert_eq!(digit_count(10), 2);
        assert_eq!(digit_count(1998), 4);
        assert_eq!(digits_of(42, 4), vec![0, 0, 4, 2]);
        assert_eq!(digits_of(12345, 3), vec![1, 2, 3, 4, 5]);
        assert_eq!(digits_of(0, 1), vec![0]);
    }

    #[test]
    fn test_addition_carries_into_tens_and_hundreds() {
        let trace = analyze(&problem(456, 278, Operation::Addition, Difficulty::ThreeDigit));
        assert_eq!(trace.correct_answer, 734);
        assert_eq!(trace.answer_digits, vec![7, 3, 4]);
        // 6+8=14 carries out of ones, 5+7+1=13 carries out of tens.
        assert_eq!(trace.carry_or_borrow, vec![0, 1, 1]);
        assert!(trace.carry_into(1));
        assert!(trace.carry_into(0));
        assert!(!trace.overflows());
    }

    #[test]
    fn test_addition_with_zero_has_no_carries() {
        let trace = analyze(&problem(500, 0, Operation::Addition, Difficulty::ThreeDigit));
        assert_eq!(trace.correct_answer, 500);
        assert_eq!(trace.answer_digits, vec![5, 0, 0]);
        assert_eq!(trace.carry_or_borrow, vec![0, 0, 0]);
        assert!(!trace.has_regrouping());
    }

    #[test]
    fn test_subtraction_borrows_at_ones() {
        let trace = analyze(&problem(42, 17, Operation::Subtraction, Difficulty::TwoDigit));
        assert_eq!(trace.correct_answer, 25);
        assert_eq!(trace.answer_digits, vec![2, 5]);
        assert_eq!(trace.carry_or_borrow, vec![0, 1]);
    }

    #[test]
    fn test_overflow_adds_leading_digit() {
        let trace = analyze(&problem(999, 999, Operation::Addition, Difficulty::ThreeDigit));
        assert_eq!(trace.correct_answer, 1998);
        assert_eq!(trace.answer_digits.len(), 4);
        assert_eq!(trace.answer_digits, vec![1, 9, 9, 8]);
        // Column 0 still carries, but that carry becomes the leading 1.
        assert_eq!(trace.carry_or_borrow, vec![0, 1, 1]);
        assert!(trace.overflows());
    }

    #[test]
    fn test_borrow_ripples_through_zero() {
        let trace = analyze(&problem(1000, 1, Operation::Subtraction, Difficulty::FourDigit));
        assert_eq!(trace.correct_answer, 999);
        assert_eq!(trace.answer_digits, vec![9, 9, 9]);
        assert_eq!(trace.carry_or_borrow, vec![0, 1, 1, 1]);
    }

    #[test]
    fn test_borrow_from_reduced_digit() {
        // 301 - 102: ones borrow leaves tens at -1, which must borrow again.
        let trace = analyze(&problem(301, 102, Operation::Subtraction, Difficulty::ThreeDigit));
        assert_eq!(trace.correct_answer, 199);
        assert_eq!(trace.carry_or_borrow, vec![0, 1, 1]);
    }

    #[test]
    fn test_equal_operands_subtract_to_zero() {
        let trace = analyze(&problem(77, 77, Operation::Subtraction, Difficulty::TwoDigit));
        assert_eq!(trace.correct_answer, 0);
        assert_eq!(trace.answer_digits, vec![0]);
        assert!(!trace.has_regrouping());
    }

    #[test]
    fn test_analyze_is_pure() {
        let p = problem(4789, 5678, Operation::Addition, Difficulty::FourDigit);
        assert_eq!(analyze(&p), analyze(&p));
    }
}
