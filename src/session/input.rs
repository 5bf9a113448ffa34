use crate::engine::evaluate::DigitCell;
use crate::error::{PracticeError, Result};
use crate::session::attempt::AttemptState;

/// Input boundary: anything outside `0-9` is refused here and never stored.
pub fn parse_digit(ch: char) -> Result<u8> {
    ch.to_digit(10)
        .map(|d| d as u8)
        .ok_or(PracticeError::NonDigitInput(ch))
}

pub fn process_digit(attempt: &mut AttemptState, ch: char) -> Result<()> {
    let digit = parse_digit(ch)?;
    if attempt.submitted || attempt.cells.is_empty() {
        return Ok(());
    }
    attempt.cells[attempt.cursor] = DigitCell::Digit(digit);
    attempt.cursor = attempt.advanced_cursor();
    Ok(())
}

/// Clears the cell under the cursor, or steps back and clears that one.
pub fn process_backspace(attempt: &mut AttemptState) {
    if attempt.submitted || attempt.cells.is_empty() {
        return;
    }
    if attempt.cells[attempt.cursor].is_empty() {
        attempt.cursor = attempt.retreated_cursor();
    }
    attempt.cells[attempt.cursor] = DigitCell::Empty;
}

pub fn move_cursor_left(attempt: &mut AttemptState) {
    if !attempt.submitted {
        attempt.cursor = attempt.cursor.saturating_sub(1);
    }
}

pub fn move_cursor_right(attempt: &mut AttemptState) {
    if !attempt.submitted {
        attempt.cursor = (attempt.cursor + 1).min(attempt.width().saturating_sub(1));
    }
}
