use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::engine::evaluate::{DigitCell, Feedback};
use crate::engine::problem::{Operation, Problem};
use crate::engine::regrouping::{DigitTrace, digits_of};
use crate::session::attempt::AttemptState;
use crate::ui::theme::Theme;

const CELL_WIDTH: usize = 4;

/// What sits in one column of one row of the worked layout.
#[derive(Clone, Debug, PartialEq, Eq)]
enum GridCell {
    Blank,
    Hint(&'static str),
    Operand(u8),
    Operator(char),
    Rule,
    Answer(usize),
}

/// Lays the problem out in right-aligned columns: optional hint row, the two
/// operands, a rule, and the answer cells. Column 0 holds the operator.
fn build_grid(
    problem: &Problem,
    trace: &DigitTrace,
    answer_width: usize,
    show_hints: bool,
) -> Vec<Vec<GridCell>> {
    let columns = problem.column_count();
    let width = answer_width.max(columns + 1);
    let operand_start = width - columns;
    let answer_start = width - answer_width;

    let operand_row = |value: u32, operator: Option<char>| -> Vec<GridCell> {
        let digits = digits_of(value, columns);
        (0..width)
            .map(|col| {
                if col >= operand_start {
                    GridCell::Operand(digits[col - operand_start])
                } else if col == 0 {
                    operator.map_or(GridCell::Blank, GridCell::Operator)
                } else {
                    GridCell::Blank
                }
            })
            .collect()
    };

    let mut rows = Vec::new();

    if show_hints {
        let hint_row = (0..width)
            .map(|col| {
                if col < operand_start {
                    // The column just left of the operands takes the final carry.
                    let takes_overflow = col + 1 == operand_start
                        && problem.operation() == Operation::Addition
                        && trace.overflows();
                    return if takes_overflow {
                        GridCell::Hint("1")
                    } else {
                        GridCell::Blank
                    };
                }
                let column = col - operand_start;
                match problem.operation() {
                    Operation::Addition if trace.carry_into(column) => GridCell::Hint("1"),
                    Operation::Subtraction if trace.regrouped_at(column) => GridCell::Hint("10"),
                    _ => GridCell::Blank,
                }
            })
            .collect();
        rows.push(hint_row);
    }

    rows.push(operand_row(problem.operand1(), None));
    rows.push(operand_row(
        problem.operand2(),
        Some(problem.operation().symbol()),
    ));
    rows.push(vec![GridCell::Rule; width]);
    rows.push(
        (0..width)
            .map(|col| {
                if col >= answer_start {
                    GridCell::Answer(col - answer_start)
                } else {
                    GridCell::Blank
                }
            })
            .collect(),
    );

    rows
}

pub struct ProblemArea<'a> {
    problem: &'a Problem,
    trace: &'a DigitTrace,
    attempt: &'a AttemptState,
    show_hints: bool,
    message: Option<&'a str>,
    theme: &'a Theme,
}

impl<'a> ProblemArea<'a> {
    pub fn new(
        problem: &'a Problem,
        trace: &'a DigitTrace,
        attempt: &'a AttemptState,
        show_hints: bool,
        theme: &'a Theme,
    ) -> Self {
        Self {
            problem,
            trace,
            attempt,
            show_hints,
            message: None,
            theme,
        }
    }

    /// A rejected action to explain under the grid.
    pub fn message(mut self, message: Option<&'a str>) -> Self {
        self.message = message;
        self
    }

    fn answer_span(&self, index: usize) -> Span<'static> {
        let colors = &self.theme.colors;
        let cell = self.attempt.cells[index];
        let text = match cell {
            DigitCell::Digit(d) => format!("{d:^CELL_WIDTH$}"),
            DigitCell::Empty => format!("{:^CELL_WIDTH$}", "_"),
        };

        let style = if self.attempt.submitted {
            match self.attempt.feedback[index] {
                Feedback::Correct => Style::default()
                    .fg(colors.digit_correct())
                    .add_modifier(Modifier::BOLD),
                Feedback::Incorrect => Style::default()
                    .fg(colors.digit_incorrect())
                    .bg(colors.digit_incorrect_bg())
                    .add_modifier(Modifier::UNDERLINED),
                Feedback::Unset => Style::default().fg(colors.cell_empty()),
            }
        } else if index == self.attempt.cursor {
            Style::default()
                .fg(colors.cell_cursor_fg())
                .bg(colors.cell_cursor_bg())
        } else if cell.is_empty() {
            Style::default().fg(colors.cell_empty())
        } else {
            Style::default().fg(colors.fg()).add_modifier(Modifier::BOLD)
        };

        Span::styled(text, style)
    }

    fn result_lines(&self) -> Vec<Line<'static>> {
        let colors = &self.theme.colors;
        if !self.attempt.submitted {
            return Vec::new();
        }
        if self.attempt.is_wholly_correct {
            vec![
                Line::from(Span::styled(
                    "Excellent work!",
                    Style::default()
                        .fg(colors.success())
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    "You solved this problem correctly!",
                    Style::default().fg(colors.success()),
                )),
            ]
        } else {
            vec![
                Line::from(Span::styled(
                    "Not quite right",
                    Style::default()
                        .fg(colors.error())
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    format!("The correct answer is {}", self.trace.correct_answer),
                    Style::default().fg(colors.error()),
                )),
            ]
        }
    }
}

impl Widget for ProblemArea<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let grid = build_grid(
            self.problem,
            self.trace,
            self.attempt.width(),
            self.show_hints,
        );

        let mut lines: Vec<Line> = vec![Line::from("")];
        for row in &grid {
            let spans: Vec<Span> = row
                .iter()
                .map(|cell| match cell {
                    GridCell::Blank => Span::raw(" ".repeat(CELL_WIDTH)),
                    GridCell::Hint(mark) => Span::styled(
                        format!("{mark:^CELL_WIDTH$}"),
                        Style::default().fg(colors.hint()),
                    ),
                    GridCell::Operand(d) => Span::styled(
                        format!("{d:^CELL_WIDTH$}"),
                        Style::default().fg(colors.operand()),
                    ),
                    GridCell::Operator(op) => Span::styled(
                        format!("{op:^CELL_WIDTH$}"),
                        Style::default()
                            .fg(colors.operator())
                            .add_modifier(Modifier::BOLD),
                    ),
                    GridCell::Rule => Span::styled(
                        "\u{2500}".repeat(CELL_WIDTH),
                        Style::default().fg(colors.fg()),
                    ),
                    GridCell::Answer(i) => self.answer_span(*i),
                })
                .collect();
            lines.push(Line::from(spans));
        }

        lines.push(Line::from(""));
        lines.extend(self.result_lines());
        if let Some(message) = self.message {
            lines.push(Line::from(Span::styled(
                message.to_string(),
                Style::default().fg(colors.warning()),
            )));
        }

        let block = Block::bordered()
            .title(" Solve the Problem ")
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));

        Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Center)
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::problem::Difficulty;
    use crate::engine::regrouping::analyze;

    fn grid_for(a: u32, b: u32, op: Operation, hints: bool) -> Vec<Vec<GridCell>> {
        let p = Problem::new(a, b, op, Difficulty::ThreeDigit).unwrap();
        let trace = analyze(&p);
        build_grid(&p, &trace, p.answer_width(), hints)
    }

    #[test]
    fn test_addition_grid_shape() {
        let grid = grid_for(456, 278, Operation::Addition, false);
        assert_eq!(grid.len(), 4);
        assert!(grid.iter().all(|row| row.len() == 4));
        assert_eq!(grid[0][0], GridCell::Blank);
        assert_eq!(grid[1][0], GridCell::Operator('+'));
        assert_eq!(
            grid[0][1..],
            [GridCell::Operand(4), GridCell::Operand(5), GridCell::Operand(6)]
        );
        assert_eq!(grid[3][0], GridCell::Answer(0));
        assert_eq!(grid[3][3], GridCell::Answer(3));
    }

    #[test]
    fn test_carry_hints_sit_above_receiving_column() {
        let grid = grid_for(456, 278, Operation::Addition, true);
        assert_eq!(
            grid[0],
            vec![
                GridCell::Blank,
                GridCell::Hint("1"),
                GridCell::Hint("1"),
                GridCell::Blank
            ]
        );
    }

    #[test]
    fn test_overflow_carry_marks_extra_column() {
        let grid = grid_for(999, 999, Operation::Addition, true);
        assert_eq!(grid[0][0], GridCell::Hint("1"));
    }

    #[test]
    fn test_subtraction_grid_has_operator_column() {
        let grid = grid_for(542, 117, Operation::Subtraction, true);
        // Three answer cells, plus a column for the operator.
        assert!(grid.iter().all(|row| row.len() == 4));
        assert_eq!(grid[2][0], GridCell::Operator('\u{2212}'));
        assert_eq!(grid[4][0], GridCell::Blank);
        assert_eq!(grid[4][1], GridCell::Answer(0));
        // Ones column borrows (2 < 7).
        assert_eq!(grid[0][3], GridCell::Hint("10"));
        assert_eq!(grid[0][2], GridCell::Blank);
    }
}
