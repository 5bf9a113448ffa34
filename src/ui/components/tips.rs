use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use crate::engine::problem::Operation;
use crate::ui::theme::Theme;

const ADDITION_TIPS: &[&str] = &[
    "Start from the rightmost column (ones place)",
    "If the sum is 10 or more, write the ones digit and carry the tens digit to the next column",
    "Continue this process for each column, remembering to add any carried numbers",
];

const SUBTRACTION_TIPS: &[&str] = &[
    "Start from the rightmost column (ones place)",
    "If the top digit is smaller than the bottom digit, borrow 10 from the next column",
    "Reduce the next column by 1 and add 10 to the current column",
    "Continue this process as needed for each column",
];

pub fn tips_for(operation: Operation) -> (&'static str, &'static [&'static str]) {
    match operation {
        Operation::Addition => ("Addition with Regrouping:", ADDITION_TIPS),
        Operation::Subtraction => ("Subtraction with Borrowing:", SUBTRACTION_TIPS),
    }
}

pub struct TipsPanel<'a> {
    operation: Operation,
    theme: &'a Theme,
}

impl<'a> TipsPanel<'a> {
    pub fn new(operation: Operation, theme: &'a Theme) -> Self {
        Self { operation, theme }
    }
}

impl Widget for TipsPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let (heading, tips) = tips_for(self.operation);

        let mut lines = vec![Line::from(Span::styled(
            heading,
            Style::default()
                .fg(colors.hint())
                .add_modifier(Modifier::BOLD),
        ))];
        lines.extend(tips.iter().map(|tip| {
            Line::from(Span::styled(
                format!("\u{2022} {tip}"),
                Style::default().fg(colors.fg()),
            ))
        }));

        let block = Block::bordered()
            .title(" Learning Tips ")
            .border_style(Style::default().fg(colors.hint()))
            .style(Style::default().bg(colors.bg()));

        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }
}
