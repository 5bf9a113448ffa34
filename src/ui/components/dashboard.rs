use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::engine::problem::Difficulty;
use crate::engine::stats::MasteryBand;
use crate::session::result::SessionSummary;
use crate::ui::theme::Theme;

const RECENT_ROWS: usize = 8;

/// End-of-session overview: totals, per-difficulty mastery, recent problems.
pub struct Dashboard<'a> {
    pub summary: &'a SessionSummary,
    pub theme: &'a Theme,
}

impl<'a> Dashboard<'a> {
    pub fn new(summary: &'a SessionSummary, theme: &'a Theme) -> Self {
        Self { summary, theme }
    }
}

impl Widget for Dashboard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let stats = &self.summary.stats;

        let block = Block::bordered()
            .title(" Session Summary ")
            .border_style(Style::default().fg(colors.accent()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Length(4),
                Constraint::Length(Difficulty::ALL.len() as u16 + 1),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(inner);

        let title = Paragraph::new(Line::from(Span::styled(
            "Results",
            Style::default()
                .fg(colors.accent())
                .add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center);
        title.render(layout[0], buf);

        let acc_color = colors.band(MasteryBand::from_percent(self.summary.accuracy_percent));
        let totals = vec![
            Line::from(vec![
                Span::styled("  Score:    ", Style::default().fg(colors.fg())),
                Span::styled(
                    format!("{}/{}", stats.score_count, stats.attempt_count),
                    Style::default()
                        .fg(colors.accent())
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(vec![
                Span::styled("  Accuracy: ", Style::default().fg(colors.fg())),
                Span::styled(
                    format!("{}%", self.summary.accuracy_percent),
                    Style::default().fg(acc_color).add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(vec![
                Span::styled("  Best streak: ", Style::default().fg(colors.fg())),
                Span::styled(
                    format!("{}", stats.best_streak),
                    Style::default().fg(colors.success()),
                ),
            ]),
        ];
        Paragraph::new(totals).render(layout[1], buf);

        let mut mastery = vec![Line::from(Span::styled(
            "  Mastery",
            Style::default().fg(colors.muted()),
        ))];
        for difficulty in Difficulty::ALL {
            let t = stats.totals(difficulty);
            let percent = stats.mastery_percent(difficulty);
            mastery.push(Line::from(vec![
                Span::styled(
                    format!("  {:<8}", difficulty.label()),
                    Style::default().fg(colors.fg()),
                ),
                Span::styled(
                    format!("{percent:>3}%"),
                    Style::default().fg(colors.band(MasteryBand::from_percent(percent))),
                ),
                Span::styled(
                    format!("  ({}/{})", t.solved, t.total),
                    Style::default().fg(colors.muted()),
                ),
            ]));
        }
        Paragraph::new(mastery).render(layout[2], buf);

        let recent: Vec<Line> = self
            .summary
            .history
            .iter()
            .rev()
            .take(RECENT_ROWS)
            .map(|r| {
                let mark = if r.correct {
                    Span::styled("  \u{2713} ", Style::default().fg(colors.success()))
                } else {
                    Span::styled("  \u{2717} ", Style::default().fg(colors.error()))
                };
                Line::from(vec![
                    mark,
                    Span::styled(r.expression(), Style::default().fg(colors.fg())),
                ])
            })
            .collect();
        Paragraph::new(recent).render(layout[3], buf);

        let help = Paragraph::new(Line::from(vec![
            Span::styled("  [Enter] Keep practicing  ", Style::default().fg(colors.accent())),
            Span::styled("[q] Quit", Style::default().fg(colors.accent())),
        ]));
        help.render(layout[4], buf);
    }
}
