use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::engine::problem::Difficulty;
use crate::engine::stats::{MasteryBand, SessionStats};
use crate::session::result::ProblemResult;
use crate::ui::components::progress_bar::MasteryBar;
use crate::ui::theme::Theme;

pub struct StatsSidebar<'a> {
    stats: &'a SessionStats,
    last_result: Option<&'a ProblemResult>,
    theme: &'a Theme,
}

impl<'a> StatsSidebar<'a> {
    pub fn new(
        stats: &'a SessionStats,
        last_result: Option<&'a ProblemResult>,
        theme: &'a Theme,
    ) -> Self {
        Self {
            stats,
            last_result,
            theme,
        }
    }
}

fn format_elapsed(secs: i64) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

impl Widget for StatsSidebar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let sections = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(11),
                Constraint::Length(3 * Difficulty::ALL.len() as u16 + 1),
                Constraint::Min(0),
            ])
            .split(area);

        // Running totals
        {
            let accuracy = self.stats.accuracy_percent();
            let accuracy_color = colors.band(MasteryBand::from_percent(accuracy));

            let lines = vec![
                Line::from(vec![
                    Span::styled("Score:    ", Style::default().fg(colors.fg())),
                    Span::styled(
                        format!("{}/{}", self.stats.score_count, self.stats.attempt_count),
                        Style::default().fg(colors.accent()),
                    ),
                ]),
                Line::from(""),
                Line::from(vec![
                    Span::styled("Accuracy: ", Style::default().fg(colors.fg())),
                    Span::styled(
                        if self.stats.attempt_count == 0 {
                            "-".to_string()
                        } else {
                            format!("{accuracy}%")
                        },
                        Style::default().fg(accuracy_color),
                    ),
                ]),
                Line::from(""),
                Line::from(vec![
                    Span::styled("Streak:   ", Style::default().fg(colors.fg())),
                    Span::styled(
                        format!("{}", self.stats.current_streak),
                        Style::default().fg(colors.success()),
                    ),
                ]),
                Line::from(vec![
                    Span::styled("Best:     ", Style::default().fg(colors.fg())),
                    Span::styled(
                        format!("{}", self.stats.best_streak),
                        Style::default().fg(colors.accent()),
                    ),
                ]),
                Line::from(""),
                Line::from(vec![
                    Span::styled("Time:     ", Style::default().fg(colors.fg())),
                    Span::styled(
                        format_elapsed(self.stats.elapsed_secs()),
                        Style::default().fg(colors.muted()),
                    ),
                ]),
            ];

            let block = Block::bordered()
                .title(" Session ")
                .border_style(Style::default().fg(colors.border()))
                .style(Style::default().bg(colors.bg()));

            Paragraph::new(lines).block(block).render(sections[0], buf);
        }

        // Mastery per difficulty
        {
            let rows = Layout::default()
                .direction(Direction::Vertical)
                .constraints(
                    Difficulty::ALL
                        .iter()
                        .map(|_| Constraint::Length(3))
                        .collect::<Vec<_>>(),
                )
                .split(sections[1]);

            for (difficulty, row) in Difficulty::ALL.iter().zip(rows.iter()) {
                let totals = self.stats.totals(*difficulty);
                MasteryBar::new(
                    difficulty.label(),
                    self.stats.mastery_percent(*difficulty),
                    self.theme,
                )
                .detail(format!("{}/{}", totals.solved, totals.total))
                .render(*row, buf);
            }
        }

        if let Some(last) = self.last_result
            && sections[2].height >= 4
        {
            let verdict = if last.correct {
                Span::styled("correct", Style::default().fg(colors.success()))
            } else {
                Span::styled(
                    format!("answer was {}", last.correct_answer),
                    Style::default().fg(colors.error()),
                )
            };
            let lines = vec![
                Line::from(Span::styled(
                    last.expression(),
                    Style::default().fg(colors.fg()),
                )),
                Line::from(vec![
                    verdict,
                    Span::styled(
                        format!("  {:.1}s", last.elapsed_secs),
                        Style::default().fg(colors.muted()),
                    ),
                ]),
            ];

            let block = Block::bordered()
                .title(" Last Problem ")
                .border_style(Style::default().fg(colors.border()))
                .style(Style::default().bg(colors.bg()));

            Paragraph::new(lines).block(block).render(sections[2], buf);
        }
    }
}
