use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::{Block, Widget};

use crate::engine::stats::MasteryBand;
use crate::ui::theme::Theme;

/// One-line mastery gauge, filled in the band's colour.
pub struct MasteryBar<'a> {
    pub label: String,
    pub percent: u32,
    pub detail: Option<String>,
    pub theme: &'a Theme,
}

impl<'a> MasteryBar<'a> {
    pub fn new(label: &str, percent: u32, theme: &'a Theme) -> Self {
        Self {
            label: label.to_string(),
            percent: percent.min(100),
            detail: None,
            theme,
        }
    }

    /// Shown in the bar instead of the bare percentage, e.g. "3/4".
    pub fn detail(mut self, detail: String) -> Self {
        self.detail = Some(detail);
        self
    }
}

fn filled_width(percent: u32, width: u16) -> u16 {
    ((u32::from(width) * percent.min(100)) / 100) as u16
}

impl Widget for MasteryBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(format!(" {} ", self.label))
            .border_style(Style::default().fg(colors.border()));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let fill = colors.band(MasteryBand::from_percent(self.percent));
        let filled = filled_width(self.percent, inner.width);
        let label = match &self.detail {
            Some(detail) => format!("{}% ({detail})", self.percent),
            None => format!("{}%", self.percent),
        };

        for x in inner.x..inner.x + inner.width {
            let style = if x < inner.x + filled {
                Style::default().fg(colors.bg()).bg(fill)
            } else {
                Style::default().fg(colors.fg()).bg(colors.bar_empty())
            };
            buf[(x, inner.y)].set_style(style);
        }

        let label_x = inner.x + (inner.width.saturating_sub(label.len() as u16)) / 2;
        buf.set_string(label_x, inner.y, &label, Style::default().fg(colors.fg()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filled_width_scales_and_clamps() {
        assert_eq!(filled_width(0, 20), 0);
        assert_eq!(filled_width(50, 20), 10);
        assert_eq!(filled_width(100, 20), 20);
        assert_eq!(filled_width(250, 20), 20);
    }

    #[test]
    fn test_render_fills_band_colour() {
        let theme = Theme::default();
        let area = Rect::new(0, 0, 12, 3);
        let mut buf = Buffer::empty(area);
        MasteryBar::new("2-Digit", 100, &theme).render(area, &mut buf);
        let fill = theme.colors.band(MasteryBand::Strong);
        assert_eq!(buf[(1, 1)].bg, fill);
        assert_eq!(buf[(10, 1)].bg, fill);
    }
}
