use ratatui::layout::{Constraint, Layout, Rect};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayoutTier {
    Wide,   // ≥90 cols: problem + stats sidebar
    Narrow, // <90 cols: problem only, stats folded into the header
}

impl LayoutTier {
    pub fn from_area(area: Rect) -> Self {
        if area.width >= 90 {
            LayoutTier::Wide
        } else {
            LayoutTier::Narrow
        }
    }

    pub fn show_sidebar(&self) -> bool {
        *self == LayoutTier::Wide
    }

    pub fn show_tips(&self, height: u16) -> bool {
        height >= 30
    }
}

pub struct AppLayout {
    pub header: Rect,
    pub main: Rect,
    pub sidebar: Option<Rect>,
    pub footer: Rect,
    pub tier: LayoutTier,
}

impl AppLayout {
    /// `footer_lines` comes from `pack_hint_lines` for the current width.
    pub fn new(area: Rect, footer_lines: u16) -> Self {
        let tier = LayoutTier::from_area(area);

        let [header, body, footer] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(10),
            Constraint::Length(footer_lines.max(1)),
        ])
        .areas(area);

        let (main, sidebar) = if tier.show_sidebar() {
            let [main, sidebar] =
                Layout::horizontal([Constraint::Percentage(65), Constraint::Percentage(35)])
                    .areas(body);
            (main, Some(sidebar))
        } else {
            (body, None)
        };

        Self {
            header,
            main,
            sidebar,
            footer,
            tier,
        }
    }
}

/// Greedily packs key hints into as few lines of `width` as possible. A hint
/// wider than `width` still gets a line of its own.
pub fn pack_hint_lines(hints: &[&str], width: usize) -> Vec<String> {
    const SEPARATOR: &str = "  ";

    if width == 0 {
        return Vec::new();
    }

    let mut lines: Vec<String> = Vec::new();
    for hint in hints.iter().copied().filter(|h| !h.is_empty()) {
        match lines.last_mut() {
            Some(line)
                if line.chars().count() + SEPARATOR.len() + hint.chars().count() <= width =>
            {
                line.push_str(SEPARATOR);
                line.push_str(hint);
            }
            _ => lines.push(format!(" {hint}")),
        }
    }
    lines
}

/// Centers `len` (clamped to `avail`) inside the span starting at `start`.
fn center_span(start: u16, avail: u16, len: u16) -> (u16, u16) {
    let len = len.min(avail);
    (start.saturating_add((avail - len) / 2), len)
}

/// A popup rectangle of the given percentages, never smaller than 48x14 unless
/// the area itself is.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    const MIN_WIDTH: u16 = 48;
    const MIN_HEIGHT: u16 = 14;

    let want_w = (u32::from(area.width) * u32::from(percent_x.min(100)) / 100) as u16;
    let want_h = (u32::from(area.height) * u32::from(percent_y.min(100)) / 100) as u16;

    let (x, width) = center_span(area.x, area.width, want_w.max(MIN_WIDTH));
    let (y, height) = center_span(area.y, area.height, want_h.max(MIN_HEIGHT));
    Rect::new(x, y, width, height)
}
