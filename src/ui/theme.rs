use std::fs;

use ratatui::style::Color;
use rust_embed::Embed;
use serde::{Deserialize, Serialize};

use crate::engine::stats::MasteryBand;

#[derive(Embed)]
#[folder = "assets/themes/"]
struct ThemeAssets;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ThemeColors {
    pub bg: String,
    pub fg: String,
    pub operand: String,
    pub operator: String,
    pub hint: String,
    pub cell_empty: String,
    pub cell_cursor_bg: String,
    pub cell_cursor_fg: String,
    pub digit_correct: String,
    pub digit_incorrect: String,
    pub digit_incorrect_bg: String,
    pub accent: String,
    pub border: String,
    pub header_bg: String,
    pub header_fg: String,
    pub muted: String,
    pub bar_empty: String,
    pub error: String,
    pub warning: String,
    pub success: String,
}

impl Theme {
    /// User themes in `<config_dir>/regroup/themes/` shadow bundled ones.
    pub fn load(name: &str) -> Option<Self> {
        let filename = format!("{name}.toml");

        if let Some(config_dir) = dirs::config_dir() {
            let user_path = config_dir.join("regroup").join("themes").join(&filename);
            if let Ok(content) = fs::read_to_string(&user_path)
                && let Ok(theme) = toml::from_str::<Theme>(&content)
            {
                return Some(theme);
            }
        }

        let file = ThemeAssets::get(&filename)?;
        let content = std::str::from_utf8(file.data.as_ref()).ok()?;
        toml::from_str::<Theme>(content).ok()
    }

    pub fn available_themes() -> Vec<String> {
        let mut names: Vec<String> = ThemeAssets::iter()
            .filter_map(|f| f.strip_suffix(".toml").map(|n| n.to_string()))
            .collect();
        names.sort();
        names
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::load("catppuccin-mocha").unwrap_or_else(|| Self {
            name: "default".to_string(),
            colors: ThemeColors::default(),
        })
    }
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            bg: "#1e1e2e".to_string(),
            fg: "#cdd6f4".to_string(),
            operand: "#cdd6f4".to_string(),
            operator: "#cba6f7".to_string(),
            hint: "#f9e2af".to_string(),
            cell_empty: "#45475a".to_string(),
            cell_cursor_bg: "#f5e0dc".to_string(),
            cell_cursor_fg: "#1e1e2e".to_string(),
            digit_correct: "#a6e3a1".to_string(),
            digit_incorrect: "#f38ba8".to_string(),
            digit_incorrect_bg: "#45273a".to_string(),
            accent: "#cba6f7".to_string(),
            border: "#45475a".to_string(),
            header_bg: "#313244".to_string(),
            header_fg: "#cdd6f4".to_string(),
            muted: "#6c7086".to_string(),
            bar_empty: "#313244".to_string(),
            error: "#f38ba8".to_string(),
            warning: "#f9e2af".to_string(),
            success: "#a6e3a1".to_string(),
        }
    }
}

impl ThemeColors {
    /// `#rrggbb` to an RGB colour; anything else falls back to white.
    pub fn parse_color(hex: &str) -> Color {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        match u32::from_str_radix(digits, 16) {
            Ok(rgb) if digits.len() == 6 && digits.bytes().all(|b| b.is_ascii_hexdigit()) => {
                Color::from_u32(rgb)
            }
            _ => Color::White,
        }
    }

    pub fn band(&self, band: MasteryBand) -> Color {
        match band {
            MasteryBand::Strong => self.success(),
            MasteryBand::Fair => self.warning(),
            MasteryBand::Weak => self.error(),
        }
    }

    pub fn bg(&self) -> Color { Self::parse_color(&self.bg) }
    pub fn fg(&self) -> Color { Self::parse_color(&self.fg) }
    pub fn operand(&self) -> Color { Self::parse_color(&self.operand) }
    pub fn operator(&self) -> Color { Self::parse_color(&self.operator) }
    pub fn hint(&self) -> Color { Self::parse_color(&self.hint) }
    pub fn cell_empty(&self) -> Color { Self::parse_color(&self.cell_empty) }
    pub fn cell_cursor_bg(&self) -> Color { Self::parse_color(&self.cell_cursor_bg) }
    pub fn cell_cursor_fg(&self) -> Color { Self::parse_color(&self.cell_cursor_fg) }
    pub fn digit_correct(&self) -> Color { Self::parse_color(&self.digit_correct) }
    pub fn digit_incorrect(&self) -> Color { Self::parse_color(&self.digit_incorrect) }
    pub fn digit_incorrect_bg(&self) -> Color { Self::parse_color(&self.digit_incorrect_bg) }
    pub fn accent(&self) -> Color { Self::parse_color(&self.accent) }
    pub fn border(&self) -> Color { Self::parse_color(&self.border) }
    pub fn header_bg(&self) -> Color { Self::parse_color(&self.header_bg) }
    pub fn header_fg(&self) -> Color { Self::parse_color(&self.header_fg) }
    pub fn muted(&self) -> Color { Self::parse_color(&self.muted) }
    pub fn bar_empty(&self) -> Color { Self::parse_color(&self.bar_empty) }
    pub fn error(&self) -> Color { Self::parse_color(&self.error) }
    pub fn warning(&self) -> Color { Self::parse_color(&self.warning) }
    pub fn success(&self) -> Color { Self::parse_color(&self.success) }
}
