use ratatui::style::{Color, Modifier, Style};

use crate::config::AppearanceConfig;

// ─── Color Palette (terminal-adaptive, transparency-friendly) ──────────

/// Background: Reset, so the terminal background shows through
pub const BG: Color = Color::Reset;

/// Primary text color
pub const FG: Color = Color::White;

/// Dimmed text (labels, inactive elements)
pub const FG_DIM: Color = Color::DarkGray;

/// Accent color (keybinding hints, borders)
pub const ACCENT: Color = Color::Cyan;

/// Status bar background
pub const STATUS_BG: Color = Color::Black;

/// Colors the board is drawn with
#[derive(Debug, Clone)]
pub struct Theme {
    pub palette: Vec<Color>,
    pub backdrop: Color,
}

impl Theme {
    pub fn from_config(appearance: &AppearanceConfig) -> Self {
        Self {
            palette: appearance.palette.clone(),
            backdrop: appearance.backdrop,
        }
    }

    /// Player color for a palette slot
    pub fn player(&self, color_index: usize) -> Color {
        self.palette
            .get(color_index % self.palette.len().max(1))
            .copied()
            .unwrap_or(ACCENT)
    }

    pub fn palette_size(&self) -> usize {
        self.palette.len()
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_config(&AppearanceConfig::default())
    }
}

// ─── Style Constructors ──────────────────────────────────────────────────

pub fn style_default() -> Style {
    Style::default().fg(FG).bg(BG)
}

pub fn style_dim() -> Style {
    Style::default().fg(FG_DIM).bg(BG)
}

pub fn style_accent() -> Style {
    Style::default().fg(ACCENT).bg(BG)
}

pub fn style_accent_bold() -> Style {
    Style::default()
        .fg(ACCENT)
        .bg(BG)
        .add_modifier(Modifier::BOLD)
}

pub fn style_key_hint() -> Style {
    Style::default()
        .fg(ACCENT)
        .bg(STATUS_BG)
        .add_modifier(Modifier::BOLD)
}

pub fn style_key_desc() -> Style {
    Style::default().fg(FG_DIM).bg(STATUS_BG)
}

pub fn style_status() -> Style {
    Style::default().fg(FG).bg(STATUS_BG)
}

/// Label drawn on a colored marker or disc
pub fn style_label(bg: Color) -> Style {
    Style::default()
        .fg(Color::White)
        .bg(bg)
        .add_modifier(Modifier::BOLD)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn player_color_wraps() {
        let theme = Theme {
            palette: vec![Color::Red, Color::Blue],
            backdrop: Color::Black,
        };
        assert_eq!(theme.player(0), Color::Red);
        assert_eq!(theme.player(3), Color::Blue);
    }

    #[test]
    fn empty_palette_falls_back_to_accent() {
        let theme = Theme {
            palette: Vec::new(),
            backdrop: Color::Black,
        };
        assert_eq!(theme.player(2), ACCENT);
    }
}
