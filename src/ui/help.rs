use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph};
use ratatui::Frame;

use super::theme;

/// Keybinding entries: (key, description)
const KEYBINDINGS: &[(&str, &str)] = &[
    ("Mouse", "Hold a button to place a finger"),
    ("Drag", "Move a finger"),
    ("Release", "Lift all to start the countdown"),
    ("Space", "Play again after a reveal"),
    ("Enter", "Play again after a reveal"),
    ("?", "Toggle this help"),
    ("q / Esc", "Quit"),
];

/// Render the help overlay
pub fn render(frame: &mut Frame, area: Rect) {
    let width = 52_u16.min(area.width.saturating_sub(4));
    let height = (KEYBINDINGS.len() as u16 + 6).min(area.height.saturating_sub(2));

    let dialog = super::centered_rect_fixed(width, height, area);
    frame.render_widget(Clear, dialog);

    let block = Block::default()
        .title(Line::from(vec![
            Span::styled(" ", theme::style_accent()),
            Span::styled(" Keybindings ", theme::style_accent_bold()),
        ]))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::style_accent())
        .style(theme::style_default());

    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::from(""));

    for (key, desc) in KEYBINDINGS {
        lines.push(Line::from(vec![
            Span::styled(format!("  {:<10}", key), theme::style_accent_bold()),
            Span::styled(*desc, theme::style_default()),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("  Press ", theme::style_dim()),
        Span::styled("?", theme::style_accent_bold()),
        Span::styled(" or ", theme::style_dim()),
        Span::styled("Esc", theme::style_accent_bold()),
        Span::styled(" to close", theme::style_dim()),
    ]));

    let para = Paragraph::new(lines).block(block);
    frame.render_widget(para, dialog);
}
