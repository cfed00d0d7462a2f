use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::Widget;

/// 3x5 block glyphs for the digits 0-9.
const GLYPHS: [[&str; 5]; 10] = [
    ["###", "# #", "# #", "# #", "###"],
    [" # ", "## ", " # ", " # ", "###"],
    ["###", "  #", "###", "#  ", "###"],
    ["###", "  #", "###", "  #", "###"],
    ["# #", "# #", "###", "  #", "  #"],
    ["###", "#  ", "###", "  #", "###"],
    ["###", "#  ", "###", "# #", "###"],
    ["###", "  #", "  #", "  #", "  #"],
    ["###", "# #", "###", "# #", "###"],
    ["###", "# #", "###", "  #", "###"],
];

const GLYPH_HEIGHT: u16 = 5;
/// Each glyph pixel is two cells wide so digits look square.
const PIXEL_WIDTH: u16 = 2;
const GLYPH_WIDTH: u16 = 3 * PIXEL_WIDTH;
const GLYPH_GAP: u16 = 2;

/// Full-screen countdown: backdrop plus the value in block digits.
pub struct CountdownOverlay {
    pub value: u32,
    pub backdrop: Color,
    pub foreground: Color,
}

impl Widget for CountdownOverlay {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, Style::default().bg(self.backdrop));

        let digits: Vec<usize> = self
            .value
            .to_string()
            .bytes()
            .map(|b| (b - b'0') as usize)
            .collect();
        let count = digits.len() as u16;
        let width = count * GLYPH_WIDTH + count.saturating_sub(1) * GLYPH_GAP;

        // too small for block digits
        if width > area.width || GLYPH_HEIGHT > area.height {
            let text = self.value.to_string();
            let x = area.x + area.width.saturating_sub(text.len() as u16) / 2;
            let y = area.y + area.height / 2;
            buf.set_string(x, y, text, Style::default().fg(self.foreground).bg(self.backdrop));
            return;
        }

        let left = area.x + (area.width - width) / 2;
        let top = area.y + (area.height - GLYPH_HEIGHT) / 2;
        let ink = Style::default().bg(self.foreground);

        for (i, digit) in digits.iter().enumerate() {
            let x0 = left + i as u16 * (GLYPH_WIDTH + GLYPH_GAP);
            for (row, line) in GLYPHS[*digit].iter().enumerate() {
                for (col, ch) in line.chars().enumerate() {
                    if ch != '#' {
                        continue;
                    }
                    let x = x0 + col as u16 * PIXEL_WIDTH;
                    let y = top + row as u16;
                    buf.set_style(Rect::new(x, y, PIXEL_WIDTH, 1), ink);
                }
            }
        }
    }
}
