use std::collections::HashMap;

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Widget;

use super::theme::{self, Theme};
use crate::animation::transitions::{fade_in_opacity, Marker};
use crate::game::{FillView, SessionSnapshot, TouchId, TouchView, Viewport};
use crate::input::{cell_to_surface, surface_to_cell};

/// The touch surface: player markers, then the backdrop and reveal disc.
pub struct Board<'a> {
    pub snapshot: &'a SessionSnapshot,
    pub markers: &'a HashMap<TouchId, Marker>,
    pub theme: &'a Theme,
    pub viewport: Viewport,
}

impl Widget for Board<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for touch in &self.snapshot.touches {
            self.render_marker(touch, area, buf);
        }
        if let Some(fill) = self.snapshot.fill {
            self.render_fill(&fill, area, buf);
        }
    }
}

impl Board<'_> {
    fn render_marker(&self, touch: &TouchView, area: Rect, buf: &mut Buffer) {
        let marker = self.markers.get(&touch.id);
        let position = marker.map(|m| m.position).unwrap_or(touch.position);
        let (cx, cy) = surface_to_cell(position.x, position.y);

        let text = if touch.locked {
            format!("[{}]", touch.label)
        } else {
            format!(" {} ", touch.label)
        };
        let mut style = theme::style_label(self.theme.player(touch.color_index));
        if marker.is_some_and(|m| fade_in_opacity(m.seen_ticks) < 1.0) {
            style = style.add_modifier(Modifier::DIM);
        }

        let width = text.chars().count() as i32;
        put_str(buf, area, cx - width / 2, cy, &text, style);
    }

    fn render_fill(&self, fill: &FillView, area: Rect, buf: &mut Buffer) {
        if fill.backdrop {
            buf.set_style(area, Style::default().bg(self.theme.backdrop));
        }
        if fill.radius <= 0.0 {
            return;
        }

        let origin = self.viewport.denormalize(fill.origin);
        let color = self.theme.player(fill.color_index);
        for row in area.top()..area.bottom() {
            for col in area.left()..area.right() {
                let (x, y) = cell_to_surface(col, row);
                if (x - origin.x).hypot(y - origin.y) <= fill.radius {
                    if let Some(cell) = buf.cell_mut((col, row)) {
                        cell.set_bg(color);
                    }
                }
            }
        }

        let label = fill.label.to_string();
        let (cx, cy) = surface_to_cell(origin.x, origin.y);
        let width = label.chars().count() as i32;
        put_str(buf, area, cx - width / 2, cy, &label, theme::style_label(color));
    }
}

/// Write `text` at a possibly off-screen cell, clipping to `area`.
fn put_str(buf: &mut Buffer, area: Rect, x: i32, y: i32, text: &str, style: Style) {
    if y < area.top() as i32 || y >= area.bottom() as i32 {
        return;
    }
    for (i, ch) in text.chars().enumerate() {
        let col = x + i as i32;
        if col < area.left() as i32 || col >= area.right() as i32 {
            continue;
        }
        if let Some(cell) = buf.cell_mut((col as u16, y as u16)) {
            cell.set_char(ch).set_style(style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Phase, Point};
    use crate::input::viewport_for;
    use ratatui::style::Color;

    fn theme() -> Theme {
        Theme {
            palette: vec![Color::Red, Color::Blue],
            backdrop: Color::Black,
        }
    }

    fn touch(id: TouchId, col: u16, row: u16, locked: bool) -> TouchView {
        let (x, y) = cell_to_surface(col, row);
        TouchView {
            id,
            position: Point::new(x, y),
            offset: Point::default(),
            color_index: id as usize % 2,
            label: id + 1,
            locked,
        }
    }

    fn render(snapshot: &SessionSnapshot) -> Buffer {
        let area = Rect::new(0, 0, 20, 10);
        let mut buf = Buffer::empty(area);
        let markers = HashMap::new();
        let theme = theme();
        Board {
            snapshot,
            markers: &markers,
            theme: &theme,
            viewport: viewport_for(20, 10),
        }
        .render(area, &mut buf);
        buf
    }

    #[test]
    fn markers_show_player_numbers() {
        let snap = SessionSnapshot {
            phase: Phase::Accepting,
            countdown: None,
            fill: None,
            touches: vec![touch(0, 5, 2, false), touch(1, 12, 7, true)],
        };
        let buf = render(&snap);

        assert_eq!(buf[(5, 2)].symbol(), "1");
        assert_eq!(buf[(5, 2)].bg, Color::Red);
        assert_eq!(buf[(11, 7)].symbol(), "[");
        assert_eq!(buf[(12, 7)].symbol(), "2");
        assert_eq!(buf[(12, 7)].bg, Color::Blue);
    }

    #[test]
    fn markers_near_edges_are_clipped() {
        let snap = SessionSnapshot {
            phase: Phase::Accepting,
            countdown: None,
            fill: None,
            touches: vec![touch(0, 0, 0, false), touch(1, 19, 9, false)],
        };
        let buf = render(&snap);
        assert_eq!(buf[(0, 0)].symbol(), "1");
        assert_eq!(buf[(19, 9)].symbol(), "2");
    }

    #[test]
    fn disc_covers_cells_within_radius() {
        let vp = viewport_for(20, 10);
        let (x, y) = cell_to_surface(10, 5);
        let snap = SessionSnapshot {
            phase: Phase::Revealing,
            countdown: None,
            fill: Some(FillView {
                id: 1,
                origin: vp.normalize(x, y),
                radius: 3.0,
                progress: 0.1,
                color_index: 1,
                label: 2,
                backdrop: true,
            }),
            touches: vec![],
        };
        let buf = render(&snap);

        assert_eq!(buf[(10, 5)].bg, Color::Blue);
        assert_eq!(buf[(10, 5)].symbol(), "2");
        assert_eq!(buf[(12, 5)].bg, Color::Blue);
        // two rows down is four surface units away
        assert_eq!(buf[(10, 7)].bg, Color::Black);
        assert_eq!(buf[(0, 0)].bg, Color::Black);
    }

    #[test]
    fn no_backdrop_while_restarting() {
        let snap = SessionSnapshot {
            phase: Phase::Restarting,
            countdown: None,
            fill: Some(FillView {
                id: 0,
                origin: Point::default(),
                radius: 0.0,
                progress: 0.0,
                color_index: 0,
                label: 1,
                backdrop: false,
            }),
            touches: vec![],
        };
        let buf = render(&snap);
        assert_eq!(buf[(0, 0)].bg, Color::Reset);
        assert_eq!(buf[(10, 5)].symbol(), " ");
    }
}
