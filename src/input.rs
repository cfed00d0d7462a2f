//! Mouse buttons as touch contacts.
//!
//! Each held button is one contact with a fixed id. Terminal cells are about
//! twice as tall as they are wide, so rows are scaled by [`CELL_ASPECT`] to
//! put touches on a square grid.

use std::collections::BTreeMap;

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

use crate::game::{RawTouch, TouchId, Viewport};

/// Height of a terminal cell in units of its width.
pub const CELL_ASPECT: f64 = 2.0;

/// What the game sees from the pointer.
#[derive(Debug, Clone, PartialEq)]
pub enum TouchSignal {
    /// Every contact currently down, with positions.
    Move(Vec<RawTouch>),
    /// A contact lifted; `remaining` are still down.
    Release { remaining: usize },
}

/// Contact id for a mouse button.
pub fn contact_id(button: MouseButton) -> TouchId {
    match button {
        MouseButton::Left => 0,
        MouseButton::Right => 1,
        MouseButton::Middle => 2,
    }
}

/// Surface point for a terminal cell (its center).
pub fn cell_to_surface(column: u16, row: u16) -> (f64, f64) {
    (column as f64 + 0.5, (row as f64 + 0.5) * CELL_ASPECT)
}

/// Terminal cell containing a surface point.
pub fn surface_to_cell(x: f64, y: f64) -> (i32, i32) {
    (x.floor() as i32, (y / CELL_ASPECT).floor() as i32)
}

/// Touch surface covering a terminal of `columns` x `rows`.
pub fn viewport_for(columns: u16, rows: u16) -> Viewport {
    Viewport::new(columns as f64, rows as f64 * CELL_ASPECT)
}

/// Tracks held buttons and turns mouse events into touch signals.
#[derive(Debug, Default)]
pub struct PointerAdapter {
    contacts: BTreeMap<TouchId, (u16, u16)>,
}

impl PointerAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn active(&self) -> usize {
        self.contacts.len()
    }

    pub fn handle(&mut self, event: MouseEvent) -> Option<TouchSignal> {
        let cell = (event.column, event.row);
        match event.kind {
            MouseEventKind::Down(button) | MouseEventKind::Drag(button) => {
                self.contacts.insert(contact_id(button), cell);
                Some(TouchSignal::Move(self.raw_touches()))
            }
            MouseEventKind::Up(button) => {
                self.contacts.remove(&contact_id(button));
                Some(TouchSignal::Release {
                    remaining: self.contacts.len(),
                })
            }
            _ => None,
        }
    }

    fn raw_touches(&self) -> Vec<RawTouch> {
        self.contacts
            .iter()
            .map(|(&id, &(column, row))| {
                let (x, y) = cell_to_surface(column, row);
                RawTouch::new(id, x, y)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn press_reports_all_held_buttons() {
        let mut pa = PointerAdapter::new();
        pa.handle(mouse(MouseEventKind::Down(MouseButton::Left), 3, 4));
        let sig = pa.handle(mouse(MouseEventKind::Down(MouseButton::Right), 10, 1));

        assert_eq!(
            sig,
            Some(TouchSignal::Move(vec![
                RawTouch::new(0, 3.5, 9.0),
                RawTouch::new(1, 10.5, 3.0),
            ]))
        );
    }

    #[test]
    fn drag_updates_position() {
        let mut pa = PointerAdapter::new();
        pa.handle(mouse(MouseEventKind::Down(MouseButton::Left), 0, 0));
        let sig = pa.handle(mouse(MouseEventKind::Drag(MouseButton::Left), 5, 2));
        assert_eq!(sig, Some(TouchSignal::Move(vec![RawTouch::new(0, 5.5, 5.0)])));
    }

    #[test]
    fn release_counts_remaining() {
        let mut pa = PointerAdapter::new();
        pa.handle(mouse(MouseEventKind::Down(MouseButton::Left), 0, 0));
        pa.handle(mouse(MouseEventKind::Down(MouseButton::Middle), 1, 1));

        let first = pa.handle(mouse(MouseEventKind::Up(MouseButton::Left), 0, 0));
        assert_eq!(first, Some(TouchSignal::Release { remaining: 1 }));
        let last = pa.handle(mouse(MouseEventKind::Up(MouseButton::Middle), 1, 1));
        assert_eq!(last, Some(TouchSignal::Release { remaining: 0 }));
        assert_eq!(pa.active(), 0);
    }

    #[test]
    fn hover_and_scroll_ignored() {
        let mut pa = PointerAdapter::new();
        assert_eq!(pa.handle(mouse(MouseEventKind::Moved, 2, 2)), None);
        assert_eq!(pa.handle(mouse(MouseEventKind::ScrollUp, 2, 2)), None);
    }

    #[test]
    fn cell_round_trip() {
        let (x, y) = cell_to_surface(7, 3);
        assert_eq!(surface_to_cell(x, y), (7, 3));
        assert_eq!(viewport_for(80, 24), Viewport::new(80.0, 48.0));
    }
}
