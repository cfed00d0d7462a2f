pub mod board;
pub mod countdown;
pub mod help;
pub mod status_bar;
pub mod theme;

use ratatui::layout::Rect;
use ratatui::Frame;

use crate::app::App;
use board::Board;
use countdown::CountdownOverlay;

/// Top-level draw function: board, countdown, status bar, then help on top
pub fn draw(f: &mut Frame, app: &App) {
    let area = f.area();
    let snapshot = app.snapshot();

    f.render_widget(
        Board {
            snapshot: &snapshot,
            markers: &app.markers,
            theme: &app.theme,
            viewport: app.session.viewport(),
        },
        area,
    );

    if let Some(value) = snapshot.countdown {
        f.render_widget(
            CountdownOverlay {
                value,
                backdrop: app.theme.backdrop,
                foreground: theme::FG,
            },
            area,
        );
    }

    if app.show_status_bar && area.height > 1 {
        let bar = Rect::new(area.x, area.bottom() - 1, area.width, 1);
        status_bar::render(f, &snapshot, app.animation.tick_count, bar);
    }

    if app.show_help {
        help::render(f, area);
    }
}

/// A `width` x `height` rect centered in `area`, shrunk to fit
pub fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::event::Event;
    use crate::input::viewport_for;
    use crossterm::event::{KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
    use ratatui::backend::TestBackend;
    use ratatui::buffer::Buffer;
    use ratatui::style::Color;
    use ratatui::Terminal;
    use tokio::sync::mpsc;

    const W: u16 = 60;
    const H: u16 = 12;

    fn app() -> App {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut config = Config::default();
        config.appearance.animations = false;
        config.game.seed = Some(1);
        App::new(&config, viewport_for(W, H), tx)
    }

    fn render(app: &App) -> Buffer {
        let mut terminal = Terminal::new(TestBackend::new(W, H)).expect("test terminal");
        terminal.draw(|f| draw(f, app)).expect("draw");
        terminal.backend().buffer().clone()
    }

    fn row_text(buf: &Buffer, row: u16) -> String {
        (0..buf.area.width).map(|x| buf[(x, row)].symbol()).collect()
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn centered_rect_shrinks_to_area() {
        let area = Rect::new(0, 0, 10, 4);
        assert_eq!(centered_rect_fixed(6, 2, area), Rect::new(2, 1, 6, 2));
        assert_eq!(centered_rect_fixed(20, 20, area), area);
    }

    #[tokio::test]
    async fn idle_screen_shows_status_hint() {
        let app = app();
        let buf = render(&app);
        let status = row_text(&buf, H - 1);
        assert!(status.contains("Idle"), "status bar was {status:?}");
        assert!(status.contains("[q]"));
    }

    #[tokio::test]
    async fn held_button_draws_a_marker() {
        let mut app = app();
        app.handle_event(mouse(MouseEventKind::Down(MouseButton::Left), 10, 4));
        let buf = render(&app);

        assert_eq!(buf[(10, 4)].symbol(), "1");
        assert_eq!(buf[(10, 4)].bg, app.theme.player(0));
        assert!(row_text(&buf, H - 1).contains("1 finger"));
    }

    #[tokio::test]
    async fn countdown_value_covers_the_board() {
        let mut app = app();
        app.handle_event(mouse(MouseEventKind::Down(MouseButton::Left), 10, 4));
        app.handle_event(mouse(MouseEventKind::Up(MouseButton::Left), 10, 4));

        // hold: the locked marker is still visible
        let buf = render(&app);
        assert_eq!(buf[(9, 4)].symbol(), "[");

        let epoch = app.session.countdown_epoch();
        app.handle_event(Event::CountdownBegin(epoch));
        let buf = render(&app);
        assert_eq!(buf[(0, 0)].bg, app.theme.backdrop);
        assert!(row_text(&buf, H - 1).contains("Counting down 3"));
        app.shutdown();
    }

    #[tokio::test]
    async fn revealed_winner_fills_the_screen() {
        let mut app = app();
        app.handle_event(mouse(MouseEventKind::Down(MouseButton::Left), 10, 4));
        app.handle_event(mouse(MouseEventKind::Up(MouseButton::Left), 10, 4));
        let epoch = app.session.countdown_epoch();
        app.handle_event(Event::CountdownBegin(epoch));
        for _ in 0..3 {
            app.handle_event(Event::CountdownTick(epoch));
        }
        app.handle_event(Event::Tick);

        let buf = render(&app);
        let winner = app.theme.player(0);
        assert_eq!(buf[(0, 0)].bg, winner);
        assert_eq!(buf[(W - 1, H - 2)].bg, winner);
        assert_eq!(buf[(10, 4)].symbol(), "1");
        assert!(row_text(&buf, H - 1).contains("Play again"));
    }

    #[tokio::test]
    async fn help_overlay_lists_keys() {
        let mut app = app();
        app.show_help = true;
        let buf = render(&app);
        let text: String = (0..H).map(|row| row_text(&buf, row)).collect();
        assert!(text.contains("Keybindings"));
        assert!(text.contains("Play again"));
    }

    #[tokio::test]
    async fn status_bar_can_be_hidden() {
        let mut app = app();
        app.show_status_bar = false;
        let buf = render(&app);
        assert!(!row_text(&buf, H - 1).contains("Idle"));
        assert_eq!(buf[(0, H - 1)].bg, Color::Reset);
    }
}
