use ratatui::layout::{Alignment, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use super::theme;
use crate::animation::spinner::{pulse_frame, spinner_frame};
use crate::game::{Phase, SessionSnapshot};

/// Render the bottom status bar: phase, touch count and key hints
pub fn render(frame: &mut Frame, snapshot: &SessionSnapshot, tick_count: u64, area: Rect) {
    let mut spans = vec![Span::styled(
        format!(" {} ", phase_label(snapshot, tick_count)),
        theme::style_status(),
    )];
    if !snapshot.touches.is_empty() {
        spans.push(Span::styled(
            format!("· {} finger{} ", snapshot.touches.len(), plural(snapshot.touches.len())),
            theme::style_key_desc(),
        ));
    }
    spans.extend(hints(snapshot.phase, tick_count));

    let para = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .style(theme::style_status());
    frame.render_widget(para, area);
}

fn phase_label(snapshot: &SessionSnapshot, tick_count: u64) -> String {
    match (snapshot.phase, snapshot.countdown) {
        (Phase::CountingDown, None) => format!("{} {}", spinner_frame(tick_count), snapshot.phase),
        (Phase::CountingDown, Some(value)) => format!("{} {value}", snapshot.phase),
        (phase, _) => phase.to_string(),
    }
}

fn hints(phase: Phase, tick_count: u64) -> Vec<Span<'static>> {
    match phase {
        Phase::Idle => vec![desc("Hold mouse buttons to join "), key("?"), desc("Help "), key("q"), desc("Quit")],
        Phase::Accepting => vec![desc("Release all to start "), key("q"), desc("Quit")],
        Phase::CountingDown | Phase::Revealing | Phase::Restarting => {
            vec![key("q"), desc("Quit")]
        }
        Phase::Revealed => vec![
            Span::styled(format!("{} ", pulse_frame(tick_count)), theme::style_key_hint()),
            key("Space"),
            desc("Play again "),
            key("q"),
            desc("Quit"),
        ],
    }
}

fn plural(n: usize) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}

fn key(k: &'static str) -> Span<'static> {
    Span::styled(format!(" [{k}] "), theme::style_key_hint())
}

fn desc(d: &'static str) -> Span<'static> {
    Span::styled(d, theme::style_key_desc())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(phase: Phase, countdown: Option<u32>) -> SessionSnapshot {
        SessionSnapshot {
            phase,
            countdown,
            fill: None,
            touches: vec![],
        }
    }

    #[test]
    fn counting_down_spins_until_value_shows() {
        let label = phase_label(&snapshot(Phase::CountingDown, None), 0);
        assert_eq!(label, format!("{} Counting down", spinner_frame(0)));

        let label = phase_label(&snapshot(Phase::CountingDown, Some(2)), 0);
        assert_eq!(label, "Counting down 2");
    }

    #[test]
    fn revealed_offers_play_again() {
        let text: String = hints(Phase::Revealed, 0)
            .iter()
            .map(|s| s.content.as_ref())
            .collect();
        assert!(text.contains("[Space]"));
        assert!(text.contains("Play again"));
    }
}
