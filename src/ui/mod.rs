//! Terminal scenes. Each scene renders one screen from read-only state;
//! the frame loop in main.rs decides which one is active.

pub mod game_scene;
pub mod over_scene;
pub mod start_scene;

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::telegram::bridge::HighScore;

/// Values the scenes show in their margins, owned by the frame loop and
/// refreshed when background fetches land.
#[derive(Debug, Clone)]
pub struct Hud {
    pub username: String,
    pub local_best: u32,
    pub world_best: Option<HighScore>,
}

/// The footer every scene ends with: a colored message line over its key
/// bindings, both centered. An area shorter than two rows clips from the
/// bottom.
pub fn render_status_bar(
    frame: &mut Frame,
    area: Rect,
    message: &str,
    accent: Color,
    bindings: &[(&str, &str)],
) {
    let mut lines = vec![Line::from(Span::styled(
        message,
        Style::default().fg(accent),
    ))];

    if !bindings.is_empty() {
        let mut spans: Vec<Span> = Vec::new();
        for (key, action) in bindings {
            if !spans.is_empty() {
                spans.push(Span::raw("  "));
            }
            spans.push(Span::styled(*key, Style::default().fg(Color::White)));
            spans.push(Span::raw(" "));
            spans.push(Span::styled(*action, Style::default().fg(Color::DarkGray)));
        }
        lines.push(Line::from(spans));
    }

    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}
