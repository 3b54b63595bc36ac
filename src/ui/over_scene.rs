//! The game-over overlay: how the run ended, what the score was, and what
//! Telegram made of it.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::game::session::{GameOutcome, GameSession};
use crate::telegram::bridge::{ScoreboardUpdate, SubmitOutcome};
use crate::ui::Hud;

/// Where the background score exchange stands when the overlay draws.
#[derive(Debug, Clone, Copy)]
pub enum BridgeStatus<'a> {
    /// This run has no Telegram identity.
    Offline,
    /// The exchange is still in flight.
    Pending,
    Done(&'a ScoreboardUpdate),
}

fn title_for(outcome: Option<GameOutcome>) -> &'static str {
    match outcome {
        Some(GameOutcome::Struck) => "SQUASHED!",
        Some(GameOutcome::Fell) => "YOU FELL!",
        None => "GAME OVER",
    }
}

fn submit_note(outcome: &SubmitOutcome) -> (&'static str, Color) {
    match outcome {
        SubmitOutcome::Posted => ("Score posted to the scoreboard", Color::Green),
        SubmitOutcome::NotModified => ("Your scoreboard best still stands", Color::Yellow),
        SubmitOutcome::Failed(_) => ("Score submission failed", Color::Red),
    }
}

pub fn render_over(
    frame: &mut Frame,
    area: Rect,
    session: &GameSession,
    hud: &Hud,
    bridge: BridgeStatus,
    new_best: bool,
) {
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines = vec![
        Line::from(Span::styled(
            title_for(session.outcome),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Score: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{}", session.score),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(Span::styled(
            format!("Local best: {}", hud.local_best),
            Style::default().fg(Color::Yellow),
        )),
    ];

    if new_best {
        lines.push(Line::from(Span::styled(
            "New personal best!",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )));
    }

    lines.push(Line::from(""));
    match bridge {
        BridgeStatus::Offline => {
            lines.push(Line::from(Span::styled(
                "Local run only",
                Style::default().fg(Color::DarkGray),
            )));
        }
        BridgeStatus::Pending => {
            lines.push(Line::from(Span::styled(
                "Talking to Telegram...",
                Style::default().fg(Color::DarkGray),
            )));
        }
        BridgeStatus::Done(update) => {
            let (note, color) = submit_note(&update.submit);
            lines.push(Line::from(Span::styled(
                note,
                Style::default().fg(color),
            )));

            if !update.leaderboard.is_empty() {
                lines.push(Line::from(""));
                lines.push(Line::from(Span::styled(
                    "Top climbers",
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                )));
                for (i, entry) in update.leaderboard.iter().enumerate() {
                    lines.push(Line::from(Span::styled(
                        format!("{:>2}. {:<16} {:>6}", i + 1, entry.username, entry.score),
                        Style::default().fg(Color::White),
                    )));
                }
            }
        }
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "[Space] Play again  [Esc] Menu  [Q] Quit",
        Style::default().fg(Color::DarkGray),
    )));

    let content_height = lines.len() as u16;
    let y_offset = inner.y + inner.height.saturating_sub(content_height) / 2;
    let text = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(
        text,
        Rect::new(
            inner.x,
            y_offset,
            inner.width,
            content_height.min(inner.height),
        ),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_matches_outcome() {
        assert_eq!(title_for(Some(GameOutcome::Struck)), "SQUASHED!");
        assert_eq!(title_for(Some(GameOutcome::Fell)), "YOU FELL!");
        assert_eq!(title_for(None), "GAME OVER");
    }

    #[test]
    fn test_submit_notes_distinguish_outcomes() {
        assert_eq!(submit_note(&SubmitOutcome::Posted).1, Color::Green);
        assert_eq!(submit_note(&SubmitOutcome::NotModified).1, Color::Yellow);
        assert_eq!(
            submit_note(&SubmitOutcome::Failed("boom".to_string())).1,
            Color::Red
        );
    }
}
