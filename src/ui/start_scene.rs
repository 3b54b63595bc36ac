//! The title screen: banner, identity, and the stored bests.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::ui::{render_status_bar, Hud};

const BANNER: [&str; 6] = [
    " ██████╗  ██████╗  ██████╗ ██████╗ ██╗",
    "██╔════╝ ██╔═══██╗██╔═══██╗██╔══██╗██║",
    "██║  ███╗██║   ██║██║   ██║██████╔╝██║",
    "██║   ██║██║   ██║██║   ██║██╔══██╗██║",
    "╚██████╔╝╚██████╔╝╚██████╔╝██████╔╝██║",
    " ╚═════╝  ╚═════╝  ╚═════╝ ╚═════╝ ╚═╝",
];

pub fn render_start(frame: &mut Frame, area: Rect, hud: &Hud) {
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Goobi ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let v_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(10), Constraint::Length(2)])
        .split(inner);

    render_title_card(frame, v_chunks[0], hud);
    render_status_bar(
        frame,
        v_chunks[1],
        "Press Space to climb!",
        Color::Yellow,
        &[("[Space/Enter]", "Play"), ("[Q]", "Quit")],
    );
}

fn render_title_card(frame: &mut Frame, area: Rect, hud: &Hud) {
    let mut lines: Vec<Line> = BANNER
        .iter()
        .map(|row| {
            Line::from(Span::styled(
                *row,
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ))
        })
        .collect();

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "The endless climb",
        Style::default().fg(Color::Cyan),
    )));
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("Playing as ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            hud.username.clone(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
    ]));
    lines.push(Line::from(Span::styled(
        format!("Local best: {}", hud.local_best),
        Style::default().fg(Color::Yellow),
    )));
    lines.push(match &hud.world_best {
        Some(best) => Line::from(Span::styled(
            format!("World best: {} by {}", best.score, best.holder),
            Style::default().fg(Color::Green),
        )),
        None => Line::from(Span::styled(
            "World best: -",
            Style::default().fg(Color::DarkGray),
        )),
    });

    let content_height = lines.len() as u16;
    let y_offset = area.y + area.height.saturating_sub(content_height) / 2;
    let text = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(
        text,
        Rect::new(
            area.x,
            y_offset,
            area.width,
            content_height.min(area.height),
        ),
    );
}
