//! Rendering for the climb itself: the logical 400x600 canvas mapped onto
//! whatever terminal cells are available.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::constants::*;
use crate::game::platform::PlatformKind;
use crate::game::player::AnimState;
use crate::game::session::GameSession;
use crate::ui::{render_status_bar, Hud};

/// Maps terminal cells onto spans of the fixed logical canvas.
struct CellMap {
    cols: u16,
    rows: u16,
}

impl CellMap {
    fn new(cols: u16, rows: u16) -> Self {
        Self { cols, rows }
    }

    /// World x-interval covered by one display column.
    fn col_span(&self, col: u16) -> (f64, f64) {
        let cols = self.cols as f64;
        (
            col as f64 * CANVAS_WIDTH / cols,
            (col as f64 + 1.0) * CANVAS_WIDTH / cols,
        )
    }

    /// World y-interval covered by one display row.
    fn row_span(&self, row: u16) -> (f64, f64) {
        let rows = self.rows as f64;
        (
            row as f64 * CANVAS_HEIGHT / rows,
            (row as f64 + 1.0) * CANVAS_HEIGHT / rows,
        )
    }
}

/// Open-interval overlap on both axes.
fn rect_overlaps(
    (a_left, a_right, a_top, a_bottom): (f64, f64, f64, f64),
    (b_left, b_right, b_top, b_bottom): (f64, f64, f64, f64),
) -> bool {
    a_left < b_right && a_right > b_left && a_top < b_bottom && a_bottom > b_top
}

/// Render the running game: play area, status bar, info panel.
pub fn render_game(frame: &mut Frame, area: Rect, session: &GameSession, hud: &Hud) {
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Goobi ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let h_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(24)])
        .split(inner);

    let v_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(10), Constraint::Length(2)])
        .split(h_chunks[0]);

    render_play_area(frame, v_chunks[0], session);
    render_status_bar(
        frame,
        v_chunks[1],
        &format!("Score: {}", session.score),
        Color::Green,
        &[
            ("[A/D or Arrows]", "Steer"),
            ("[Space]", "Jump"),
            ("[Esc]", "Menu"),
        ],
    );
    render_info_panel(frame, h_chunks[1], session, hud);
}

fn render_play_area(frame: &mut Frame, area: Rect, session: &GameSession) {
    if area.width == 0 || area.height == 0 {
        return;
    }

    let map = CellMap::new(area.width, area.height);
    let mut lines = Vec::with_capacity(area.height as usize);

    for row in 0..area.height {
        let (top, bottom) = map.row_span(row);
        let mut spans = Vec::with_capacity(area.width as usize);
        for col in 0..area.width {
            let (left, right) = map.col_span(col);
            spans.push(cell_glyph(session, (left, right, top, bottom)));
        }
        lines.push(Line::from(spans));
    }

    frame.render_widget(Paragraph::new(lines), area);
}

/// Pick what occupies one cell: player over obstacles over platforms.
fn cell_glyph(session: &GameSession, cell: (f64, f64, f64, f64)) -> Span<'static> {
    let player = &session.player;
    let player_rect = (
        player.x,
        player.x + PLAYER_SPRITE_SIZE,
        player.y,
        player.y + PLAYER_SPRITE_SIZE,
    );
    if rect_overlaps(cell, player_rect) {
        let glyph = match player.anim {
            AnimState::Roll if player.frame_index % 2 == 1 => "▓",
            _ => "█",
        };
        return Span::styled(
            glyph,
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );
    }

    for obstacle in &session.obstacles {
        let rect = (
            obstacle.x,
            obstacle.x + obstacle.width,
            obstacle.y,
            obstacle.y + obstacle.height,
        );
        if rect_overlaps(cell, rect) {
            let glyph = if obstacle.frame_index % 2 == 0 {
                "▓"
            } else {
                "▒"
            };
            return Span::styled(glyph, Style::default().fg(Color::Red));
        }
    }

    for platform in &session.platforms {
        let rect = (
            platform.x,
            platform.x + platform.width,
            platform.y,
            platform.y + platform.height,
        );
        if rect_overlaps(cell, rect) {
            let (glyph, color) = match platform.kind {
                PlatformKind::Static => ("█", Color::Green),
                PlatformKind::Moving => ("█", Color::Cyan),
                PlatformKind::Dropping => ("▒", Color::Magenta),
            };
            return Span::styled(glyph, Style::default().fg(color));
        }
    }

    Span::raw(" ")
}

fn render_info_panel(frame: &mut Frame, area: Rect, session: &GameSession, hud: &Hud) {
    let block = Block::default()
        .title(" Climb ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.height < 2 || inner.width < 4 {
        return;
    }

    let mut lines = vec![
        Line::from(Span::styled(
            format!(" {} ", hud.username),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled(" Score: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{}", session.score),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled(" Best: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{}", hud.local_best),
                Style::default().fg(Color::Yellow),
            ),
        ]),
        Line::from(""),
    ];

    match &hud.world_best {
        Some(best) => {
            lines.push(Line::from(Span::styled(
                " World best:",
                Style::default().fg(Color::DarkGray),
            )));
            lines.push(Line::from(Span::styled(
                format!(" {} by {}", best.score, best.holder),
                Style::default().fg(Color::Green),
            )));
        }
        None => {
            lines.push(Line::from(Span::styled(
                " World best: -",
                Style::default().fg(Color::DarkGray),
            )));
        }
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_map_tiles_the_canvas_exactly() {
        let map = CellMap::new(80, 24);

        assert_eq!(map.col_span(0).0, 0.0);
        assert_eq!(map.col_span(79).1, CANVAS_WIDTH);
        assert_eq!(map.row_span(0).0, 0.0);
        assert_eq!(map.row_span(23).1, CANVAS_HEIGHT);

        // Adjacent cells share an edge
        assert_eq!(map.col_span(9).1, map.col_span(10).0);
        assert_eq!(map.row_span(9).1, map.row_span(10).0);
    }

    #[test]
    fn test_rect_overlap_is_open_at_edges() {
        let cell = (0.0, 5.0, 0.0, 25.0);
        assert!(rect_overlaps(cell, (4.0, 10.0, 20.0, 30.0)));
        assert!(!rect_overlaps(cell, (5.0, 10.0, 0.0, 25.0)), "edge touch");
        assert!(!rect_overlaps(cell, (0.0, 5.0, 25.0, 30.0)), "edge touch");
    }

    #[test]
    fn test_offscreen_entities_overlap_no_cell() {
        let map = CellMap::new(80, 24);
        let above_canvas = (100.0, 150.0, -50.0, 0.0);

        for row in 0..24 {
            let (top, bottom) = map.row_span(row);
            for col in 0..80 {
                let (left, right) = map.col_span(col);
                assert!(!rect_overlaps((left, right, top, bottom), above_canvas));
            }
        }
    }
}
