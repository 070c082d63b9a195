#![warn(clippy::all, clippy::pedantic)]
#![allow(
    // Allow truncation/precision loss mapping logical playfield units onto
    // terminal rows; the playfield is always far smaller than the ranges
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::components::ReactionPolarity;
use crate::config::CONFIG;
use crate::game::{CATCH_BAND_END, CATCH_BAND_START, LANE_COUNT, OFF_SCREEN_Y};
use crate::session::GameSession;

const LANE_CELL_WIDTH: u16 = 8;
const PLAYFIELD_WIDTH: u16 = LANE_COUNT as u16 * LANE_CELL_WIDTH + 2; // +2 for borders
const MIN_INFO_WIDTH: u16 = 22;
const MIN_HEIGHT: u16 = 14;

pub fn render(f: &mut Frame, session: &mut GameSession, last_result: Option<(u32, u32)>) {
    let area = f.area();
    if area.width < PLAYFIELD_WIDTH + MIN_INFO_WIDTH || area.height < MIN_HEIGHT {
        let warning = Paragraph::new(
            "Terminal too small!\nPlease resize your terminal\nto continue playing.",
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Lanecatch"));
        f.render_widget(warning, centered_rect(60, 40, area));
        return;
    }

    let main_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(PLAYFIELD_WIDTH),
            Constraint::Min(MIN_INFO_WIDTH),
        ])
        .split(area);

    render_playfield(f, session, last_result, main_layout[0]);
    render_info(f, session, main_layout[1]);
}

fn render_playfield(
    f: &mut Frame,
    session: &mut GameSession,
    last_result: Option<(u32, u32)>,
    area: Rect,
) {
    let block = Block::default().borders(Borders::ALL).title("LANECATCH");
    let inner = block.inner(area);
    f.render_widget(block, area);

    if inner.height < 3 {
        return;
    }

    // Faint lane separators
    for separator in 1..LANE_COUNT as u16 {
        let x = inner.left() + separator * LANE_CELL_WIDTH;
        for y in inner.top()..inner.bottom() {
            if let Some(cell) = f.buffer_mut().cell_mut((x, y)) {
                cell.set_symbol("·");
                cell.set_fg(Color::DarkGray);
            }
        }
    }

    // Falling items; positions above the viewport stay hidden
    for item in session.live_items() {
        if item.y < 0.0 {
            continue;
        }
        let row = row_for_y(item.y, inner.height);
        let x = lane_center_x(inner, item.lane.index());
        let y = inner.top() + row;
        if let Some(cell) = f.buffer_mut().cell_mut((x, y)) {
            cell.set_symbol(item.kind.icon());
        }
    }

    // Catcher sits at the middle of the catch band
    let catcher_row = row_for_y((CATCH_BAND_START + CATCH_BAND_END) / 2.0, inner.height);
    let catcher_x = lane_center_x(inner, session.catcher_lane().index());
    if let Some(cell) = f.buffer_mut().cell_mut((catcher_x, inner.top() + catcher_row)) {
        cell.set_symbol("🧺");
    }

    if let Some(reaction) = session.current_reaction() {
        let (good, bad) = reaction_colors();
        let color = match reaction.polarity {
            ReactionPolarity::Good => good,
            ReactionPolarity::Bad => bad,
        };
        let message = Paragraph::new(reaction.text)
            .alignment(Alignment::Center)
            .style(Style::default().fg(color).add_modifier(Modifier::BOLD));
        let message_area = Rect {
            x: inner.x,
            y: inner.y + 1,
            width: inner.width,
            height: 1,
        };
        f.render_widget(message, message_area);
    }

    if !session.is_active() {
        let text = match last_result {
            Some((score, level)) => {
                format!("GAME OVER\nScore: {score}  Level: {level}\nPress Enter to play again")
            }
            None => "Press Enter to start".to_string(),
        };
        let overlay = Paragraph::new(text)
            .alignment(Alignment::Center)
            .style(Style::default().add_modifier(Modifier::BOLD));
        let overlay_area = Rect {
            x: inner.x,
            y: inner.y + inner.height / 2 - 1,
            width: inner.width,
            height: 3,
        };
        f.render_widget(overlay, overlay_area);
    }
}

fn render_info(f: &mut Frame, session: &GameSession, area: Rect) {
    let show_controls = CONFIG.read().unwrap().ui.show_controls;

    let info_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Title
            Constraint::Length(5), // Stats
            Constraint::Min(5),    // Controls
        ])
        .split(area);

    let title = Paragraph::new("INFO")
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(title, info_layout[0]);

    let stats = format!(
        "Score: {}\nTime:  {}s\nLevel: {}",
        session.score(),
        session.time_remaining(),
        session.level(),
    );
    let stats_widget = Paragraph::new(stats)
        .block(Block::default().borders(Borders::NONE))
        .wrap(Wrap { trim: true });
    f.render_widget(stats_widget, info_layout[1]);

    if show_controls {
        let controls = Paragraph::new(
            "Controls:\n\
            ←/A: Left lane\n\
            ↓/S: Center lane\n\
            →/D: Right lane\n\
            Enter: Start\n\
            Q: Quit\n\
            ",
        )
        .block(Block::default().borders(Borders::TOP))
        .wrap(Wrap { trim: true });
        f.render_widget(controls, info_layout[2]);
    }
}

// Maps a logical position in 0..=OFF_SCREEN_Y onto a row of the playfield
fn row_for_y(y: f32, height: u16) -> u16 {
    let clamped = y.clamp(0.0, OFF_SCREEN_Y);
    let row = (clamped / OFF_SCREEN_Y) * f32::from(height - 1);
    (row as u16).min(height - 1)
}

fn lane_center_x(inner: Rect, lane_index: usize) -> u16 {
    inner.left() + lane_index as u16 * LANE_CELL_WIDTH + LANE_CELL_WIDTH / 2
}

fn reaction_colors() -> (Color, Color) {
    let config = CONFIG.read().unwrap();
    (
        color_from_name(&config.ui.good_reaction_color),
        color_from_name(&config.ui.bad_reaction_color),
    )
}

fn color_from_name(name: &str) -> Color {
    match name.to_ascii_lowercase().as_str() {
        "red" => Color::Red,
        "green" => Color::Green,
        "yellow" => Color::Yellow,
        "blue" => Color::Blue,
        "magenta" => Color::Magenta,
        "cyan" => Color::Cyan,
        "gray" | "grey" => Color::Gray,
        _ => Color::White,
    }
}

/// Helper function to create a centered rect using up certain percentage of the available rect
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
