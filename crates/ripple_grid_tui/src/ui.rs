//! Stateless UI rendering for the ripple grid.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};
use ripple_grid::{CellTone, Position, Rgb, cell_label};
use std::time::Instant;

use crate::app::App;

const CELL_WIDTH: u16 = 10;
const CELL_HEIGHT: u16 = 4;
const CELL_GAP: u16 = 1;

/// Renders title, grid and status.
pub fn draw(frame: &mut Frame, app: &App, now: Instant) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(CELL_HEIGHT),
            Constraint::Length(3), // Status
            Constraint::Length(1), // Help
        ])
        .split(area);

    let title = Paragraph::new("Ripple Grid")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    draw_grid(frame, chunks[1], app, now);

    let cursor = app.cursor();
    let value = app.session().state().get(cursor).unwrap_or_default();
    let label = format!(" {}: {} ", cursor, cell_label(value, app.lock_threshold()));
    let status = Paragraph::new(app.status_message())
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(label));
    frame.render_widget(status, chunks[2]);

    let help = Paragraph::new("arrows move, enter/space click, r reset, q quit")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(help, chunks[3]);
}

fn draw_grid(frame: &mut Frame, area: Rect, app: &App, now: Instant) {
    let size = app.session().state().size();
    let cursor = app.cursor();

    // Large grids scroll so the cursor cell stays on screen.
    let (first_row, shown_rows) = window(size, cursor.row, fit(area.height, CELL_HEIGHT));
    let (first_col, shown_cols) = window(size, cursor.col, fit(area.width, CELL_WIDTH));
    let grid_area = center_rect(
        area,
        span(shown_cols, CELL_WIDTH),
        span(shown_rows, CELL_HEIGHT),
    );

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(track(shown_rows, CELL_HEIGHT))
        .split(grid_area);

    for row in 0..shown_rows {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(track(shown_cols, CELL_WIDTH))
            .split(rows[row * 2]);

        for col in 0..shown_cols {
            let pos = Position::new(first_row + row, first_col + col);
            draw_cell(frame, cols[col * 2], app, pos, now);
        }
    }
}

/// How many cells of length `len` fit in `available`, never less than one.
fn fit(available: u16, len: u16) -> usize {
    usize::from((available.saturating_add(CELL_GAP) / (len + CELL_GAP)).max(1))
}

/// First index and count of a run of at most `fit` cells that contains `focus`.
fn window(size: usize, focus: usize, fit: usize) -> (usize, usize) {
    let shown = size.min(fit);
    let first = focus
        .saturating_sub(shown.saturating_sub(1))
        .min(size - shown);
    (first, shown)
}

/// Terminal extent of `cells` cells of length `len` plus the gaps between them.
fn span(cells: usize, len: u16) -> u16 {
    let cells = u16::try_from(cells).unwrap_or(u16::MAX);
    cells
        .saturating_mul(len)
        .saturating_add(cells.saturating_sub(1).saturating_mul(CELL_GAP))
}

/// Alternating cell/gap constraints for one axis.
fn track(size: usize, len: u16) -> Vec<Constraint> {
    (0..size)
        .flat_map(|i| {
            let gap = (i + 1 < size).then_some(Constraint::Length(CELL_GAP));
            std::iter::once(Constraint::Length(len)).chain(gap)
        })
        .collect()
}

fn draw_cell(frame: &mut Frame, area: Rect, app: &App, pos: Position, now: Instant) {
    let session = app.session();
    let value = session.state().get(pos).unwrap_or_default();
    let tone = CellTone::classify(value, app.lock_threshold());

    let fill = Style::default()
        .bg(color(tone.background()))
        .fg(color(tone.text()))
        .add_modifier(Modifier::BOLD);

    let mut border = Style::default().fg(Color::Black);
    let mut border_type = BorderType::Plain;
    if session.highlight().is_lit(pos, now) {
        border = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
        border_type = BorderType::Thick;
    }
    if pos == app.cursor() {
        border = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
        border_type = BorderType::Double;
    }

    let mut lines = vec![Line::from(Span::raw(value.to_string()))];
    if tone == CellTone::Locked {
        lines.push(Line::from(Span::styled(
            "locked",
            Style::default().add_modifier(Modifier::ITALIC),
        )));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(border_type)
        .border_style(border)
        .style(fill);

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(block);
    frame.render_widget(paragraph, area);
}

fn color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.r, rgb.g, rgb.b)
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((area.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Length((area.height.saturating_sub(height)) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((area.width.saturating_sub(width)) / 2),
            Constraint::Length(width),
            Constraint::Length((area.width.saturating_sub(width)) / 2),
        ])
        .split(vert[1])[1]
}
