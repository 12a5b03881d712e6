//! Stateless board rendering with ratatui.

use ratatui::{
    Frame, Terminal,
    backend::Backend,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, Paragraph},
};
use strictly_simon::{DeviceError, Grid, Region, Renderer, Rgb, Square};
use tracing::instrument;

/// Renders the grid, then the overlay box if there is one.
pub fn draw(frame: &mut Frame, grid: &Grid, overlay: Option<&str>) {
    let area = frame.area();

    for square in grid.squares() {
        let rect = scale_region(square.region(), grid.width(), grid.height(), area);
        draw_square(frame, rect, square);
    }

    if let Some(text) = overlay {
        draw_overlay(frame, area, text);
    }
}

/// Maps a region in board units onto a terminal area.
///
/// Edges are scaled independently so adjacent regions stay adjacent.
pub fn scale_region(region: Region, board_width: u32, board_height: u32, area: Rect) -> Rect {
    if board_width == 0 || board_height == 0 {
        return Rect::new(area.x, area.y, 0, 0);
    }
    let scale = |offset: u32, board: u32, span: u16| -> u16 {
        let scaled = u64::from(offset.min(board)) * u64::from(span) / u64::from(board);
        // offset <= board, so scaled <= span
        u16::try_from(scaled).unwrap_or(span)
    };

    let left = scale(region.x, board_width, area.width);
    let right = scale(region.x + region.width, board_width, area.width);
    let top = scale(region.y, board_height, area.height);
    let bottom = scale(region.y + region.height, board_height, area.height);

    Rect::new(
        area.x + left,
        area.y + top,
        right.saturating_sub(left),
        bottom.saturating_sub(top),
    )
}

fn to_color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.r, rgb.g, rgb.b)
}

fn draw_square(frame: &mut Frame, area: Rect, square: &Square) {
    let style = if square.is_pressed() {
        Style::default().bg(Color::Black).fg(Color::White)
    } else {
        Style::default().bg(to_color(square.color())).fg(Color::Black)
    };

    frame.render_widget(Block::default().style(style), area);

    if area.height > 0 {
        let label_row = Rect::new(area.x, area.y + area.height / 2, area.width, 1);
        let label = Paragraph::new(square.number().to_string())
            .style(style.add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center);
        frame.render_widget(label, label_row);
    }
}

fn draw_overlay(frame: &mut Frame, area: Rect, text: &str) {
    let width = u16::try_from(text.chars().count() + 6)
        .unwrap_or(u16::MAX)
        .min(area.width);
    let height = 3.min(area.height);
    let popup = center_rect(area, width, height);

    frame.render_widget(Clear, popup);
    let message = Paragraph::new(text)
        .style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .style(Style::default().bg(Color::White).fg(Color::Black)),
        );
    frame.render_widget(message, popup);
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    Rect::new(
        area.x + area.width.saturating_sub(width) / 2,
        area.y + area.height.saturating_sub(height) / 2,
        width,
        height,
    )
}

/// [`Renderer`] drawing into a ratatui terminal.
#[derive(Debug)]
pub struct TerminalRenderer<B: Backend> {
    terminal: Terminal<B>,
}

impl<B: Backend> TerminalRenderer<B> {
    /// Wraps a terminal.
    pub fn new(terminal: Terminal<B>) -> Self {
        Self { terminal }
    }

    /// The wrapped terminal.
    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }
}

impl<B: Backend> Renderer for TerminalRenderer<B> {
    #[instrument(skip_all, fields(overlay = ?overlay))]
    fn draw(&mut self, grid: &Grid, overlay: Option<&str>) -> Result<(), DeviceError> {
        self.terminal
            .draw(|frame| draw(frame, grid, overlay))
            .map_err(|e| DeviceError::new(format!("Failed to draw frame: {}", e)))?;
        Ok(())
    }
}
