//! Terminal UI rendering with ratatui
//!
//! Pure readers of engine state: nothing in here mutates the game.

use crate::game::{Game, GameState};
use crate::menu::{Menu, MenuAction};
use crate::piece::Piece;
use crate::settings::Settings;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use std::collections::HashSet;

/// Side panel width: next-piece box and stats
const PANEL_WIDTH: u16 = 16;

/// Render the difficulty-select menu
pub fn render_menu(frame: &mut Frame, menu: &Menu) {
    let area = frame.area();
    let menu_area = center_rect(area, 40, 16);

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(8)])
        .split(menu_area);

    let title_lines = vec![
        Line::styled("G R I D F A L L", Style::default().fg(Color::Cyan).bold()),
        Line::raw(""),
        Line::styled("Select Difficulty", Style::default().fg(Color::White)),
    ];
    frame.render_widget(
        Paragraph::new(title_lines).alignment(Alignment::Center),
        layout[0],
    );

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));
    let inner = block.inner(layout[1]);
    frame.render_widget(block, layout[1]);

    let mut lines = vec![Line::raw("")];
    for (i, entry) in Menu::entries().iter().enumerate() {
        let prefix = if i == menu.selected { "▶ " } else { "  " };
        let line = match entry {
            MenuAction::Start(difficulty) => {
                let style = if i == menu.selected {
                    Style::default().fg(difficulty.color()).bold()
                } else {
                    Style::default().fg(difficulty.color())
                };
                Line::styled(format!("{}{}", prefix, difficulty.name()), style)
            }
            MenuAction::Quit => {
                let style = if i == menu.selected {
                    Style::default().fg(Color::Yellow).bold()
                } else {
                    Style::default().fg(Color::White)
                };
                Line::styled(format!("{}Quit", prefix), style)
            }
        };
        lines.push(line);
        lines.push(Line::raw(""));
    }
    lines.push(Line::styled(
        "↑↓ Select  Enter Confirm  Q Quit",
        Style::default().fg(Color::DarkGray),
    ));

    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}

/// Render the entire game view: board, next piece, stats, and overlays
pub fn render_game(frame: &mut Frame, game: &Game, settings: &Settings) {
    let area = frame.area();
    let board_width = game.board.width() as u16 * 2 + 2;
    let board_height = game.board.height() as u16 + 2;
    let game_area = center_rect(area, board_width + PANEL_WIDTH, board_height);

    let main_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(board_width),
            Constraint::Length(PANEL_WIDTH),
        ])
        .split(game_area);

    render_board(frame, main_layout[0], game, settings);

    let right_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(7), Constraint::Min(6)])
        .split(main_layout[1]);

    render_next(frame, right_layout[0], game, settings);
    render_stats(frame, right_layout[1], game);

    match game.state {
        GameState::Paused => render_overlay(frame, area, "PAUSED", "Press P to resume"),
        GameState::GameOver => {
            let subtitle = format!("Score: {}  |  R restart, Esc menu", game.score.points);
            render_overlay(frame, area, "GAME OVER", &subtitle);
        }
        GameState::Playing => {}
    }
}

/// Render the board grid with the falling piece overlaid
fn render_board(frame: &mut Frame, area: Rect, game: &Game, settings: &Settings) {
    let (block_char, empty_char) = settings.visual.block_chars();

    let block = Block::default()
        .title(format!(" Level {} ", game.score.level))
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    // The falling piece is hidden while paused or after game over
    let piece_cells: HashSet<(i32, i32)> = if game.state == GameState::Playing {
        game.current.cells().collect()
    } else {
        HashSet::new()
    };

    let mut lines = Vec::with_capacity(game.board.height());
    for (row, cells) in game.board.rows().iter().enumerate() {
        let mut spans = Vec::with_capacity(game.board.width());
        for (col, cell) in cells.iter().enumerate() {
            let span = if piece_cells.contains(&(row as i32, col as i32)) {
                Span::styled(block_char, Style::default().fg(game.current.kind.color()))
            } else {
                match cell {
                    crate::board::Cell::Filled(kind) => {
                        Span::styled(block_char, Style::default().fg(kind.color()))
                    }
                    crate::board::Cell::Empty => {
                        Span::styled(empty_char, Style::default().fg(Color::DarkGray))
                    }
                }
            };
            spans.push(span);
        }
        lines.push(Line::from(spans));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Render the next-piece preview box
fn render_next(frame: &mut Frame, area: Rect, game: &Game, settings: &Settings) {
    let (block_char, _) = settings.visual.block_chars();

    let block = Block::default()
        .title(" NEXT ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    // The preview is hidden while paused
    if game.state == GameState::Paused {
        return;
    }

    let lines = shape_lines(&game.next, block_char);
    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        inner,
    );
}

/// Lines drawing a piece's shape in its color, for the preview box
fn shape_lines(piece: &Piece, block_char: &'static str) -> Vec<Line<'static>> {
    let style = Style::default().fg(piece.kind.color());
    let mut lines = vec![Line::raw("")];
    for r in 0..piece.shape.height() {
        let mut text = String::new();
        for c in 0..piece.shape.width() {
            if piece.shape.cells().any(|cell| cell == (r, c)) {
                text.push_str(block_char);
            } else {
                text.push_str("  ");
            }
        }
        lines.push(Line::styled(text, style));
    }
    lines
}

/// Render the score / level / lines panel
fn render_stats(frame: &mut Frame, area: Rect, game: &Game) {
    let block = Block::default()
        .title(" STATS ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = vec![
        Line::raw(""),
        Line::from(vec![
            Span::styled("Score ", Style::default().fg(Color::Gray)),
            Span::styled(game.score.points.to_string(), Style::default().fg(Color::White).bold()),
        ]),
        Line::from(vec![
            Span::styled("Level ", Style::default().fg(Color::Gray)),
            Span::styled(game.score.level.to_string(), Style::default().fg(Color::White)),
        ]),
        Line::from(vec![
            Span::styled("Lines ", Style::default().fg(Color::Gray)),
            Span::styled(game.score.lines.to_string(), Style::default().fg(Color::White)),
        ]),
        Line::raw(""),
        Line::styled(
            game.difficulty().name(),
            Style::default().fg(game.difficulty().color()),
        ),
    ];

    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}

/// Render a centered text overlay (pause / game over)
fn render_overlay(frame: &mut Frame, area: Rect, title: &str, subtitle: &str) {
    let width = (subtitle.len() as u16 + 6).max(24);
    let overlay = center_rect(area, width, 5);
    frame.render_widget(Clear, overlay);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));
    let inner = block.inner(overlay);
    frame.render_widget(block, overlay);

    let lines = vec![
        Line::styled(title.to_string(), Style::default().fg(Color::Yellow).bold()),
        Line::styled(subtitle.to_string(), Style::default().fg(Color::White)),
    ];
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}

/// Center a rect within another rect
fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}
