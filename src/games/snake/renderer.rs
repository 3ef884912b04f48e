use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use super::game::SnakeGame;
use super::state::{Phase, Point};

/// Terminal cells are taller than they are wide; two columns per grid cell
/// keeps the board roughly square.
const CELL_COLUMNS: u16 = 2;

const HEAD_STYLE: Style = Style::new().bg(Color::Green);
const BODY_STYLE: Style = Style::new().bg(Color::LightGreen);
const FOOD_STYLE: Style = Style::new().bg(Color::Red);
const OVERLAY_STYLE: Style = Style::new().fg(Color::White).add_modifier(Modifier::BOLD);

pub fn draw(game: &SnakeGame, frame: &mut Frame) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(frame.area());

    draw_header(game, frame, chunks[0]);
    draw_board(game, frame, chunks[1]);
}

/// Score readout on the left, the start control on the right. The control
/// is dimmed while a game is running and its label tracks the phase.
fn draw_header(game: &SnakeGame, frame: &mut Frame, area: Rect) {
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    frame.render_widget(
        Paragraph::new(format!("Score: {}", game.score()))
            .block(Block::default().borders(Borders::ALL).title(" gridsnake ")),
        halves[0],
    );

    let button_style = if game.start_enabled() {
        Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::new().fg(Color::DarkGray)
    };
    frame.render_widget(
        Paragraph::new(format!("[ {} ]", game.start_label()))
            .style(button_style)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title(" Enter ")),
        halves[1],
    );
}

fn draw_board(game: &SnakeGame, frame: &mut Frame, area: Rect) {
    if area.height == 0 || area.width == 0 {
        return;
    }

    let tiles = game.config().tile_count() as u16;
    let width = tiles * CELL_COLUMNS + 2;
    let height = tiles + 2;

    if area.width < width || area.height < height {
        frame.render_widget(
            Paragraph::new("Terminal too small for the board").alignment(Alignment::Center),
            Rect::new(area.x, area.y + area.height / 2, area.width, 1),
        );
        return;
    }

    let board = Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    );
    let block = Block::default().borders(Borders::ALL);
    let inner = block.inner(board);
    frame.render_widget(block, board);

    if let Some(food) = game.food() {
        fill_cell(frame, inner, food, FOOD_STYLE);
    }
    if game.phase() != Phase::Idle {
        for (i, cell) in game.chain().cells().enumerate() {
            let style = if i == 0 { HEAD_STYLE } else { BODY_STYLE };
            fill_cell(frame, inner, cell, style);
        }
    }

    match game.phase() {
        Phase::Idle => overlay(frame, inner, "Press Enter to start"),
        Phase::Over { won } => {
            let verdict = if won { "You win!" } else { "Game over!" };
            overlay(frame, inner, &format!("{verdict} Score: {}", game.score()));
        }
        Phase::Running => {}
    }
}

fn fill_cell(frame: &mut Frame, inner: Rect, cell: Point, style: Style) {
    let rect = Rect::new(
        inner.x + cell.x as u16 * CELL_COLUMNS,
        inner.y + cell.y as u16,
        CELL_COLUMNS,
        1,
    );
    frame.render_widget(Paragraph::new("").style(style), rect);
}

fn overlay(frame: &mut Frame, inner: Rect, text: &str) {
    let line = Rect::new(inner.x, inner.y + inner.height / 2, inner.width, 1);
    frame.render_widget(
        Paragraph::new(text)
            .alignment(Alignment::Center)
            .style(OVERLAY_STYLE),
        line,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::GameConfig;
    use crate::games::snake::state::Direction as Dir;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn render_to_text(game: &SnakeGame, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| draw(game, frame)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer.cell((x, y)).map(|c| c.symbol()).unwrap_or(" "));
            }
            text.push('\n');
        }
        text
    }

    fn game() -> SnakeGame {
        SnakeGame::with_rng(GameConfig::default(), StdRng::seed_from_u64(7))
    }

    #[test]
    fn idle_screen_shows_prompt_and_start_button() {
        let text = render_to_text(&game(), 80, 30);
        assert!(text.contains("Score: 0"));
        assert!(text.contains("[ Start ]"));
        assert!(text.contains("Press Enter to start"));
    }

    #[test]
    fn running_screen_drops_the_prompt() {
        let mut game = game();
        game.start();
        let text = render_to_text(&game, 80, 30);
        assert!(text.contains("[ Restart ]"));
        assert!(!text.contains("Press Enter to start"));
    }

    #[test]
    fn game_over_screen_shows_the_final_score() {
        let mut game = SnakeGame::with_rng(
            GameConfig {
                start_cell: (0, 5),
                ..GameConfig::default()
            },
            StdRng::seed_from_u64(7),
        );
        game.start();
        game.steer(Dir::Left);
        game.tick();
        let text = render_to_text(&game, 80, 30);
        assert!(text.contains("[ Play Again ]"));
        assert!(text.contains("Game over! Score: 0"));
    }

    #[test]
    fn cramped_terminal_gets_a_notice_instead_of_a_board() {
        let text = render_to_text(&game(), 60, 10);
        assert!(text.contains("Terminal too small"));
    }
}
