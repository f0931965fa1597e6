use crate::game::{Cell, Game, Piece, COLS, ROWS};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render(
    frame: &mut Frame,
    game: &Game,
    current_name: &str,
    selected_column: usize,
    message: &Option<String>,
    game_mode: &str,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(15),   // Board
            Constraint::Length(3), // Message
            Constraint::Length(3), // Controls
        ])
        .split(frame.area());

    render_header(frame, game, current_name, game_mode, chunks[0]);
    render_board(frame, game, selected_column, chunks[1]);
    render_message(frame, message, chunks[2]);
    render_controls(frame, chunks[3]);
}

fn piece_color(piece: Piece) -> Color {
    match piece {
        Piece::X => Color::Red,
        Piece::O => Color::Yellow,
    }
}

fn render_header(
    frame: &mut Frame,
    game: &Game,
    current_name: &str,
    game_mode: &str,
    area: ratatui::layout::Rect,
) {
    let piece = game.to_move();

    let status = if game.is_terminal() {
        format!("Game Over  |  {}", game_mode)
    } else {
        format!(
            "Current Player: {} ({})  |  {}",
            current_name,
            piece.marker(),
            game_mode
        )
    };

    let header = Paragraph::new(status)
        .style(
            Style::default()
                .fg(piece_color(piece))
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Connect Four"));

    frame.render_widget(header, area);
}

/// Style for a column number: selected, still open, or no longer playable.
fn column_style(selected: bool, open: bool) -> Style {
    if selected {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
    } else if open {
        Style::default()
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

fn render_board(
    frame: &mut Frame,
    game: &Game,
    selected_column: usize,
    area: ratatui::layout::Rect,
) {
    let board = game.board();
    let open = game.legal_columns();
    let mut lines = Vec::new();

    // Column numbers: selection highlighted, full columns dimmed
    let mut col_line = vec![Span::raw("   ")]; // Padding (3 chars to match "  ║")
    for column in 1..=COLS {
        col_line.push(Span::styled(
            format!(" {} ", column),
            column_style(column == selected_column, open.contains(&column)),
        ));
    }
    col_line.push(Span::raw("  ")); // Suffix padding to match " ║"
    lines.push(Line::from(col_line));

    lines.push(Line::from("  ╔══════════════════════╗"));

    for row in 0..ROWS {
        let mut row_spans = vec![Span::raw("  ║")];

        for col in 0..COLS {
            let (symbol, color) = match board.get(row, col) {
                Cell::Empty => (" - ", Color::DarkGray),
                Cell::X => (" X ", piece_color(Piece::X)),
                Cell::O => (" O ", piece_color(Piece::O)),
            };
            row_spans.push(Span::styled(symbol, Style::default().fg(color)));
        }

        row_spans.push(Span::raw(" ║"));
        lines.push(Line::from(row_spans));
    }

    lines.push(Line::from("  ╚══════════════════════╝"));

    // Selection indicator
    let mut indicator_line = vec![Span::raw("   ")];
    for column in 1..=COLS {
        if column == selected_column {
            indicator_line.push(Span::styled(" ▲ ", Style::default().fg(Color::Cyan)));
        } else {
            indicator_line.push(Span::raw("   "));
        }
    }
    indicator_line.push(Span::raw("  "));
    lines.push(Line::from(indicator_line));

    let board_widget = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(board_widget, area);
}

fn render_message(frame: &mut Frame, message: &Option<String>, area: ratatui::layout::Rect) {
    let text = message.as_deref().unwrap_or("");
    let msg_widget = Paragraph::new(text)
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(msg_widget, area);
}

fn render_controls(frame: &mut Frame, area: ratatui::layout::Rect) {
    let controls = Paragraph::new(Line::from(
        "←/→ or 1-7: Select  |  Enter: Drop  |  C: Computer on/off  |  R: Restart  |  Q: Quit",
    ))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL).title("Controls"));

    frame.render_widget(controls, area);
}
