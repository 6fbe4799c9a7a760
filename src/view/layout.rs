//! Layout rendering (top bar, status line)

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph},
    Frame,
};

use super::surface::InputView;
use super::utils::truncate_string;

pub fn render_top_bar(frame: &mut Frame, area: Rect, input: &InputView) {
    let input_style = if !input.enabled {
        Style::default().fg(Color::DarkGray)
    } else if input.focused {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::White)
    };

    let input_text = if input.text.is_empty() {
        "Type a MyAnimeList username..."
    } else {
        &input.text
    };

    let title = if input.enabled { " Username " } else { " Username (busy) " };

    let field = Paragraph::new(input_text)
        .style(input_style)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .padding(Padding::horizontal(1))
                .border_style(if input.focused && input.enabled {
                    Style::default().fg(Color::Green)
                } else {
                    Style::default()
                }),
        );
    frame.render_widget(field, area);

    if input.focused && input.enabled {
        // border + padding on the left
        let typed = u16::try_from(input.text.chars().count()).unwrap_or(u16::MAX);
        let cursor_x = area.x.saturating_add(2).saturating_add(typed);
        if cursor_x < area.x.saturating_add(area.width.saturating_sub(1)) {
            frame.set_cursor_position((cursor_x, area.y + 1));
        }
    }
}

pub fn render_status_line(frame: &mut Frame, area: Rect, status: &str) {
    let width = area.width.saturating_sub(4) as usize;
    let line = Line::from(Span::styled(
        truncate_string(status, width),
        Style::default().fg(Color::Cyan),
    ));
    let status = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(status, area);
}
