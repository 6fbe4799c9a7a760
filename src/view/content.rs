//! Main content area rendering (progress, messages, wallpaper groups)

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, ListItem, Padding, Paragraph, Wrap},
    Frame,
};

use super::surface::{GroupView, Surface};
use super::utils::{calculate_num_width, render_scrollable_list, truncate_string};

const IDLE_HINT: &str = "Type a MyAnimeList username and press Enter to find wallpapers\n\n\
Only completed anime are looked up\n\
Use Tab to move between the username and the results\n\
Use ↑/↓ to select a wallpaper; its link is shown below";

pub fn render_main_content(frame: &mut Frame, area: Rect, surface: &Surface) {
    if surface.loading {
        let loading = Paragraph::new("Loading wallpapers...")
            .style(Style::default().fg(Color::Yellow))
            .block(Block::default().borders(Borders::ALL).title(" Wallpapers "));
        frame.render_widget(loading, area);
        return;
    }

    if let Some(ref error) = surface.error {
        render_message(frame, area, " Error (Esc to dismiss) ", error, Color::Red, surface.message_focused);
        return;
    }

    if let Some(ref info) = surface.info {
        render_message(frame, area, " Info ", info, Color::Yellow, surface.message_focused);
        return;
    }

    if surface.results.is_empty() {
        let hint = Paragraph::new(IDLE_HINT)
            .style(Style::default().fg(Color::DarkGray))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .padding(Padding::horizontal(1)),
            );
        frame.render_widget(hint, area);
        return;
    }

    render_results(frame, area, surface);
}

fn render_message(frame: &mut Frame, area: Rect, title: &str, message: &str, color: Color, focused: bool) {
    let border_style = if focused {
        Style::default().fg(color).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(color)
    };

    let widget = Paragraph::new(message.to_string())
        .style(Style::default().fg(color))
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title.to_string())
                .padding(Padding::horizontal(1))
                .border_style(border_style),
        );
    frame.render_widget(widget, area);
}

fn render_results(frame: &mut Frame, area: Rect, surface: &Surface) {
    let border_style = if surface.results_focused {
        Style::default().fg(Color::Green)
    } else {
        Style::default()
    };

    // Format: " {num}  {full url}  {thumbnail}"
    let content_width = area.width.saturating_sub(4) as usize;
    let num_width = calculate_num_width(surface.item_count());
    let url_width = content_width.saturating_sub(1 + num_width + 2);

    let mut rows: Vec<ListItem> = Vec::new();
    let mut selected_row = None;

    for group in &surface.results {
        rows.push(group_header(group, content_width));

        if group.items.is_empty() {
            rows.push(ListItem::new(Span::styled(
                "   no wallpapers could be loaded",
                Style::default().fg(Color::DarkGray),
            )));
        }

        for item in &group.items {
            let is_selected = surface.selected == Some(item.index);
            if is_selected {
                selected_row = Some(rows.len());
            }

            let link_style = if is_selected && surface.results_focused {
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
            } else if is_selected {
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };

            let link = truncate_string(&item.full_url, url_width);
            let thumb_width = url_width.saturating_sub(link.chars().count() + 2);
            let mut spans = vec![
                Span::styled(
                    format!(" {:>width$}  ", item.index + 1, width = num_width),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(link, link_style),
            ];
            if thumb_width > 3 {
                spans.push(Span::styled(
                    format!("  {}", truncate_string(&item.thumbnail_url, thumb_width)),
                    Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM),
                ));
            }
            rows.push(ListItem::new(Line::from(spans)));
        }
    }

    let title = format!(" Wallpapers ({} shows, {} images) ", surface.results.len(), surface.item_count());
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .padding(Padding::horizontal(1))
        .border_style(border_style);

    render_scrollable_list(frame, area, rows, selected_row, block);
}

fn group_header(group: &GroupView, width: usize) -> ListItem<'static> {
    let title_style = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
    let mut spans = vec![Span::styled(truncate_string(&group.title, width), title_style)];

    if let Some(ref cover) = group.cover {
        let remaining = width.saturating_sub(group.title.chars().count() + 9);
        if remaining > 3 {
            spans.push(Span::styled(
                format!("  cover: {}", truncate_string(cover, remaining)),
                Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM),
            ));
        }
    }

    ListItem::new(Line::from(spans))
}
