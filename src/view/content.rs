//! Results area rendering (search results, favorites, empty states)

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, ListItem, Paragraph},
    Frame,
};
use ratatui::widgets::Padding;

use crate::model::{format_media_type, ActiveSection, ContentState, ContentView, ResultRow, UiState};
use super::theme::Palette;
use super::utils::{calculate_result_column_widths, render_scrollable_list, truncate_string};

pub const FAVORITE_MARK: &str = "♥";
pub const NOT_FAVORITE_MARK: &str = "♡";

pub fn render_main_content(
    frame: &mut Frame,
    area: Rect,
    ui_state: &UiState,
    content_state: &ContentState,
    palette: &Palette,
) {
    let is_focused = ui_state.active_section == ActiveSection::Results;
    let border_style = palette.border(is_focused);

    match &content_state.view {
        ContentView::Empty if content_state.is_loading() => {
            render_message(frame, area, " Results ", "Loading...", palette.warning, border_style);
        }
        ContentView::Empty => {
            let help = "Type at least two characters to search OMDb\n\n\
                        Use Tab to move between search, year and results\n\
                        Use ↑/↓ to select, Enter to open details\n\
                        Press V to show favorites, H for help";
            render_message(frame, area, " Results ", help, palette.muted, border_style);
        }
        ContentView::NoMatches { query } => {
            let message = format!("No results found for \"{}\"", query);
            render_message(frame, area, " Results ", &message, palette.muted, border_style);
        }
        ContentView::SearchResults(results) => {
            let title = format!(" Results for \"{}\" ", results.query);
            render_rows(frame, area, &title, &results.rows, results.selected_index, is_focused, palette);
        }
        ContentView::Favorites { rows, .. } if rows.is_empty() => {
            let message = if content_state.is_loading() {
                "Loading favorites..."
            } else {
                "No favorites yet. Press X on a result to add one."
            };
            render_message(frame, area, " Favorites ", message, palette.muted, border_style);
        }
        ContentView::Favorites { rows, selected_index } => {
            render_rows(frame, area, " Favorites ", rows, *selected_index, is_focused, palette);
        }
    }
}

fn render_message(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    message: &str,
    color: ratatui::style::Color,
    border_style: Style,
) {
    let content = Paragraph::new(message.to_string())
        .style(Style::default().fg(color))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title.to_string())
                .padding(Padding::horizontal(1))
                .border_style(border_style),
        );
    frame.render_widget(content, area);
}

fn render_rows(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    rows: &[ResultRow],
    selected_index: usize,
    is_focused: bool,
    palette: &Palette,
) {
    let content_width = area.width.saturating_sub(4) as usize;
    let items = result_items(rows, selected_index, is_focused, content_width, palette);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(title.to_string())
        .padding(Padding::horizontal(1))
        .border_style(palette.border(is_focused));

    render_scrollable_list(frame, area, items, selected_index, block);
}

fn result_items(
    rows: &[ResultRow],
    selected_index: usize,
    is_focused: bool,
    content_width: usize,
    palette: &Palette,
) -> Vec<ListItem<'static>> {
    let (favorite_width, title_width, year_width, type_width) =
        calculate_result_column_widths(content_width);

    rows.iter()
        .enumerate()
        .map(|(i, row)| {
            let style = if i == selected_index {
                palette.selected(is_focused)
            } else {
                Style::default().fg(palette.text)
            };
            let (mark, mark_style) = if row.favorite {
                (FAVORITE_MARK, Style::default().fg(palette.favorite))
            } else {
                (NOT_FAVORITE_MARK, Style::default().fg(palette.muted))
            };

            ListItem::new(Line::from(vec![
                Span::raw(" "),
                Span::styled(format!("{:<favorite_width$}", mark), mark_style),
                Span::raw("  "),
                Span::styled(truncate_string(&row.item.title, title_width), style),
                Span::raw("  "),
                Span::styled(truncate_string(&row.item.year, year_width), style),
                Span::raw("  "),
                Span::styled(
                    truncate_string(&format_media_type(&row.item.media_type), type_width),
                    Style::default().fg(palette.info),
                ),
            ]))
        })
        .collect()
}
