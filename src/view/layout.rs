//! Layout rendering (top bar with search and filters, bottom status bar)

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use ratatui::widgets::Padding;

use crate::model::{
    ActiveSection, ContentState, ContentView, PaginationControls, PaginationMode, ResultsSource,
    UiState,
};
use super::theme::Palette;

pub fn render_top_bar(frame: &mut Frame, area: Rect, ui_state: &UiState, palette: &Palette) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),     // Search input
            Constraint::Length(12), // Year filter
            Constraint::Length(16), // Type filter
            Constraint::Length(11), // Theme
        ])
        .split(area);

    let search_focused = ui_state.active_section == ActiveSection::Search;
    let (search_text, search_style) = if ui_state.search_input.is_empty() {
        ("Type to search...", Style::default().fg(palette.muted))
    } else {
        (ui_state.search_input.as_str(), palette.border(search_focused).fg(palette.text))
    };
    let search = Paragraph::new(search_text)
        .style(search_style)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Search ")
                .padding(Padding::horizontal(1))
                .border_style(palette.border(search_focused)),
        );
    frame.render_widget(search, chunks[0]);

    let year_focused = ui_state.active_section == ActiveSection::Year;
    let year_text = if ui_state.year_input.is_empty() && !year_focused {
        "Any"
    } else {
        ui_state.year_input.as_str()
    };
    let year = Paragraph::new(year_text)
        .style(Style::default().fg(palette.text))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Year ")
                .padding(Padding::horizontal(1))
                .border_style(palette.border(year_focused)),
        );
    frame.render_widget(year, chunks[1]);

    let type_text = ui_state
        .filters
        .media_type
        .map(|t| t.label())
        .unwrap_or("Any");
    let media_type = Paragraph::new(type_text)
        .style(Style::default().fg(palette.info))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Type (F) ")
                .padding(Padding::horizontal(1)),
        );
    frame.render_widget(media_type, chunks[2]);

    let theme = Paragraph::new(ui_state.theme.as_str())
        .style(Style::default().fg(palette.info))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Theme ")
                .padding(Padding::horizontal(1)),
        );
    frame.render_widget(theme, chunks[3]);
}

/// Caption on the left, Previous/Next controls on the right
pub fn render_status_bar(
    frame: &mut Frame,
    area: Rect,
    ui_state: &UiState,
    content_state: &ContentState,
    pagination: Option<&PaginationControls>,
    palette: &Palette,
) {
    let caption = match (&content_state.view, ui_state.source) {
        (ContentView::SearchResults(results), ResultsSource::Search) => results.caption(),
        (ContentView::Favorites { rows, .. }, ResultsSource::Favorites) => {
            format!("{} favorite(s)", rows.len())
        }
        _ => String::new(),
    };
    let caption = if content_state.is_loading() {
        format!("{} (loading...)", caption).trim_start().to_string()
    } else {
        caption
    };

    let controls = pagination.map(|p| pagination_line(p, palette)).unwrap_or_default();

    let bar = Paragraph::new(format!(" {}", caption))
        .style(Style::default().fg(palette.text))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title_bottom(controls.right_aligned())
                .title_bottom(Line::from(" H: help ").left_aligned()),
        );
    frame.render_widget(bar, area);
}

fn pagination_line(controls: &PaginationControls, palette: &Palette) -> Line<'static> {
    let enabled = Style::default().fg(palette.accent).add_modifier(Modifier::BOLD);
    let disabled = Style::default().fg(palette.muted);

    match controls.mode {
        PaginationMode::Replace => Line::from(vec![
            Span::styled(
                " ◀ Previous ",
                if controls.previous_enabled { enabled } else { disabled },
            ),
            Span::raw(format!(
                "Page {} of {} ",
                controls.page,
                if controls.total_pages == 0 {
                    "?".to_string()
                } else {
                    controls.total_pages.to_string()
                }
            )),
            Span::styled(
                "Next ▶ ",
                if controls.next_enabled { enabled } else { disabled },
            ),
        ]),
        PaginationMode::Append => Line::from(Span::styled(
            " Load more ▶ ",
            if controls.next_enabled { enabled } else { disabled },
        )),
    }
}
