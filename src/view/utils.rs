//! Utility functions for rendering UI components

use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, List, ListItem, ListState},
    Frame,
};

pub fn render_scrollable_list(
    frame: &mut Frame,
    area: Rect,
    items: Vec<ListItem>,
    selected_index: usize,
    block: Block,
) {
    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default()); // Highlight handled by item styles

    let mut list_state = ListState::default();
    list_state.select(Some(selected_index));

    frame.render_stateful_widget(list, area, &mut list_state);
}

pub fn truncate_string(s: &str, max_width: usize) -> String {
    if s.chars().count() > max_width {
        let truncated: String = s.chars().take(max_width.saturating_sub(3)).collect();
        format!("{:<width$}", format!("{}...", truncated), width = max_width)
    } else {
        format!("{:<width$}", s, width = max_width)
    }
}

/// Rectangle of `width` x `height` centered in `area`, clipped to it
pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Area covered by the detail modal on a screen of `screen` size
pub fn detail_modal_area(screen: Rect) -> Rect {
    let width = (screen.width * 3 / 4).max(40);
    let height = (screen.height * 3 / 4).max(12);
    centered_rect(screen, width, height)
}

/// Column widths for result rows: (favorite, title, year, type)
pub fn calculate_result_column_widths(content_width: usize) -> (usize, usize, usize, usize) {
    // Format: " {fav}  {title}  {year}  {type}"
    let favorite_width = 2;
    let year_width = 9;
    let type_width = 10;
    let fixed_width = 1 + favorite_width + 2 + 2 + year_width + 2 + type_width;
    let title_width = content_width.saturating_sub(fixed_width).max(10);
    (favorite_width, title_width, year_width, type_width)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncation_pads_and_ellipsizes() {
        assert_eq!(truncate_string("Alien", 8), "Alien   ");
        assert_eq!(truncate_string("The Dark Knight", 8), "The D...");
    }

    #[test]
    fn modal_is_centered_inside_screen() {
        let screen = Rect::new(0, 0, 100, 40);
        let modal = detail_modal_area(screen);
        assert_eq!(modal, Rect::new(12, 5, 75, 30));
    }

    #[test]
    fn modal_never_exceeds_small_screens() {
        let screen = Rect::new(0, 0, 30, 10);
        let modal = detail_modal_area(screen);
        assert_eq!(modal, screen);
    }
}
