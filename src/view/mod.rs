//! View module - UI rendering
//!
//! This module handles all UI rendering for the application using ratatui.
//! It is organized into submodules by component type:
//!
//! - `utils`: Shared utility functions (truncation, centered areas, scrollable lists)
//! - `theme`: Dark and light palettes
//! - `layout`: Top bar (search, filters, theme) and bottom status bar
//! - `content`: Results area rendering
//! - `overlays`: Modal overlays (error, detail, help)

mod utils;
mod theme;
mod layout;
mod content;
mod overlays;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use crate::model::{ContentState, PaginationControls, UiState};

pub use utils::detail_modal_area;

pub struct AppView;

impl AppView {
    pub fn render(
        frame: &mut Frame,
        ui_state: &UiState,
        content_state: &ContentState,
        pagination: Option<&PaginationControls>,
    ) {
        let palette = theme::Palette::for_theme(ui_state.theme);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Search bar + filters
                Constraint::Min(0),    // Results
                Constraint::Length(3), // Caption + pagination
            ])
            .split(frame.area());

        layout::render_top_bar(frame, chunks[0], ui_state, &palette);
        content::render_main_content(frame, chunks[1], ui_state, content_state, &palette);
        layout::render_status_bar(frame, chunks[2], ui_state, content_state, pagination, &palette);

        if let Some(detail) = &content_state.detail {
            overlays::render_detail_modal(frame, detail, &palette);
        }

        // Error notification overlay (if there's an error)
        if ui_state.error_message.is_some() {
            overlays::render_error_notification(frame, ui_state, &palette);
        }

        // Help popup overlay (if open)
        if ui_state.show_help_popup {
            overlays::render_help_popup(frame, &palette);
        }
    }
}
