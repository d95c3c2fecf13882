//! Overlay rendering (error notification, detail modal, help popup)

use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use ratatui::widgets::Padding;

use crate::model::{format_media_type, DetailView, UiState};
use super::content::{FAVORITE_MARK, NOT_FAVORITE_MARK};
use super::theme::Palette;
use super::utils::{centered_rect, detail_modal_area};

pub fn render_error_notification(frame: &mut Frame, ui_state: &UiState, palette: &Palette) {
    if let Some(ref error_msg) = ui_state.error_message {
        let area = frame.area();

        // Fixed width popup (responsive to screen size)
        let popup_width = 52u16.min(area.width.saturating_sub(4));
        let inner_width = popup_width.saturating_sub(4).max(1) as usize;

        let error_line_count = error_msg.chars().count().div_ceil(inner_width) as u16;

        // Height: top border (1) + error lines + bottom border (1)
        let popup_height = 2 + error_line_count.max(1);
        let popup_area = centered_rect(area, popup_width, popup_height);

        frame.render_widget(Clear, popup_area);

        let error_widget = Paragraph::new(error_msg.to_string())
            .style(Style::default().fg(palette.error))
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(palette.error))
                    .title(" Error (Esc to dismiss) ")
                    .title_style(Style::default().fg(palette.error).add_modifier(Modifier::BOLD))
                    .style(Style::default().bg(palette.popup_bg)),
            );

        frame.render_widget(error_widget, popup_area);
    }
}

/// Detail modal: heading, available fields and the plot.
/// Fields the provider marked unavailable are left out.
pub fn render_detail_modal(frame: &mut Frame, detail: &DetailView, palette: &Palette) {
    let popup_area = detail_modal_area(frame.area());
    frame.render_widget(Clear, popup_area);

    let record = &detail.record;
    let label_style = Style::default().fg(palette.accent).add_modifier(Modifier::BOLD);
    let text_style = Style::default().fg(palette.text);

    let (mark, mark_style) = if detail.favorite {
        (FAVORITE_MARK, Style::default().fg(palette.favorite))
    } else {
        (NOT_FAVORITE_MARK, Style::default().fg(palette.muted))
    };

    let mut lines = vec![
        Line::from(vec![
            Span::styled(format!("{} ", mark), mark_style),
            Span::styled(
                record.title.clone(),
                text_style.add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!(" ({}) {}", record.year, format_media_type(&record.media_type)),
                Style::default().fg(palette.info),
            ),
        ]),
        Line::default(),
    ];

    for (label, value) in record.available_fields() {
        lines.push(Line::from(vec![
            Span::styled(format!("{:>11}  ", label), label_style),
            Span::styled(value.to_string(), text_style),
        ]));
    }

    if let Some(plot) = &record.plot {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(plot.clone(), text_style)));
    }

    let modal = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(palette.info))
                .title(" Details ")
                .title_bottom(Line::from(" X: favorite | C/Esc: close | Backspace: back ").right_aligned())
                .title_style(Style::default().fg(palette.info).add_modifier(Modifier::BOLD))
                .padding(Padding::horizontal(1))
                .style(Style::default().bg(palette.popup_bg)),
        );

    frame.render_widget(modal, popup_area);
}

pub fn render_help_popup(frame: &mut Frame, palette: &Palette) {
    let area = frame.area();

    let keybindings = [
        ("", "── Navigation ──"),
        ("Tab / Shift+Tab", "Cycle search, year, results"),
        ("↑ / ↓", "Move selection"),
        ("Enter", "Search / Open details"),
        ("← / → or P / N", "Previous / Next page"),
        ("Home / End", "First / Last page"),
        ("Backspace", "Go back"),
        ("G or /", "Focus search"),
        ("Y", "Focus year filter"),
        ("", ""),
        ("", "── Filters ──"),
        ("F", "Cycle type (any, movie, series, episode)"),
        ("Enter (year)", "Apply year filter"),
        ("", ""),
        ("", "── Actions ──"),
        ("X", "Toggle favorite"),
        ("V", "Show favorites / results"),
        ("T", "Toggle theme"),
        ("", ""),
        ("", "── General ──"),
        ("H", "Toggle this help"),
        ("Q / Ctrl+Q", "Quit"),
    ];

    let popup_height = keybindings.len() as u16 + 2;
    let popup_area = centered_rect(area, 66, popup_height);

    frame.render_widget(Clear, popup_area);

    let lines: Vec<Line> = keybindings
        .iter()
        .map(|(key, desc)| {
            if key.is_empty() {
                // Section header or empty line
                Line::from(Span::styled(
                    format!("{:^38}", desc),
                    Style::default().fg(palette.warning).add_modifier(Modifier::BOLD),
                ))
            } else {
                Line::from(vec![
                    Span::styled(
                        format!("{:>18}", key),
                        Style::default().fg(palette.accent).add_modifier(Modifier::BOLD),
                    ),
                    Span::raw("  "),
                    Span::styled(desc.to_string(), Style::default().fg(palette.text)),
                ])
            }
        })
        .collect();

    let help_text = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(palette.info))
                .title(" Help (H or Esc to close) ")
                .title_style(Style::default().fg(palette.info).add_modifier(Modifier::BOLD))
                .style(Style::default().bg(palette.popup_bg)),
        )
        .style(Style::default().bg(palette.popup_bg));

    frame.render_widget(help_text, popup_area);
}
