//! Key and mouse event handling

use anyhow::Result;
use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::{Position, Rect};

use crate::model::{ActiveSection, SearchProvider};
use crate::view;
use super::{AppController, CloseReason};

fn is_back_key(key: &KeyEvent) -> bool {
    key.code == KeyCode::Left && key.modifiers.contains(KeyModifiers::ALT)
}

impl<P: SearchProvider> AppController<P> {
    pub async fn handle_key_event(&self, key: KeyEvent) -> Result<()> {
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }

        let mut model = self.model.lock().await;

        // Ctrl+Q / Ctrl+C quit from anywhere
        if key.modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key.code, KeyCode::Char('q') | KeyCode::Char('c'))
        {
            model.set_should_quit(true);
            return Ok(());
        }

        // Handle error message first (blocks all other interactions)
        if model.has_error() {
            if matches!(key.code, KeyCode::Esc | KeyCode::Enter) {
                model.clear_error();
            }
            return Ok(());
        }

        // Handle help popup
        if model.is_help_popup_open() {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('h') | KeyCode::Char('H')) {
                model.hide_help_popup();
            }
            return Ok(());
        }

        // Handle detail modal
        if model.is_detail_open() {
            drop(model);
            if is_back_key(&key) || key.code == KeyCode::Backspace {
                self.navigate_back().await;
                return Ok(());
            }
            match key.code {
                KeyCode::Esc => self.close_detail(CloseReason::Escape).await,
                KeyCode::Enter | KeyCode::Char('c') | KeyCode::Char('C') => {
                    self.close_detail(CloseReason::CloseControl).await
                }
                KeyCode::Char('x') | KeyCode::Char('X') => self.toggle_selected_favorite().await,
                _ => {}
            }
            return Ok(());
        }

        let section = model.ui_state().active_section;

        if key.code == KeyCode::BackTab {
            model.cycle_section_backward();
            return Ok(());
        }
        if key.code == KeyCode::Tab {
            model.cycle_section_forward();
            return Ok(());
        }

        match section {
            ActiveSection::Search => match key.code {
                KeyCode::Enter => {
                    let query = model.search_input().to_string();
                    model.set_active_section(ActiveSection::Results);
                    drop(model);
                    self.spawn(move |controller| async move {
                        controller.submit_search(&query).await;
                    });
                }
                KeyCode::Esc => {
                    model.clear_search();
                    drop(model);
                    self.cancel_pending_search().await;
                }
                KeyCode::Backspace => {
                    let text = model.backspace_search();
                    drop(model);
                    self.on_search_input_changed(text).await;
                }
                KeyCode::Char(c) => {
                    let text = model.append_to_search(c);
                    drop(model);
                    self.on_search_input_changed(text).await;
                }
                _ => {}
            },
            ActiveSection::Year => match key.code {
                KeyCode::Enter => {
                    drop(model);
                    self.spawn(|controller| async move { controller.apply_year_filter().await });
                }
                KeyCode::Esc => {
                    while !model.year_input().is_empty() {
                        model.backspace_year();
                    }
                    drop(model);
                    self.spawn(|controller| async move { controller.apply_year_filter().await });
                }
                KeyCode::Backspace => model.backspace_year(),
                KeyCode::Char(c) => model.append_to_year(c),
                _ => {}
            },
            ActiveSection::Results => {
                if is_back_key(&key) || key.code == KeyCode::Backspace {
                    drop(model);
                    self.navigate_back().await;
                    return Ok(());
                }
                match key.code {
                    KeyCode::Up => model.move_selection_up(),
                    KeyCode::Down => model.move_selection_down(),
                    KeyCode::Enter => {
                        drop(model);
                        self.spawn(|controller| async move { controller.open_selected().await });
                    }
                    KeyCode::Right | KeyCode::Char('n') | KeyCode::Char('N') => {
                        drop(model);
                        self.spawn(|controller| async move { controller.next_page().await });
                    }
                    KeyCode::Left | KeyCode::Char('p') | KeyCode::Char('P') => {
                        drop(model);
                        self.spawn(|controller| async move { controller.previous_page().await });
                    }
                    KeyCode::Home => {
                        drop(model);
                        self.spawn(|controller| async move { controller.go_to_page(1).await });
                    }
                    KeyCode::End => {
                        drop(model);
                        self.spawn(|controller| async move { controller.go_to_page(u32::MAX).await });
                    }
                    KeyCode::Char('x') | KeyCode::Char('X') => {
                        drop(model);
                        self.toggle_selected_favorite().await;
                    }
                    KeyCode::Char('f') | KeyCode::Char('F') => {
                        drop(model);
                        self.spawn(|controller| async move { controller.cycle_media_type().await });
                    }
                    KeyCode::Char('v') | KeyCode::Char('V') => {
                        drop(model);
                        self.spawn(|controller| async move { controller.toggle_favorites_view().await });
                    }
                    KeyCode::Char('t') | KeyCode::Char('T') => {
                        drop(model);
                        self.toggle_theme().await;
                    }
                    KeyCode::Char('h') | KeyCode::Char('H') => model.show_help_popup(),
                    KeyCode::Char('g') | KeyCode::Char('G') | KeyCode::Char('/') => {
                        model.set_active_section(ActiveSection::Search);
                    }
                    KeyCode::Char('y') | KeyCode::Char('Y') => {
                        model.set_active_section(ActiveSection::Year);
                    }
                    KeyCode::Char('q') | KeyCode::Char('Q') => model.set_should_quit(true),
                    _ => {}
                }
            }
        }
        Ok(())
    }

    /// A left click outside the detail modal counts as a backdrop click
    pub async fn handle_mouse_event(&self, mouse: MouseEvent, screen: Rect) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        if !self.model.lock().await.is_detail_open() {
            return;
        }
        let modal = view::detail_modal_area(screen);
        if !modal.contains(Position::new(mouse.column, mouse.row)) {
            self.close_detail(CloseReason::Backdrop).await;
        }
    }
}
