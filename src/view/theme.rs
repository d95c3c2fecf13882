//! Color palettes for the dark and light themes

use ratatui::style::{Color, Modifier, Style};

use crate::model::Theme;

#[derive(Clone, Copy, Debug)]
pub struct Palette {
    pub text: Color,
    pub muted: Color,
    pub accent: Color,
    pub info: Color,
    pub warning: Color,
    pub error: Color,
    pub favorite: Color,
    pub popup_bg: Color,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self {
                text: Color::White,
                muted: Color::DarkGray,
                accent: Color::Green,
                info: Color::Cyan,
                warning: Color::Yellow,
                error: Color::Red,
                favorite: Color::LightRed,
                popup_bg: Color::Black,
            },
            Theme::Light => Self {
                text: Color::Black,
                muted: Color::Gray,
                accent: Color::Blue,
                info: Color::Magenta,
                warning: Color::Rgb(176, 110, 0),
                error: Color::Red,
                favorite: Color::Red,
                popup_bg: Color::White,
            },
        }
    }

    pub fn border(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(self.accent)
        } else {
            Style::default()
        }
    }

    pub fn selected(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(self.accent).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.text).add_modifier(Modifier::BOLD)
        }
    }
}
