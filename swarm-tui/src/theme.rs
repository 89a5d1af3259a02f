//! Obsidian/gold theme tokens for the Neural Swarm page.
//!
//! # Color Palette
//! - **Background**: Obsidian (base layer)
//! - **Gold**: primary accent (headings, figures, borders)
//! - **Gold light**: highlighted table rows
//! - **Gold dim**: dividers and kickers
//! - **Muted**: body copy and labels

use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub background: Color,
    pub gold: Color,
    pub gold_light: Color,
    pub gold_dim: Color,
    pub muted: Color,
    pub text: Color,
    pub white: Color,
    pub negative: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::obsidian_gold()
    }
}

impl Theme {
    pub const fn obsidian_gold() -> Self {
        Self {
            background: Color::Rgb(10, 10, 12),
            gold: Color::Rgb(201, 168, 76),
            gold_light: Color::Rgb(232, 204, 122),
            gold_dim: Color::Rgb(138, 115, 52),
            muted: Color::Rgb(140, 136, 128),
            text: Color::Rgb(214, 210, 200),
            white: Color::Rgb(245, 242, 235),
            negative: Color::Rgb(220, 90, 90),
        }
    }
}

const THEME: Theme = Theme::obsidian_gold();

pub fn gold() -> Style {
    Style::default().fg(THEME.gold)
}

pub fn gold_bold() -> Style {
    gold().add_modifier(Modifier::BOLD)
}

pub fn gold_light() -> Style {
    Style::default().fg(THEME.gold_light)
}

pub fn gold_dim() -> Style {
    Style::default().fg(THEME.gold_dim)
}

/// A projected value below its starting capital.
pub fn loss() -> Style {
    Style::default().fg(THEME.negative)
}

pub fn muted() -> Style {
    Style::default().fg(THEME.muted)
}

pub fn text() -> Style {
    Style::default().fg(THEME.text)
}

pub fn heading() -> Style {
    Style::default().fg(THEME.white).add_modifier(Modifier::BOLD)
}

pub fn background() -> Style {
    Style::default().bg(THEME.background)
}

/// Navigation bar: transparent at the top of the page, solid once scrolled.
pub fn nav_bar(scrolled: bool) -> Style {
    if scrolled {
        Style::default().bg(Color::Rgb(22, 21, 18)).fg(THEME.gold)
    } else {
        Style::default().bg(THEME.background).fg(THEME.gold)
    }
}

/// A block in the middle of its fade-in.
pub fn fading() -> Style {
    Style::default().add_modifier(Modifier::DIM)
}
