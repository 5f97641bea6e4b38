//! Snapshot header, key menu and full-screen notices

use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::Paragraph,
    Frame,
};

pub const MENU_TEXT: &str =
    "[Q] QUIT  [<] PREVIOUS  [>] NEXT  [A] ANIMATE  [4|8|6|5] CURSOR L|U|R|D";
pub const HEAT_MENU_TEXT: &str = "[Q] QUIT  [H] HEAP  [4|8|6|5] CURSOR L|U|R|D";
pub const ANIME_MENU_TEXT: &str = "[S] STOP  [P] PAUSE  [R] RESTART";
pub const ANIME_CONTINUE_TEXT: &str = "[C] CONTINUE";
pub const RESIZE_REQ_TEXT: &str = "Increase the size of your screen, please";
pub const INTRO_TEXT: &str = "HEAP MAP!";

/// Which key menu is shown on the last line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Menu {
    Main { heat_toggle: bool },
    Heat { heat_toggle: bool },
    Animation,
    Paused,
}

impl Menu {
    pub fn text(self) -> String {
        match self {
            Menu::Main { heat_toggle: true } => format!("{}  [H] HEAT", MENU_TEXT),
            Menu::Main { heat_toggle: false } => MENU_TEXT.to_string(),
            Menu::Heat { heat_toggle: true } => HEAT_MENU_TEXT.to_string(),
            Menu::Heat { heat_toggle: false } => "[Q] QUIT  [4|8|6|5] CURSOR L|U|R|D".to_string(),
            Menu::Animation => ANIME_MENU_TEXT.to_string(),
            Menu::Paused => ANIME_CONTINUE_TEXT.to_string(),
        }
    }
}

/// Header text for the heap view
pub fn snapshot_header(current: usize, total: usize, timestamp: f64) -> String {
    format!("SNAPSHOT: {}/{}  ({}s)", current, total, timestamp)
}

/// Render the header centered over the map (`margin` skips the address column)
pub fn render_header(frame: &mut Frame, area: Rect, text: &str, margin: u16) {
    let area = Rect {
        x: area.x + margin.min(area.width),
        width: area.width.saturating_sub(margin),
        ..area
    };
    let paragraph = Paragraph::new(Line::from(text.to_string()))
        .style(Style::default().fg(DEFAULT_THEME.info_text))
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

/// Render the key menu on the bottom line
pub fn render_menu(frame: &mut Frame, area: Rect, menu: Menu) {
    let paragraph = Paragraph::new(Line::from(menu.text()))
        .style(
            Style::default()
                .fg(DEFAULT_THEME.menu)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

/// Render a single bold line in the middle of the screen
pub fn render_notice(frame: &mut Frame, area: Rect, text: &str, is_error: bool) {
    let row = Rect {
        y: area.y + area.height / 2,
        height: area.height.min(1),
        ..area
    };
    let color = if is_error {
        DEFAULT_THEME.error
    } else {
        DEFAULT_THEME.fg
    };
    let paragraph = Paragraph::new(Line::from(text.to_string()))
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, row);
}
