use crate::color::{ColorToken, HeatClass, GOOD_COLORS};
use ratatui::style::Color;

pub struct Theme {
    pub fg: Color,
    pub info_text: Color,
    pub menu: Color,
    pub border: Color,      // Black frame around the map
    pub field_fg: Color,    // Glyph color drawn on top of every field
    pub free_field: Color,  // Grey
    pub heat_cold: Color,   // Grey
    pub heat_warm: Color,   // Yellow
    pub heat_hot: Color,    // Red
    pub error: Color,
}

pub const DEFAULT_THEME: Theme = Theme {
    fg: Color::Rgb(205, 214, 244),
    info_text: Color::Rgb(205, 214, 244),
    menu: Color::Rgb(249, 226, 175),
    border: Color::Indexed(16),
    field_fg: Color::Indexed(16),
    free_field: Color::Indexed(7),
    heat_cold: Color::Indexed(7),
    heat_warm: Color::Indexed(220),
    heat_hot: Color::Indexed(196),
    error: Color::Rgb(243, 139, 168),
};

impl Theme {
    /// Background color for a field token
    pub fn field_bg(&self, token: ColorToken) -> Color {
        match token {
            ColorToken::Free => self.free_field,
            ColorToken::Site(slot) => GOOD_COLORS
                .get(slot)
                .map_or(self.free_field, |&index| Color::Indexed(index)),
            ColorToken::Heat(HeatClass::Cold) => self.heat_cold,
            ColorToken::Heat(HeatClass::Warm) => self.heat_warm,
            ColorToken::Heat(HeatClass::Hot) => self.heat_hot,
        }
    }
}
