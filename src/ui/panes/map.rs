//! Heap map pane: the field grid with its address column and ruler
//!
//! ```text
//! ADDRESS:  ┌──────────────────────┐
//! 1000       |_________|_________   <- one glyph per field, colored by site
//! 1640       |_________|_________
//!            0B        6400B        <- ruler, one label per tick
//! ```
//!
//! Ticks (`|`) mark every `tick_every` fields; the last grid row is drawn
//! with blanks so the ruler below it stays readable.

use crate::session::MapView;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    style::{Modifier, Style},
    widgets::Widget,
};

const ADDRESS_LABEL: &str = "ADDRESS:";
const FIELD_GLYPH: &str = "_";
const TICK_GLYPH: &str = "|";
const BLANK_GLYPH: &str = " ";

/// Widget drawing a decomposed snapshot
pub struct HeapMapWidget<'a> {
    pub map: &'a MapView,
    pub min_address: u64,
    pub unit: &'a str,
    pub tick_every: usize,
}

impl HeapMapWidget<'_> {
    /// Screen position of the cell under the grid cursor
    pub fn cursor_position(map: &MapView, area: Rect) -> Position {
        let layout = map.layout();
        let cursor = map.cursor();
        Position::new(
            area.x + layout.address_width + 1 + cursor.col as u16,
            area.y + 1 + cursor.row as u16,
        )
    }

    fn ruler(&self, width: usize) -> String {
        let grid = self.map.grid();
        let tick = self.tick_every.max(1);
        let tick_amount = (grid.field_size() * tick as f64) as u64;

        let mut ruler = String::new();
        for (i, col) in (0..width).step_by(tick).enumerate() {
            if tick >= width - col {
                break;
            }
            let label = format!("{}{}", tick_amount * i as u64, self.unit);
            ruler.push_str(&format!("{:<width$}", label, width = tick));
        }
        ruler
    }
}

impl Widget for HeapMapWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let grid = self.map.grid();
        let layout = self.map.layout();
        let tick = self.tick_every.max(1);

        let label_style = Style::default().fg(DEFAULT_THEME.info_text);
        let border_style = Style::default().bg(DEFAULT_THEME.border);

        let grid_x = area.x + layout.address_width + 1;
        let right_border_x = grid_x + grid.cols() as u16;
        let bottom_y = area.y + grid.rows() as u16 + 1;
        if right_border_x >= area.right() || bottom_y >= area.bottom() {
            return;
        }

        // frame
        for x in (area.x + layout.address_width)..=right_border_x {
            buf.set_string(x, area.y, BLANK_GLYPH, border_style);
            buf.set_string(x, bottom_y, BLANK_GLYPH, border_style);
        }
        buf.set_string(area.x, area.y, ADDRESS_LABEL, label_style);

        let line_span = grid.cols() as f64 * grid.field_size();
        let cursor = self.map.cursor();

        for row in 0..grid.rows() {
            let y = area.y + 1 + row as u16;
            let line_address = self.min_address + (row as f64 * line_span) as u64;
            buf.set_string(area.x, y, line_address.to_string(), label_style);
            buf.set_string(grid_x - 1, y, BLANK_GLYPH, border_style);
            buf.set_string(right_border_x, y, BLANK_GLYPH, border_style);

            for col in 0..grid.cols() {
                let Some(token) = self.map.token_at(row, col) else {
                    continue;
                };
                let glyph = if col % tick == 0 {
                    TICK_GLYPH
                } else if row + 1 == grid.rows() {
                    BLANK_GLYPH
                } else {
                    FIELD_GLYPH
                };

                let mut style = Style::default()
                    .fg(DEFAULT_THEME.field_fg)
                    .bg(DEFAULT_THEME.field_bg(token));
                if cursor.row == row && cursor.col == col {
                    style = style.add_modifier(Modifier::REVERSED);
                }
                buf.set_string(grid_x + col as u16, y, glyph, style);
            }
        }

        let ruler = self.ruler(grid.cols());
        buf.set_string(grid_x, bottom_y, ruler, label_style.bg(DEFAULT_THEME.border));
    }
}
