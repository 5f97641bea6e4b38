//! Field inspection pane

use crate::session::Inspection;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::Style,
    text::Line,
    widgets::Paragraph,
    Frame,
};

/// Text lines describing the inspected field
pub fn inspection_lines(inspection: &Inspection<'_>, unit: &str) -> Vec<String> {
    match inspection {
        Inspection::Allocation {
            address,
            amount,
            site,
        } => vec![
            format!("Starting address: {}", address),
            format!("Allocated space: {} {}", amount, unit),
            format!("Allocation: {}", site),
        ],
        Inspection::Global {
            total_allocated,
            allocation_count,
            largest_amount,
            smallest_amount,
            field_size,
            address,
        } => vec![
            format!("Free field at address: {:.0}", address),
            format!("Field size: {:.2} {}", field_size, unit),
            format!(
                "Snapshot: {} allocations, {} {} allocated (largest {} {}, smallest {} {})",
                allocation_count, total_allocated, unit, largest_amount, unit, smallest_amount, unit
            ),
        ],
        Inspection::Heat { address, access } => vec![
            format!("Address: {:.0}", address),
            format!("Access count: {}", access),
        ],
    }
}

/// Render the inspection pane; an empty pane when nothing is inspected
pub fn render_info_pane(frame: &mut Frame, area: Rect, inspection: Option<&Inspection<'_>>, unit: &str) {
    let lines: Vec<Line> = inspection
        .map(|info| inspection_lines(info, unit))
        .unwrap_or_default()
        .into_iter()
        .map(Line::from)
        .collect();

    let paragraph = Paragraph::new(lines).style(Style::default().fg(DEFAULT_THEME.info_text));
    frame.render_widget(paragraph, area);
}
