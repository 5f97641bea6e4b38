//! TUI pane rendering modules
//!
//! Each pane is a stateless render function (or widget) that reads from the
//! session and paints one region of the screen.
//!
//! # Pane Modules
//!
//! - [`map`]: the heap map grid with address labels and the ruler
//! - [`info`]: details of the field under the cursor
//! - [`status`]: snapshot header, key menu and full-screen notices

pub mod info;
pub mod map;
pub mod status;

// Re-export render functions for convenience
pub use info::{inspection_lines, render_info_pane};
pub use map::HeapMapWidget;
pub use status::{render_header, render_menu, render_notice, snapshot_header, Menu};
