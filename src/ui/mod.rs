//! Terminal user interface built on [ratatui](https://github.com/ratatui-org/ratatui).
//!
//! The UI is organized into four layers:
//!
//! - **[`app`]**: event loop, key handling, animation driving, frame layout
//! - **[`panes`]**: stateless render functions for the map, info pane and menu
//! - **[`surface`]**: the display surface trait and its ratatui/crossterm implementation
//! - **[`theme`]**: centralized color palette used by all panes
//!
//! The entry points are [`run_heap_view`] and [`run_heat_view`]: both take
//! a loaded [`HeapModel`](crate::profile::HeapModel) and a [`Surface`] and
//! return once the operator quits.

pub mod app;
pub mod panes;
pub mod surface;
pub mod theme;

pub use app::{run_heap_view, run_heat_view, App, ViewError};
pub use surface::{CrosstermInput, InputSource, Surface, TerminalSurface};
