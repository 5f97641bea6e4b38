//! # Introduction
//!
//! heaptty draws a memory allocation profile as an interactive heap map in
//! the terminal. The address range of the profile is tiled onto a grid of
//! fields, each colored by the allocation site that owns it, and the
//! operator steps through snapshots, inspects fields or replays the whole
//! profile as an animation.
//!
//! ## Pipeline
//!
//! ```text
//! JSON profile → HeapModel → decompose → Grid → Session → TUI
//! ```
//!
//! 1. [`profile`]: the heap model and the JSON profile loader.
//! 2. [`grid`]: binning of allocations (or access counts) onto fields.
//! 3. [`color`]: session-scoped site colors and the heat classifier.
//! 4. [`session`]: navigation, animation and cursor state.
//! 5. [`ui`]: ratatui-based TUI; [`ui::run_heap_view`] and
//!    [`ui::run_heat_view`] are the entry points.
//!
//! ## Keys
//!
//! `q` quit, `←`/`→` previous/next snapshot, `4`/`8`/`6`/`5` cursor
//! left/up/right/down, `a` animate (then `s` stop, `p` pause, `c` continue,
//! `r` restart), `h` toggle the heat view.

pub mod color;
pub mod config;
pub mod grid;
pub mod input;
pub mod profile;
pub mod session;
pub mod ui;
