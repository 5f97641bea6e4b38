//! Configuration for the heap map views

use std::time::Duration;

/// Smallest usable viewport height
pub const MIN_ROWS: u16 = 30;

/// Smallest usable map width, not counting the address column
pub const MIN_COLS: u16 = 70;

/// Delay between animation frames
pub const ANIMATION_DELAY: Duration = Duration::from_millis(1000);

/// How long the intro banner stays up
pub const INTRO_DELAY: Duration = Duration::from_millis(700);

/// A ruler tick is drawn every this many cells
pub const TICK_EVERY: usize = 10;

/// Runtime settings for [`run_heap_view`](crate::ui::app::run_heap_view)
/// and [`run_heat_view`](crate::ui::app::run_heat_view)
#[derive(Debug, Clone, PartialEq)]
pub struct ViewConfig {
    pub animation_delay: Duration,
    pub intro_delay: Duration,
    pub min_rows: u16,
    pub min_cols: u16,
    pub tick_every: usize,
    /// Fixed seed for site colors; `None` picks fresh colors every run
    pub color_seed: Option<u64>,
}

impl Default for ViewConfig {
    fn default() -> Self {
        ViewConfig {
            animation_delay: ANIMATION_DELAY,
            intro_delay: INTRO_DELAY,
            min_rows: MIN_ROWS,
            min_cols: MIN_COLS,
            tick_every: TICK_EVERY,
            color_seed: None,
        }
    }
}
