//! Interactive state of one heap map run
//!
//! A [`Session`] owns everything that changes while the operator looks at a
//! profile: the current snapshot ([`navigation`]), the active grid and its
//! cursor ([`cursor`]), and the color cache. The [`animation`] sub-machine
//! sits beside it and feeds it navigation requests.
//!
//! Nothing in here touches the terminal. The UI asks the session to move,
//! then paints whatever [`Session::view`] returns.

pub mod animation;
pub mod cursor;
pub mod navigation;

pub use animation::{Animation, AnimationAction, AnimationState};
pub use cursor::{inspect, Cursor, CursorMove, Inspection};
pub use navigation::{Direction, Navigator};

use crate::color::{ColorCache, ColorToken};
use crate::config::ViewConfig;
use crate::grid::{decompose_heap, decompose_heat, DecomposeError, Grid};
use crate::profile::{HeapModel, Snapshot};
use rand::rngs::StdRng;
use rand::Rng;
use tracing::{debug, info, warn};

/// Rows taken by the snapshot header line
pub const HEADER_ROWS: u16 = 1;
/// Rows reserved for the field inspection pane
pub const INFO_ROWS: u16 = 4;
/// Rows taken by the key menu
pub const MENU_ROWS: u16 = 1;

const ADDRESS_LABEL: &str = "ADDRESS:";

/// Which data the grid shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    /// Allocations of the current snapshot
    Heap,
    /// Per-byte access counts
    Heat,
}

/// Size of the drawable surface in cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub rows: u16,
    pub cols: u16,
}

impl Viewport {
    pub fn new(rows: u16, cols: u16) -> Self {
        Viewport { rows, cols }
    }
}

/// Placement of the map inside a viewport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapLayout {
    /// Width of the address label column
    pub address_width: u16,
    pub grid_rows: usize,
    pub grid_cols: usize,
}

impl MapLayout {
    /// Label column width: wide enough for "ADDRESS:" and the largest address
    pub fn address_width(max_address: u64) -> u16 {
        let digits = max_address.to_string().len();
        digits.max(ADDRESS_LABEL.len()) as u16
    }

    /// Fit the map into `viewport`, or `None` when it is below the minimum size
    pub fn fit(viewport: Viewport, max_address: u64, min_rows: u16, min_cols: u16) -> Option<Self> {
        let address_width = Self::address_width(max_address);
        if viewport.rows < min_rows || viewport.cols.saturating_sub(address_width) < min_cols {
            return None;
        }

        let map_height = viewport
            .rows
            .saturating_sub(HEADER_ROWS + INFO_ROWS + MENU_ROWS);
        // one border column/row on each side of the grid
        Some(MapLayout {
            address_width,
            grid_rows: map_height.saturating_sub(2) as usize,
            grid_cols: viewport.cols.saturating_sub(address_width + 2) as usize,
        })
    }
}

/// A decomposed snapshot ready to paint
#[derive(Debug, Clone)]
pub struct MapView {
    grid: Grid,
    tokens: Vec<ColorToken>,
    cursor: Cursor,
    layout: MapLayout,
}

impl MapView {
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn layout(&self) -> MapLayout {
        self.layout
    }

    /// Color token of the field at `(row, col)`
    pub fn token_at(&self, row: usize, col: usize) -> Option<ColorToken> {
        if row >= self.grid.rows() || col >= self.grid.cols() {
            return None;
        }
        self.tokens.get(row * self.grid.cols() + col).copied()
    }
}

/// What the surface should currently show
#[derive(Debug, Clone)]
pub enum View {
    /// No snapshot entered yet
    Blank,
    Map(MapView),
    /// The viewport is below the minimum size
    ResizeRequest,
    /// The profile cannot be decomposed in this mode
    Failed(DecomposeError),
}

/// Navigation, grid, cursor and colors for one visualization run
#[derive(Debug)]
pub struct Session<R: Rng = StdRng> {
    model: HeapModel,
    mode: ViewMode,
    colors: ColorCache<R>,
    nav: Navigator,
    view: View,
    min_rows: u16,
    min_cols: u16,
    shown_map: bool,
}

impl<R: Rng> Session<R> {
    pub fn new(model: HeapModel, mode: ViewMode, colors: ColorCache<R>, config: &ViewConfig) -> Self {
        let nav = Navigator::new(model.len());
        Session {
            model,
            mode,
            colors,
            nav,
            view: View::Blank,
            min_rows: config.min_rows,
            min_cols: config.min_cols,
            shown_map: false,
        }
    }

    pub fn model(&self) -> &HeapModel {
        &self.model
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn navigator(&self) -> &Navigator {
        &self.nav
    }

    pub fn colors(&self) -> &ColorCache<R> {
        &self.colors
    }

    /// The active map, if the last rebuild succeeded
    pub fn map(&self) -> Option<&MapView> {
        match &self.view {
            View::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn current_snapshot(&self) -> Option<&Snapshot> {
        self.nav.current().and_then(|i| self.model.snapshot(i))
    }

    /// Whether a map has ever been drawn in this session
    pub fn has_shown_map(&self) -> bool {
        self.shown_map
    }

    /// Step to the previous/next snapshot, or rebuild the current one with
    /// [`Direction::Stay`]. Rejected moves return `false` and change nothing.
    pub fn advance(&mut self, direction: Direction, viewport: Viewport) -> bool {
        if !self.nav.advance(direction) {
            debug!(?direction, current = ?self.nav.current(), "Navigation rejected");
            return false;
        }
        self.rebuild(viewport);
        true
    }

    /// Go straight back to the first snapshot
    pub fn restart(&mut self, viewport: Viewport) -> bool {
        if !self.nav.jump_to(1) {
            return false;
        }
        self.rebuild(viewport);
        true
    }

    /// Switch between heap and heat data. Switching to heat needs a heat table.
    pub fn set_mode(&mut self, mode: ViewMode, viewport: Viewport) -> bool {
        if mode == ViewMode::Heat && self.model.heat().is_none() {
            return false;
        }
        self.mode = mode;
        info!(?mode, "View mode changed");
        if self.nav.current().is_some() {
            self.rebuild(viewport);
        }
        true
    }

    /// Move the cursor; ignored when no map is shown
    pub fn move_cursor(&mut self, step: CursorMove) -> bool {
        let View::Map(map) = &mut self.view else {
            return false;
        };
        map.cursor = map.cursor.moved(step, map.grid.rows(), map.grid.cols());
        true
    }

    /// Describe the field under the cursor; `None` when no map is shown
    pub fn inspect(&self) -> Option<Inspection<'_>> {
        let map = self.map()?;
        let snapshot = self.current_snapshot()?;
        inspect(&map.grid, map.cursor, snapshot)
    }

    /// Replace the view with a fresh decomposition of the current snapshot
    fn rebuild(&mut self, viewport: Viewport) {
        let Some(index) = self.nav.current() else {
            return;
        };
        let Some(layout) =
            MapLayout::fit(viewport, self.model.max_address, self.min_rows, self.min_cols)
        else {
            warn!(rows = viewport.rows, cols = viewport.cols, "Viewport too small for heap map");
            self.view = View::ResizeRequest;
            return;
        };

        let range = self.model.min_address..self.model.max_address;
        let result = match self.mode {
            ViewMode::Heap => match self.model.snapshot(index) {
                Some(snapshot) => {
                    decompose_heap(snapshot, range, layout.grid_rows, layout.grid_cols)
                }
                None => return,
            },
            ViewMode::Heat => match self.model.heat() {
                Some(heat) => decompose_heat(heat, range, layout.grid_rows, layout.grid_cols),
                None => Err(DecomposeError::MissingHeatTable),
            },
        };

        self.view = match result {
            Ok(grid) => {
                let tokens = grid
                    .fields()
                    .iter()
                    .map(|field| self.colors.color_for_field(field))
                    .collect();
                debug!(
                    snapshot = index,
                    rows = grid.rows(),
                    cols = grid.cols(),
                    field_size = grid.field_size(),
                    "Rebuilt heap map"
                );
                self.shown_map = true;
                View::Map(MapView {
                    grid,
                    tokens,
                    cursor: Cursor::origin(),
                    layout,
                })
            }
            Err(DecomposeError::EmptyGrid { .. }) => View::ResizeRequest,
            Err(err) => {
                warn!(%err, "Cannot decompose snapshot");
                View::Failed(err)
            }
        };
    }
}
