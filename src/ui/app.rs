//! Heap map application state and event loop

use super::panes::{self, HeapMapWidget, Menu};
use super::surface::Surface;
use crate::color::ColorCache;
use crate::config::ViewConfig;
use crate::input::Key;
use crate::profile::HeapModel;
use crate::session::{
    Animation, AnimationAction, AnimationState, CursorMove, Direction, Session, View, ViewMode,
    HEADER_ROWS, INFO_ROWS, MENU_ROWS,
};
use rand::rngs::StdRng;
use rand::Rng;
use ratatui::{
    layout::{Constraint, Direction as LayoutDirection, Layout},
    Frame,
};
use std::io;
use thiserror::Error;
use tracing::{debug, info};

/// Reasons a heap map run ends abnormally
#[derive(Debug, Error)]
pub enum ViewError {
    #[error(
        "screen too small: {rows}x{cols}, need at least {min_rows} rows and {min_cols} columns besides the address column"
    )]
    ViewportTooSmall {
        rows: u16,
        cols: u16,
        min_rows: u16,
        min_cols: u16,
    },

    #[error("the profile has no heat table")]
    NoHeatTable,

    #[error("display surface failed: {0}")]
    Surface(#[from] io::Error),
}

/// Show the allocations of every snapshot, starting with the first one
pub fn run_heap_view<S: Surface>(
    model: HeapModel,
    surface: &mut S,
    config: &ViewConfig,
) -> Result<(), ViewError> {
    let allow_heat = model.heat().is_some();
    let session = Session::new(model, ViewMode::Heap, color_cache(config), config);
    App::new(session, config.clone(), allow_heat).run(surface)
}

/// Show the per-byte access counts of the profile
pub fn run_heat_view<S: Surface>(
    model: HeapModel,
    surface: &mut S,
    config: &ViewConfig,
) -> Result<(), ViewError> {
    if model.heat().is_none() {
        return Err(ViewError::NoHeatTable);
    }
    let session = Session::new(model, ViewMode::Heat, color_cache(config), config);
    App::new(session, config.clone(), false).run(surface)
}

fn color_cache(config: &ViewConfig) -> ColorCache<StdRng> {
    match config.color_seed {
        Some(seed) => ColorCache::seeded(seed),
        None => ColorCache::from_entropy(),
    }
}

/// The main application state
pub struct App<R: Rng = StdRng> {
    /// Navigation, grid, cursor and colors
    pub session: Session<R>,

    pub animation: Animation,

    pub config: ViewConfig,

    /// Whether `h` may switch between heap and heat data
    pub heat_toggle: bool,

    /// Whether the intro banner is on screen
    pub showing_intro: bool,

    /// Whether the app should quit
    pub should_quit: bool,
}

impl<R: Rng> App<R> {
    pub fn new(session: Session<R>, config: ViewConfig, heat_toggle: bool) -> Self {
        App {
            session,
            animation: Animation::new(),
            config,
            heat_toggle,
            showing_intro: false,
            should_quit: false,
        }
    }

    /// Run until the operator quits
    pub fn run<S: Surface>(&mut self, surface: &mut S) -> Result<(), ViewError> {
        self.show_intro(surface)?;

        let viewport = surface.viewport()?;
        self.session.advance(Direction::Next, viewport);
        self.paint(surface)?;

        while !self.should_quit {
            let Some(key) = surface.read_key(true)? else {
                continue;
            };
            self.handle_key(key, surface)?;
        }

        if !self.session.has_shown_map() && matches!(self.session.view(), View::ResizeRequest) {
            let viewport = surface.viewport()?;
            return Err(ViewError::ViewportTooSmall {
                rows: viewport.rows,
                cols: viewport.cols,
                min_rows: self.config.min_rows,
                min_cols: self.config.min_cols,
            });
        }

        info!("Heap map closed");
        Ok(())
    }

    fn show_intro<S: Surface>(&mut self, surface: &mut S) -> Result<(), ViewError> {
        self.showing_intro = true;
        self.paint(surface)?;
        surface.sleep(self.config.intro_delay);
        self.showing_intro = false;
        Ok(())
    }

    /// Handle one key in the idle state
    fn handle_key<S: Surface>(&mut self, key: Key, surface: &mut S) -> Result<(), ViewError> {
        let is_heap = self.session.mode() == ViewMode::Heap;

        match key {
            k if k.is('q') => {
                self.should_quit = true;
            }
            Key::Left if is_heap => self.navigate(Direction::Prev, surface)?,
            Key::Right if is_heap => self.navigate(Direction::Next, surface)?,
            Key::Resize => self.navigate(Direction::Stay, surface)?,
            k if k.is('a') && is_heap => self.animate(surface)?,
            k if k.is('h') && self.heat_toggle => {
                let next = if is_heap { ViewMode::Heat } else { ViewMode::Heap };
                let viewport = surface.viewport()?;
                if self.session.set_mode(next, viewport) {
                    self.paint(surface)?;
                }
            }
            k => {
                if let Some(step) = CursorMove::from_key(k) {
                    if self.session.move_cursor(step) {
                        self.paint(surface)?;
                    }
                }
            }
        }
        Ok(())
    }

    /// Move through snapshots; rejected moves leave the screen alone
    fn navigate<S: Surface>(&mut self, direction: Direction, surface: &mut S) -> Result<(), ViewError> {
        let viewport = surface.viewport()?;
        if self.session.advance(direction, viewport) {
            self.paint(surface)?;
        }
        Ok(())
    }

    /// Replay snapshots until stopped
    fn animate<S: Surface>(&mut self, surface: &mut S) -> Result<(), ViewError> {
        self.animation.start();
        info!(snapshot = ?self.session.navigator().current(), "Animation started");
        self.paint(surface)?;

        loop {
            match self.animation.state() {
                AnimationState::Stopped => break,
                AnimationState::Running => {
                    surface.sleep(self.config.animation_delay);
                    let key = surface.read_key(false)?;
                    for action in self.animation.frame(key) {
                        self.apply(action, surface)?;
                    }
                    self.paint(surface)?;
                }
                AnimationState::Paused => {
                    let Some(key) = surface.read_key(true)? else {
                        continue;
                    };
                    if let Some(action) = self.animation.paused_key(key) {
                        self.apply(action, surface)?;
                    }
                    self.paint(surface)?;
                }
            }
        }

        surface.flush_keys()?;
        info!(snapshot = ?self.session.navigator().current(), "Animation stopped");
        Ok(())
    }

    fn apply<S: Surface>(&mut self, action: AnimationAction, surface: &mut S) -> Result<(), ViewError> {
        let viewport = surface.viewport()?;
        match action {
            AnimationAction::Advance => {
                if !self.session.advance(Direction::Next, viewport) {
                    debug!("Animation at last snapshot, repeating frame");
                }
            }
            AnimationAction::Restart => {
                self.session.restart(viewport);
            }
            AnimationAction::Redraw => {
                self.session.advance(Direction::Stay, viewport);
            }
            AnimationAction::Quit => {
                self.should_quit = true;
            }
        }
        Ok(())
    }

    fn menu(&self) -> Menu {
        match (self.animation.state(), self.session.mode()) {
            (AnimationState::Running, _) => Menu::Animation,
            (AnimationState::Paused, _) => Menu::Paused,
            (AnimationState::Stopped, ViewMode::Heap) => Menu::Main {
                heat_toggle: self.heat_toggle,
            },
            (AnimationState::Stopped, ViewMode::Heat) => Menu::Heat {
                heat_toggle: self.heat_toggle,
            },
        }
    }

    fn paint<S: Surface>(&self, surface: &mut S) -> Result<(), ViewError> {
        surface.draw(&mut |frame| self.render(frame))?;
        Ok(())
    }

    /// Render the UI
    fn render(&self, frame: &mut Frame) {
        let size = frame.area();

        if self.showing_intro {
            panes::render_notice(frame, size, panes::status::INTRO_TEXT, false);
            return;
        }

        let map = match self.session.view() {
            View::Blank => return,
            View::ResizeRequest => {
                panes::render_notice(frame, size, panes::status::RESIZE_REQ_TEXT, false);
                return;
            }
            View::Failed(err) => {
                panes::render_notice(frame, size, &err.to_string(), true);
                return;
            }
            View::Map(map) => map,
        };

        let layout = map.layout();
        let chunks = Layout::default()
            .direction(LayoutDirection::Vertical)
            .constraints([
                Constraint::Length(HEADER_ROWS),
                Constraint::Length(layout.grid_rows as u16 + 2),
                Constraint::Length(INFO_ROWS),
                Constraint::Min(0),
                Constraint::Length(MENU_ROWS),
            ])
            .split(size);

        let model = self.session.model();
        let header = match (self.session.mode(), self.session.current_snapshot()) {
            (ViewMode::Heap, Some(snapshot)) => panes::snapshot_header(
                snapshot.index,
                self.session.navigator().total(),
                snapshot.timestamp,
            ),
            (ViewMode::Heap, None) => String::new(),
            (ViewMode::Heat, _) => String::from("HEAT MAP"),
        };
        panes::render_header(frame, chunks[0], &header, layout.address_width);

        frame.render_widget(
            HeapMapWidget {
                map,
                min_address: model.min_address,
                unit: &model.unit,
                tick_every: self.config.tick_every,
            },
            chunks[1],
        );

        let inspection = self.session.inspect();
        panes::render_info_pane(frame, chunks[2], inspection.as_ref(), &model.unit);

        panes::render_menu(frame, chunks[4], self.menu());

        frame.set_cursor_position(HeapMapWidget::cursor_position(map, chunks[1]));
    }
}
