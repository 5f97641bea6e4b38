//! Display surface the heap map draws on
//!
//! [`Surface`] is everything the app loop needs from a terminal: its size,
//! a way to paint a full frame, key input and a sleep for the animation
//! timer. [`TerminalSurface`] provides it on top of a ratatui [`Terminal`]
//! plus an [`InputSource`]; production code pairs a crossterm backend with
//! [`CrosstermInput`], tests pair a `TestBackend` with scripted keys.

use crate::input::Key;
use crate::session::Viewport;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{backend::Backend, Frame, Terminal};
use std::io;
use std::thread;
use std::time::Duration;

pub trait Surface {
    /// Current size in cells
    fn viewport(&mut self) -> io::Result<Viewport>;

    /// Paint one full frame
    fn draw(&mut self, render: &mut dyn FnMut(&mut Frame)) -> io::Result<()>;

    /// Next key; `None` only when `blocking` is false and nothing is pending
    fn read_key(&mut self, blocking: bool) -> io::Result<Option<Key>>;

    /// Throw away keys typed ahead of time
    fn flush_keys(&mut self) -> io::Result<()>;

    fn sleep(&mut self, duration: Duration);
}

/// Where keys and timing come from
pub trait InputSource {
    fn read_key(&mut self, blocking: bool) -> io::Result<Option<Key>>;

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn sleep(&mut self, duration: Duration) {
        thread::sleep(duration);
    }
}

/// Keys from the real terminal via crossterm
#[derive(Debug, Default)]
pub struct CrosstermInput;

impl InputSource for CrosstermInput {
    fn read_key(&mut self, blocking: bool) -> io::Result<Option<Key>> {
        loop {
            if !blocking && !event::poll(Duration::ZERO)? {
                return Ok(None);
            }
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    return Ok(Some(map_key_code(key.code)));
                }
                Event::Resize(..) => return Ok(Some(Key::Resize)),
                // releases, mouse and focus events
                _ => {}
            }
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        while event::poll(Duration::ZERO)? {
            event::read()?;
        }
        Ok(())
    }
}

pub fn map_key_code(code: KeyCode) -> Key {
    match code {
        KeyCode::Char(c) => Key::Char(c),
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        _ => Key::Other,
    }
}

/// A ratatui terminal paired with an input source
pub struct TerminalSurface<B: Backend, I: InputSource> {
    terminal: Terminal<B>,
    input: I,
}

impl<B: Backend, I: InputSource> TerminalSurface<B, I> {
    pub fn new(terminal: Terminal<B>, input: I) -> Self {
        TerminalSurface { terminal, input }
    }

    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    pub fn terminal_mut(&mut self) -> &mut Terminal<B> {
        &mut self.terminal
    }

    pub fn input(&self) -> &I {
        &self.input
    }
}

impl<B: Backend, I: InputSource> Surface for TerminalSurface<B, I> {
    fn viewport(&mut self) -> io::Result<Viewport> {
        let size = self.terminal.size()?;
        Ok(Viewport::new(size.height, size.width))
    }

    fn draw(&mut self, render: &mut dyn FnMut(&mut Frame)) -> io::Result<()> {
        self.terminal.draw(|frame| render(frame))?;
        Ok(())
    }

    fn read_key(&mut self, blocking: bool) -> io::Result<Option<Key>> {
        self.input.read_key(blocking)
    }

    fn flush_keys(&mut self) -> io::Result<()> {
        self.input.flush()
    }

    fn sleep(&mut self, duration: Duration) {
        self.input.sleep(duration);
    }
}
