//! Snapshot navigation state machine

/// Direction of a snapshot move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Prev,
    /// Stay on the current snapshot; used to force a rebuild
    Stay,
    Next,
}

impl Direction {
    fn offset(self) -> isize {
        match self {
            Direction::Prev => -1,
            Direction::Stay => 0,
            Direction::Next => 1,
        }
    }
}

/// Tracks which snapshot (1-based) is shown.
///
/// Starts with nothing shown; the first `advance(Next)` enters snapshot 1.
/// Moves past either end are rejected and leave the state untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigator {
    current: usize,
    total: usize,
}

impl Navigator {
    pub fn new(total: usize) -> Self {
        Navigator { current: 0, total }
    }

    /// Currently shown snapshot, `None` before the first move
    pub fn current(&self) -> Option<usize> {
        (self.current > 0).then_some(self.current)
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn is_at_start(&self) -> bool {
        self.current == 1
    }

    pub fn is_at_end(&self) -> bool {
        self.current == self.total
    }

    /// Move one step; returns `false` when the target is outside `[1, total]`
    pub fn advance(&mut self, direction: Direction) -> bool {
        match self.current.checked_add_signed(direction.offset()) {
            Some(next) => self.jump_to(next),
            None => false,
        }
    }

    /// Show snapshot `index` directly
    pub fn jump_to(&mut self, index: usize) -> bool {
        if (1..=self.total).contains(&index) {
            self.current = index;
            true
        } else {
            false
        }
    }
}
