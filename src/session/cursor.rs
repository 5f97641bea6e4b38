//! Grid cursor and field inspection

use crate::grid::{Field, Grid};
use crate::input::Key;
use crate::profile::{AllocationSite, Snapshot};

/// One cursor step, bound to the numeric keypad keys 4/8/6/5
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorMove {
    Left,
    Up,
    Right,
    Down,
}

impl CursorMove {
    pub fn from_key(key: Key) -> Option<Self> {
        match key {
            Key::Char('4') => Some(CursorMove::Left),
            Key::Char('8') => Some(CursorMove::Up),
            Key::Char('6') => Some(CursorMove::Right),
            Key::Char('5') => Some(CursorMove::Down),
            _ => None,
        }
    }
}

/// Position inside the active grid
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor {
    pub row: usize,
    pub col: usize,
}

impl Cursor {
    pub fn origin() -> Self {
        Cursor::default()
    }

    /// Step once, wrapping around the edges of a `rows x cols` grid
    pub fn moved(self, step: CursorMove, rows: usize, cols: usize) -> Self {
        if rows == 0 || cols == 0 {
            return self;
        }
        let Cursor { row, col } = self;
        match step {
            CursorMove::Left => Cursor {
                row,
                col: if col == 0 { cols - 1 } else { col - 1 },
            },
            CursorMove::Right => Cursor {
                row,
                col: if col + 1 >= cols { 0 } else { col + 1 },
            },
            CursorMove::Up => Cursor {
                row: if row == 0 { rows - 1 } else { row - 1 },
                col,
            },
            CursorMove::Down => Cursor {
                row: if row + 1 >= rows { 0 } else { row + 1 },
                col,
            },
        }
    }
}

/// What the info pane shows for the field under the cursor
#[derive(Debug, Clone, PartialEq)]
pub enum Inspection<'a> {
    /// An allocated field
    Allocation {
        address: u64,
        amount: u64,
        site: &'a AllocationSite,
    },
    /// A free field in the heap view, with snapshot-wide totals
    Global {
        total_allocated: u64,
        allocation_count: usize,
        largest_amount: u64,
        smallest_amount: u64,
        field_size: f64,
        address: f64,
    },
    /// A field in the heat view
    Heat { address: f64, access: u32 },
}

/// Resolve the field under `cursor`; out-of-range lookups yield `None`
pub fn inspect<'a>(grid: &'a Grid, cursor: Cursor, snapshot: &Snapshot) -> Option<Inspection<'a>> {
    let field = grid.get(cursor.row, cursor.col)?;
    let info = match field {
        Field::Heap {
            address,
            amount,
            uid: Some(site),
        } => Inspection::Allocation {
            address: *address as u64,
            amount: *amount,
            site: site.as_ref(),
        },
        Field::Heap {
            address, uid: None, ..
        } => Inspection::Global {
            total_allocated: snapshot.total_allocated(),
            allocation_count: snapshot.allocation_count(),
            largest_amount: snapshot.largest_amount(),
            smallest_amount: snapshot.smallest_amount(),
            field_size: grid.field_size(),
            address: *address,
        },
        Field::Heat { address, access } => Inspection::Heat {
            address: *address,
            access: *access,
        },
    };
    Some(info)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_horizontal_wrap_stays_on_row() {
        let c = Cursor { row: 2, col: 0 };
        assert_eq!(c.moved(CursorMove::Left, 4, 5), Cursor { row: 2, col: 4 });

        let c = Cursor { row: 2, col: 4 };
        assert_eq!(c.moved(CursorMove::Right, 4, 5), Cursor { row: 2, col: 0 });
    }

    #[test]
    fn test_vertical_wrap_stays_on_column() {
        let c = Cursor { row: 0, col: 3 };
        assert_eq!(c.moved(CursorMove::Up, 4, 5), Cursor { row: 3, col: 3 });

        let c = Cursor { row: 3, col: 3 };
        assert_eq!(c.moved(CursorMove::Down, 4, 5), Cursor { row: 0, col: 3 });
    }

    #[test]
    fn test_plain_moves() {
        let c = Cursor { row: 1, col: 1 };
        assert_eq!(c.moved(CursorMove::Right, 3, 3), Cursor { row: 1, col: 2 });
        assert_eq!(c.moved(CursorMove::Down, 3, 3), Cursor { row: 2, col: 1 });
    }

    #[test]
    fn test_keypad_bindings() {
        assert_eq!(CursorMove::from_key(Key::Char('4')), Some(CursorMove::Left));
        assert_eq!(CursorMove::from_key(Key::Char('8')), Some(CursorMove::Up));
        assert_eq!(CursorMove::from_key(Key::Char('6')), Some(CursorMove::Right));
        assert_eq!(CursorMove::from_key(Key::Char('5')), Some(CursorMove::Down));
        assert_eq!(CursorMove::from_key(Key::Left), None);
    }
}
