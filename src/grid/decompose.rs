//! Binning of allocation records and access counts onto grid cells

use super::{field_size_for, DecomposeError, Field, Grid};
use crate::profile::{HeatTable, Snapshot};
use std::ops::Range;

/// Tile a snapshot's allocations onto a `rows x cols` grid.
///
/// Cells are filled greedily left to right in address order. A record
/// occupies consecutive cells in proportion to its amount; gaps become free
/// fields. When two records start inside the same bin the first one wins and
/// the second spills into the following cell.
pub fn decompose_heap(
    snapshot: &Snapshot,
    range: Range<u64>,
    rows: usize,
    cols: usize,
) -> Result<Grid, DecomposeError> {
    let field_size = field_size_for(range.start, range.end, rows, cols)?;
    let cells = rows * cols;

    let mut records = snapshot.records().iter();
    let mut record = records.next();
    let mut remaining = record.map_or(0.0, |r| r.amount as f64);
    let mut last_field = range.start as f64;
    let mut fields = Vec::with_capacity(cells);

    for _ in 0..cells {
        match record {
            Some(r) if r.address as f64 <= last_field + field_size => {
                fields.push(Field::Heap {
                    address: r.address as f64,
                    amount: r.amount,
                    uid: r.uid.clone(),
                });

                if remaining <= field_size {
                    record = records.next();
                    remaining = record.map_or(0.0, |r| r.amount as f64);
                } else {
                    remaining -= field_size;
                }
            }
            // either nothing left, or the record starts in a later bin
            _ => fields.push(Field::free(last_field)),
        }
        last_field += field_size;
    }

    Ok(Grid::from_fields(rows, cols, field_size, fields))
}

/// Tile a heat table onto a `rows x cols` grid.
///
/// Each cell shows the hottest byte among the offsets it covers, so a single
/// heavily accessed byte stays visible at any zoom level.
pub fn decompose_heat(
    heat: &HeatTable,
    range: Range<u64>,
    rows: usize,
    cols: usize,
) -> Result<Grid, DecomposeError> {
    let field_size = field_size_for(range.start, range.end, rows, cols)?;
    let cells = rows * cols;
    let span = (field_size.floor() as u64).max(1);

    let mut cursor = 0.0_f64;
    let mut fields = Vec::with_capacity(cells);

    for _ in 0..cells {
        let start = range.start.saturating_add(cursor.floor() as u64);
        let access = heat.hottest_in(start..start.saturating_add(span));

        fields.push(Field::Heat {
            address: range.start as f64 + cursor,
            access,
        });
        cursor += field_size;
    }

    Ok(Grid::from_fields(rows, cols, field_size, fields))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{AllocationRecord, AllocationSite};
    use std::rc::Rc;

    fn site(name: &str) -> Option<Rc<AllocationSite>> {
        Some(Rc::new(AllocationSite::new(name, "test.c", 1)))
    }

    fn amount_at(grid: &Grid, row: usize, col: usize) -> u64 {
        match grid.get(row, col) {
            Some(Field::Heap { amount, .. }) => *amount,
            other => panic!("expected heap field, got {:?}", other),
        }
    }

    #[test]
    fn test_single_record_half_range() {
        let snap = Snapshot::new(1, 0.0, vec![AllocationRecord::new(1000, 500, site("x"))]);
        let grid = decompose_heap(&snap, 1000..2000, 1, 2).unwrap();

        assert_eq!(grid.field_size(), 500.0);
        assert_eq!(
            grid.fields(),
            &[
                Field::Heap {
                    address: 1000.0,
                    amount: 500,
                    uid: site("x"),
                },
                Field::free(1500.0),
            ]
        );
    }

    #[test]
    fn test_record_spans_proportional_cells() {
        // 100 units per cell, record of 250 covers three cells
        let snap = Snapshot::new(1, 0.0, vec![AllocationRecord::new(0, 250, site("big"))]);
        let grid = decompose_heap(&snap, 0..1000, 2, 5).unwrap();

        let occupied = grid.fields().iter().filter(|f| !f.is_free()).count();
        assert_eq!(occupied, 3);
        assert_eq!(amount_at(&grid, 0, 2), 250);
        assert_eq!(amount_at(&grid, 0, 3), 0);
    }

    #[test]
    fn test_gap_becomes_free_fields() {
        let snap = Snapshot::new(1, 0.0, vec![AllocationRecord::new(350, 10, site("late"))]);
        let grid = decompose_heap(&snap, 0..400, 1, 4).unwrap();

        // 350 lies past 200 + 100, so only the last bin (300..400) holds it
        assert!(grid.get(0, 0).unwrap().is_free());
        assert!(grid.get(0, 1).unwrap().is_free());
        assert!(grid.get(0, 2).unwrap().is_free());
        assert_eq!(amount_at(&grid, 0, 3), 10);
        assert_eq!(grid.get(0, 2).unwrap().address(), 200.0);
    }

    #[test]
    fn test_first_fit_wins_within_a_bin() {
        // Known approximation: both records start in bin 0, the second is
        // pushed into bin 1 instead of sharing bin 0.
        let snap = Snapshot::new(
            1,
            0.0,
            vec![
                AllocationRecord::new(0, 10, site("first")),
                AllocationRecord::new(20, 10, site("second")),
            ],
        );
        let grid = decompose_heap(&snap, 0..400, 1, 4).unwrap();

        assert_eq!(grid.get(0, 0).unwrap().site().unwrap().function, "first");
        assert_eq!(grid.get(0, 1).unwrap().site().unwrap().function, "second");
        assert!(grid.get(0, 2).unwrap().is_free());
    }

    #[test]
    fn test_empty_snapshot_is_all_free() {
        let snap = Snapshot::new(1, 0.0, vec![]);
        let grid = decompose_heap(&snap, 0..90, 3, 3).unwrap();

        assert!(grid.fields().iter().all(Field::is_free));
        assert_eq!(grid.get(2, 2).unwrap().address(), 80.0);
    }

    #[test]
    fn test_zero_cells_fail_fast() {
        let snap = Snapshot::new(1, 0.0, vec![]);
        assert_eq!(
            decompose_heap(&snap, 0..100, 0, 10),
            Err(DecomposeError::EmptyGrid { rows: 0, cols: 10 })
        );
    }

    #[test]
    fn test_degenerate_range_fails_fast() {
        let snap = Snapshot::new(1, 0.0, vec![]);
        assert_eq!(
            decompose_heap(&snap, 100..100, 2, 2),
            Err(DecomposeError::DegenerateRange { min: 100, max: 100 })
        );
    }

    #[test]
    fn test_heat_takes_max_per_cell() {
        let heat = HeatTable::new(0, vec![0, 0, 5, 5]);
        let grid = decompose_heat(&heat, 0..4, 1, 2).unwrap();

        assert_eq!(
            grid.fields(),
            &[
                Field::Heat {
                    address: 0.0,
                    access: 0
                },
                Field::Heat {
                    address: 2.0,
                    access: 5
                },
            ]
        );
    }

    #[test]
    fn test_heat_single_hot_byte_survives() {
        let heat = HeatTable::new(0, vec![0, 0, 0, 9, 0, 0, 0, 0]);
        let grid = decompose_heat(&heat, 0..8, 1, 2).unwrap();

        let access: Vec<u32> = grid
            .fields()
            .iter()
            .map(|f| match f {
                Field::Heat { access, .. } => *access,
                _ => unreachable!(),
            })
            .collect();
        assert_eq!(access, vec![9, 0]);
    }

    #[test]
    fn test_heat_more_cells_than_bytes() {
        let heat = HeatTable::new(0, vec![3, 1]);
        let grid = decompose_heat(&heat, 0..2, 1, 4).unwrap();

        assert_eq!(grid.fields().len(), 4);
        assert!(matches!(grid.get(0, 0), Some(Field::Heat { access: 3, .. })));
        assert!(matches!(grid.get(0, 2), Some(Field::Heat { access: 1, .. })));
    }

    #[test]
    fn test_heat_table_covers_part_of_the_range() {
        // 4 sampled bytes at the very start of a 1 MiB range
        let heat = HeatTable::new(1 << 20, vec![0, 2, 0, 0]);
        let grid = decompose_heat(&heat, (1 << 20)..(2 << 20), 2, 4).unwrap();

        assert!(matches!(grid.get(0, 0), Some(Field::Heat { access: 2, .. })));
        assert!(grid.fields()[1..]
            .iter()
            .all(|f| matches!(f, Field::Heat { access: 0, .. })));
    }
}
