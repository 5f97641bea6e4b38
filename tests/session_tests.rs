// Navigation, cursor and resize behavior of a heap map session

use heaptty::color::{ColorCache, ColorToken};
use heaptty::config::ViewConfig;
use heaptty::profile::{AllocationRecord, AllocationSite, HeapModel, HeatTable, Snapshot};
use heaptty::session::{CursorMove, Direction, Inspection, Session, View, ViewMode, Viewport};
use rand::rngs::StdRng;
use std::rc::Rc;

const BIG: Viewport = Viewport { rows: 30, cols: 80 };
const SMALL: Viewport = Viewport { rows: 12, cols: 40 };

fn site_x() -> Rc<AllocationSite> {
    Rc::new(AllocationSite::new("alloc_x", "x.c", 7))
}

fn site_y() -> Rc<AllocationSite> {
    Rc::new(AllocationSite::new("alloc_y", "y.c", 12))
}

/// Snapshot 1: X@1000 (500 B); snapshot 2: X@1000 plus Y@1500 (200 B)
fn two_snapshot_model() -> HeapModel {
    let x = site_x();
    let y = site_y();
    let s1 = Snapshot::new(1, 0.5, vec![AllocationRecord::new(1000, 500, Some(Rc::clone(&x)))]);
    let s2 = Snapshot::new(
        2,
        1.0,
        vec![
            AllocationRecord::new(1000, 500, Some(x)),
            AllocationRecord::new(1500, 200, Some(y)),
        ],
    );
    HeapModel::new(vec![s1, s2], 1000, 2000, "B")
}

fn session(model: HeapModel) -> Session<StdRng> {
    Session::new(model, ViewMode::Heap, ColorCache::seeded(7), &ViewConfig::default())
}

#[test]
fn test_new_session_is_blank() {
    let s = session(two_snapshot_model());
    assert!(matches!(s.view(), View::Blank));
    assert_eq!(s.navigator().current(), None);
    assert!(s.inspect().is_none());
}

#[test]
fn test_prev_from_blank_is_rejected() {
    let mut s = session(two_snapshot_model());
    assert!(!s.advance(Direction::Prev, BIG));
    assert!(matches!(s.view(), View::Blank));
}

#[test]
fn test_next_walks_to_the_end_and_stops() {
    let mut s = session(two_snapshot_model());

    assert!(s.advance(Direction::Next, BIG));
    assert_eq!(s.navigator().current(), Some(1));
    assert!(s.advance(Direction::Next, BIG));
    assert_eq!(s.navigator().current(), Some(2));

    assert!(!s.advance(Direction::Next, BIG));
    assert_eq!(s.navigator().current(), Some(2));
    assert!(s.navigator().is_at_end());
}

#[test]
fn test_prev_at_first_snapshot_is_rejected() {
    let mut s = session(two_snapshot_model());
    s.advance(Direction::Next, BIG);

    assert!(!s.advance(Direction::Prev, BIG));
    assert_eq!(s.navigator().current(), Some(1));
}

#[test]
fn test_map_fills_the_viewport() {
    let mut s = session(two_snapshot_model());
    s.advance(Direction::Next, BIG);

    let map = s.map().expect("map after first NEXT");
    // 30 rows minus header, info, menu and two border rows
    assert_eq!(map.grid().rows(), 22);
    // 80 columns minus the 8-wide address column and two border columns
    assert_eq!(map.grid().cols(), 70);
    assert_eq!(map.layout().address_width, 8);
}

#[test]
fn test_inspect_origin_shows_allocation() {
    let mut s = session(two_snapshot_model());
    s.advance(Direction::Next, BIG);

    match s.inspect() {
        Some(Inspection::Allocation {
            address,
            amount,
            site,
        }) => {
            assert_eq!(address, 1000);
            assert_eq!(amount, 500);
            assert_eq!(site.function, "alloc_x");
        }
        other => panic!("expected allocation, got {:?}", other),
    }
}

#[test]
fn test_inspect_free_field_shows_snapshot_totals() {
    let mut s = session(two_snapshot_model());
    s.advance(Direction::Next, BIG);
    s.advance(Direction::Next, BIG);
    // wrap to the bottom-right cell, past both allocations
    s.move_cursor(CursorMove::Up);
    s.move_cursor(CursorMove::Left);

    match s.inspect() {
        Some(Inspection::Global {
            total_allocated,
            allocation_count,
            largest_amount,
            smallest_amount,
            ..
        }) => {
            assert_eq!(total_allocated, 700);
            assert_eq!(allocation_count, 2);
            assert_eq!(largest_amount, 500);
            assert_eq!(smallest_amount, 200);
        }
        other => panic!("expected free field, got {:?}", other),
    }
}

#[test]
fn test_cursor_resets_on_navigation() {
    let mut s = session(two_snapshot_model());
    s.advance(Direction::Next, BIG);
    s.move_cursor(CursorMove::Down);
    s.move_cursor(CursorMove::Right);
    assert_eq!(s.map().unwrap().cursor().row, 1);

    s.advance(Direction::Next, BIG);
    let cursor = s.map().unwrap().cursor();
    assert_eq!((cursor.row, cursor.col), (0, 0));
}

#[test]
fn test_cursor_up_from_top_wraps_to_bottom() {
    let mut s = session(two_snapshot_model());
    s.advance(Direction::Next, BIG);

    assert!(s.move_cursor(CursorMove::Up));
    let cursor = s.map().unwrap().cursor();
    assert_eq!((cursor.row, cursor.col), (21, 0));
}

#[test]
fn test_small_viewport_requests_resize() {
    let mut s = session(two_snapshot_model());
    assert!(s.advance(Direction::Next, SMALL));

    assert!(matches!(s.view(), View::ResizeRequest));
    assert!(s.inspect().is_none());
    assert!(!s.move_cursor(CursorMove::Right));
    assert!(!s.has_shown_map());
}

#[test]
fn test_resize_back_restores_the_map() {
    let mut s = session(two_snapshot_model());
    s.advance(Direction::Next, BIG);
    assert!(s.has_shown_map());

    s.advance(Direction::Stay, SMALL);
    assert!(matches!(s.view(), View::ResizeRequest));

    s.advance(Direction::Stay, BIG);
    assert!(s.map().is_some());
    assert_eq!(s.navigator().current(), Some(1));
}

#[test]
fn test_site_colors_survive_navigation() {
    let mut s = session(two_snapshot_model());
    s.advance(Direction::Next, BIG);
    let first = s.map().unwrap().token_at(0, 0).unwrap();
    assert!(matches!(first, ColorToken::Site(_)));

    s.advance(Direction::Next, BIG);
    s.advance(Direction::Prev, BIG);
    assert_eq!(s.map().unwrap().token_at(0, 0), Some(first));
}

#[test]
fn test_free_fields_use_the_free_token() {
    let mut s = session(two_snapshot_model());
    s.advance(Direction::Next, BIG);

    let map = s.map().unwrap();
    let last_col = map.grid().cols() - 1;
    assert_eq!(map.token_at(21, last_col), Some(ColorToken::Free));
}

#[test]
fn test_restart_jumps_to_first_snapshot() {
    let mut s = session(two_snapshot_model());
    s.advance(Direction::Next, BIG);
    s.advance(Direction::Next, BIG);

    assert!(s.restart(BIG));
    assert_eq!(s.navigator().current(), Some(1));
}

#[test]
fn test_heat_mode_needs_a_table() {
    let mut s = session(two_snapshot_model());
    s.advance(Direction::Next, BIG);

    assert!(!s.set_mode(ViewMode::Heat, BIG));
    assert_eq!(s.mode(), ViewMode::Heap);
}

#[test]
fn test_heat_mode_inspects_access_counts() {
    let mut counts = vec![0u32; 1000];
    counts[0] = 3;
    let model = two_snapshot_model().with_heat(HeatTable::new(1000, counts));
    let mut s = session(model);
    s.advance(Direction::Next, BIG);

    assert!(s.set_mode(ViewMode::Heat, BIG));
    match s.inspect() {
        Some(Inspection::Heat { address, access }) => {
            assert_eq!(address, 1000.0);
            assert_eq!(access, 3);
        }
        other => panic!("expected heat field, got {:?}", other),
    }

    assert!(s.set_mode(ViewMode::Heap, BIG));
    assert!(matches!(s.inspect(), Some(Inspection::Allocation { .. })));
}
