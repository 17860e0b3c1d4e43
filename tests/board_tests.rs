//! Board tests - movement, collision, locking, line clears and game over

use std::cell::RefCell;
use std::rc::Rc;

use tui_blocks::core::{Board, EventLog, Shape, ShapeKind};
use tui_blocks::types::{BoardEvent, CellState, Direction, BOARD_HEIGHT, BOARD_WIDTH, SPAWN_ROW};

fn board_with_log() -> (Board, Rc<RefCell<EventLog>>) {
    let mut board = Board::new(BOARD_WIDTH, BOARD_HEIGHT, 12345);
    let log = EventLog::shared();
    board.subscribe(log.clone());
    (board, log)
}

fn row(board: &Board, y: i16) -> Vec<CellState> {
    (0..board.width() as i16)
        .map(|x| board.get(x, y).unwrap())
        .collect()
}

fn fill_row_except(board: &mut Board, y: i16, gap: i16) {
    for x in 0..board.width() as i16 {
        if x != gap {
            board.set(x, y, CellState::Full);
        }
    }
}

/// Horizontal I: one rotation turns the vertical bar onto local row 1.
fn horizontal_i() -> Shape {
    let mut shape = Shape::new(ShapeKind::I);
    shape.rotate();
    shape
}

#[test]
fn new_board_is_empty_with_spawned_shape() {
    let board = Board::default();
    assert_eq!(board.width(), BOARD_WIDTH);
    assert_eq!(board.height(), BOARD_HEIGHT);
    assert_eq!(board.filled_cells().count(), 0);

    let active = board.active_shape();
    assert_eq!(active.y(), SPAWN_ROW);
    assert_eq!(active.x() + active.left_edge(), (BOARD_WIDTH / 2) as i16);
}

#[test]
fn get_and_set_respect_bounds() {
    let mut board = Board::default();
    assert!(board.set(5, 10, CellState::Full));
    assert_eq!(board.get(5, 10), Some(CellState::Full));
    assert!(board.is_full(5, 10));

    assert!(!board.set(-1, 0, CellState::Full));
    assert!(!board.set(0, BOARD_HEIGHT as i16, CellState::Full));
    assert_eq!(board.get(BOARD_WIDTH as i16, 0), None);
    assert!(!board.is_full(-1, -1));
}

#[test]
fn same_seed_same_shapes() {
    let mut a = Board::new(14, 20, 99);
    let mut b = Board::new(14, 20, 99);
    for _ in 0..20 {
        assert_eq!(a.active_shape(), b.active_shape());
        assert_eq!(a.pending_shape(), b.pending_shape());
        a.add_shape();
        b.add_shape();
    }
}

#[test]
fn add_shape_promotes_pending() {
    let mut board = Board::default();
    let pending = board.pending_shape().clone();
    assert!(board.add_shape());

    let active = board.active_shape();
    assert_eq!(active.matrix(), pending.matrix());
    assert_eq!(active.kind(), pending.kind());
    assert_eq!(active.position(), ((BOARD_WIDTH / 2) as i16 - pending.left_edge(), SPAWN_ROW));
}

#[test]
fn move_left_then_right_restores_position() {
    let mut board = Board::default();
    let start = board.active_shape().position();

    assert!(board.move_left());
    assert_eq!(board.active_shape().x(), start.0 - 1);
    assert!(board.move_right());
    assert_eq!(board.active_shape().position(), start);
}

#[test]
fn failed_move_is_a_noop() {
    let mut board = Board::default();
    // Vertical I occupying column 0.
    board.set_active_shape(Shape::new(ShapeKind::I).at(-1, 5));
    assert!(!board.move_left());
    assert_eq!(board.active_shape().position(), (-1, 5));

    // Bar on the last column with a full cell beside it.
    board.set_active_shape(Shape::new(ShapeKind::I).at(12, 5));
    assert!(!board.move_right());
    board.set(12, 7, CellState::Full);
    assert!(!board.move_left());
    assert_eq!(board.active_shape().position(), (12, 5));
}

#[test]
fn move_down_steps_one_row() {
    let (mut board, log) = board_with_log();
    let (x, y) = board.active_shape().position();
    assert!(board.move_down());
    assert_eq!(board.active_shape().position(), (x, y + 1));
    assert!(log.borrow().events().is_empty());
}

#[test]
fn move_down_locks_at_bottom_and_spawns() {
    let (mut board, _log) = board_with_log();
    let pending = board.pending_shape().clone();
    board.set_active_shape(Shape::new(ShapeKind::O).at(0, 17));

    assert!(!board.move_down());

    for (x, y) in [(1, 18), (2, 18), (1, 19), (2, 19)] {
        assert!(board.is_full(x, y), "({}, {}) should be locked", x, y);
    }
    assert_eq!(board.filled_cells().count(), 4);
    assert_eq!(board.active_shape().matrix(), pending.matrix());
    assert_eq!(board.active_shape().y(), SPAWN_ROW);
}

#[test]
fn move_down_locks_on_collision() {
    let mut board = Board::default();
    board.set(1, 10, CellState::Full);
    board.set_active_shape(Shape::new(ShapeKind::O).at(0, 7));

    assert!(!board.move_down());
    assert!(board.is_full(1, 8));
    assert!(board.is_full(2, 9));
}

#[test]
fn completing_a_row_clears_it_once() {
    let (mut board, log) = board_with_log();
    let gap = 4;
    fill_row_except(&mut board, 19, gap);
    board.set(0, 10, CellState::Full);
    board.set(3, 0, CellState::Full);
    board.set(5, 1, CellState::Full);

    // Vertical I dropping into the gap, bottom cell on row 19.
    board.set_active_shape(Shape::new(ShapeKind::I).at(gap - 1, 16));
    let cleared = board.shape_to_board();

    assert_eq!(cleared, 1);
    assert_eq!(log.borrow().events(), &[BoardEvent::LinesCleared(1)]);

    // Everything above row 19 moved down by one.
    assert!(board.is_full(0, 11));
    assert!(!board.is_full(0, 10));
    assert!(board.is_full(3, 1));
    assert!(board.is_full(5, 2));
    assert!(!board.is_full(5, 1));
    for y in 17..=19 {
        assert!(board.is_full(gap, y));
    }
    assert!(!board.is_full(gap, 16));
    assert!(!board.is_row_full(19));
    assert!(row(&board, 0).iter().all(|c| !c.is_full()));
}

#[test]
fn clearing_via_gravity_emits_event() {
    let (mut board, log) = board_with_log();
    let gap = 9;
    fill_row_except(&mut board, 19, gap);
    board.set_active_shape(Shape::new(ShapeKind::I).at(gap - 1, 16));

    assert!(!board.move_down());
    assert_eq!(log.borrow().events(), &[BoardEvent::LinesCleared(1)]);
    assert_eq!(log.borrow().lines_cleared(), 1);
}

#[test]
fn several_rows_clear_in_one_event() {
    let (mut board, log) = board_with_log();
    let gap = 6;
    for y in 16..=19 {
        fill_row_except(&mut board, y, gap);
    }
    board.set(0, 15, CellState::Full);
    board.set_active_shape(Shape::new(ShapeKind::I).at(gap - 1, 16));

    assert_eq!(board.shape_to_board(), 4);
    assert_eq!(log.borrow().events(), &[BoardEvent::LinesCleared(4)]);
    assert!(board.is_full(0, 19));
    assert_eq!(board.filled_cells().count(), 1);
}

#[test]
fn lock_without_full_row_emits_nothing() {
    let (mut board, log) = board_with_log();
    board.set_active_shape(Shape::new(ShapeKind::T).at(0, 17));
    assert_eq!(board.shape_to_board(), 0);
    assert!(log.borrow().events().is_empty());
}

#[test]
fn test_for_line_takes_lowest_full_row() {
    let mut board = Board::default();
    assert!(!board.test_for_line());

    fill_row_except(&mut board, 5, -1);
    fill_row_except(&mut board, 12, -1);
    board.set(2, 11, CellState::Full);

    assert!(board.test_for_line());
    // Row 12 went first; row 11's marker dropped to 12, full row 5 to 6.
    assert!(board.is_full(2, 12));
    assert!(board.is_row_full(6));
    assert!(board.test_for_line());
    assert!(!board.test_for_line());
}

#[test]
fn spawn_collision_is_game_over() {
    let (mut board, log) = board_with_log();
    let spawn_col = (BOARD_WIDTH / 2) as i16;
    fill_row_except(&mut board, 0, spawn_col);
    fill_row_except(&mut board, 1, spawn_col);
    board.set_pending_shape(Shape::new(ShapeKind::O));

    assert!(!board.add_shape());

    assert_eq!(log.borrow().events(), &[BoardEvent::GameOver]);
    assert_eq!(board.filled_cells().count(), 0);
    assert_eq!(board.active_shape().y(), SPAWN_ROW);
}

#[test]
fn gravity_into_full_stack_ends_the_game() {
    let (mut board, log) = board_with_log();
    for y in 0..BOARD_HEIGHT as i16 {
        fill_row_except(&mut board, y, 0);
    }
    board.set_pending_shape(Shape::new(ShapeKind::T));
    board.set_active_shape(Shape::new(ShapeKind::O).at(5, -2));

    assert!(!board.move_down());
    assert_eq!(log.borrow().game_overs(), 1);
    assert_eq!(board.filled_cells().count(), 0);
}

#[test]
fn collision_ignores_cells_above_top() {
    let mut board = Board::default();
    for y in 0..BOARD_HEIGHT as i16 {
        fill_row_except(&mut board, y, -1);
    }

    let above = Shape::new(ShapeKind::I).at(3, -4);
    assert!(!board.is_collision_shape(&above));

    let touching = Shape::new(ShapeKind::I).at(3, -3);
    assert!(board.is_collision_shape(&touching));
}

#[test]
fn bounds_and_bottom_checks() {
    let board = Board::default();
    let bar = Shape::new(ShapeKind::I);

    assert!(!board.out_of_bounds_shape(&bar.clone().at(-1, 0)));
    assert!(board.out_of_bounds_shape(&bar.clone().at(-2, 0)));
    assert!(!board.out_of_bounds_shape(&bar.clone().at(12, 0)));
    assert!(board.out_of_bounds_shape(&bar.clone().at(13, 0)));

    assert!(!board.check_bottom_shape(&bar.clone().at(0, 16)));
    assert!(board.check_bottom_shape(&bar.at(0, 17)));
}

#[test]
fn rotation_is_pushed_off_left_wall() {
    let mut board = Board::default();
    board.set_active_shape(Shape::new(ShapeKind::I).at(-1, 5));

    assert!(board.rotate_shape());
    assert_eq!(board.active_blocks().as_slice(), &[(0, 6), (1, 6), (2, 6), (3, 6)]);
}

#[test]
fn rotation_is_pushed_off_right_wall() {
    let mut board = Board::default();
    let last = BOARD_WIDTH as i16 - 1;
    board.set_active_shape(Shape::new(ShapeKind::I).at(last - 1, 5));

    assert!(board.rotate_shape());
    let xs: Vec<i16> = board.active_blocks().iter().map(|b| b.0).collect();
    assert_eq!(xs, vec![last - 3, last - 2, last - 1, last]);
    assert!(!board.out_of_bounds());
}

#[test]
fn rotation_past_bottom_is_rejected() {
    let mut board = Board::default();
    let bar = horizontal_i().at(3, BOARD_HEIGHT as i16 - 2);
    board.set_active_shape(bar.clone());

    assert!(!board.rotate_shape());
    assert_eq!(board.active_shape(), &bar);
}

#[test]
fn blocked_rotation_is_rejected() {
    let mut board = Board::default();
    let bar = Shape::new(ShapeKind::I).at(4, 5);
    board.set_active_shape(bar.clone());
    board.set(7, 6, CellState::Full);

    assert!(!board.rotate_shape());
    assert_eq!(board.active_shape(), &bar);

    board.set(7, 6, CellState::Empty);
    assert!(board.rotate_shape());
}

#[test]
fn move_piece_dispatches() {
    let mut board = Board::default();
    board.set_active_shape(Shape::new(ShapeKind::I).at(4, 5));

    assert!(board.move_piece(Direction::Left));
    assert_eq!(board.active_shape().x(), 3);
    assert!(board.move_piece(Direction::Right));
    assert_eq!(board.active_shape().x(), 4);
    assert!(board.move_piece(Direction::Down));
    assert_eq!(board.active_shape().y(), 6);
    assert!(board.move_piece(Direction::Up));
    assert_eq!(board.active_shape().matrix(), horizontal_i().matrix());
}

#[test]
fn reset_empties_grid_and_keeps_listeners() {
    let (mut board, log) = board_with_log();
    fill_row_except(&mut board, 19, 0);
    board.reset();

    assert_eq!(board.filled_cells().count(), 0);
    assert_eq!(board.listener_count(), 1);
    assert!(log.borrow().events().is_empty());
}

#[test]
fn custom_dimensions() {
    let mut board = Board::new(10, 8, 5);
    assert_eq!(board.cells().len(), 80);
    assert_eq!(board.active_shape().x() + board.active_shape().left_edge(), 5);

    let mut drops = 0;
    while board.move_down() {
        drops += 1;
    }
    assert!(drops <= 8);
    assert!(board.filled_cells().count() >= 4);
}
