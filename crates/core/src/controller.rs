//! Game controller - ties the board to the session and the outside world
//!
//! The controller owns the board and a shared status (session plus caption) which
//! it registers as the board's listener at construction, so line clears and game over
//! from the board run the same handlers as [`on_lines_cleared`] and [`on_game_over`].
//! An external 60 Hz timer calls [`cycle`], the input layer calls [`handle_action`],
//! and the renderer calls [`draw_handler`].
//!
//! [`on_lines_cleared`]: GameController::on_lines_cleared
//! [`on_game_over`]: GameController::on_game_over
//! [`cycle`]: GameController::cycle
//! [`handle_action`]: GameController::handle_action
//! [`draw_handler`]: GameController::draw_handler

use std::cell::{Ref, RefCell};
use std::rc::Rc;

use crate::board::Board;
use crate::config::{ConfigError, GameConfig};
use crate::events::BoardListener;
use crate::render::RenderSurface;
use crate::rng::random_seed;
use crate::session::Session;
use crate::types::{Direction, GameAction};

/// Session counters and the caption last built from them
#[derive(Debug)]
struct Status {
    session: Session,
    caption: String,
}

impl Status {
    fn new(starting_level: u32) -> Self {
        let session = Session::new(starting_level);
        let caption = session.caption();
        Self { session, caption }
    }

    fn refresh_caption(&mut self) {
        self.caption = self.session.caption();
    }

    fn reset(&mut self) {
        self.session.reset();
        self.refresh_caption();
    }
}

impl BoardListener for Status {
    fn on_lines_cleared(&mut self, count: u32) {
        self.session.on_lines_cleared(count);
    }

    fn on_game_over(&mut self) {
        self.session.on_game_over();
        self.refresh_caption();
    }
}

/// Gravity, input and rendering entry points for one board
#[derive(Debug)]
pub struct GameController {
    board: Board,
    status: Rc<RefCell<Status>>,
}

impl GameController {
    /// Validate `config` and build a controller with a fresh board.
    pub fn new(config: &GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let seed = config.seed.unwrap_or_else(random_seed);
        log::info!(
            "new game: {}x{} board, level {}, seed {}",
            config.width,
            config.height,
            config.starting_level,
            seed
        );
        let board = Board::new(config.width, config.height, seed);
        Ok(Self::with_board(board, config.starting_level))
    }

    /// Wrap an existing board and register the controller's listener on it.
    pub fn with_board(mut board: Board, starting_level: u32) -> Self {
        let status = Rc::new(RefCell::new(Status::new(starting_level)));
        board.subscribe(status.clone());
        Self { board, status }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn session(&self) -> Ref<'_, Session> {
        Ref::map(self.status.borrow(), |s| &s.session)
    }

    pub fn level(&self) -> u32 {
        self.session().level()
    }

    pub fn score(&self) -> u32 {
        self.session().score()
    }

    pub fn lines(&self) -> u32 {
        self.session().lines()
    }

    pub fn paused(&self) -> bool {
        self.session().paused()
    }

    /// Last caption built for the renderer
    pub fn caption(&self) -> String {
        self.status.borrow().caption.clone()
    }

    /// Back to the starting level with score and lines zeroed.
    pub fn reset(&mut self) {
        self.status.borrow_mut().reset();
    }

    /// Count one frame; true when gravity should step.
    pub fn should_advance(&mut self) -> bool {
        self.status.borrow_mut().session.should_advance()
    }

    /// Per-frame update. On a gravity step the active shape moves down and the
    /// caption is rebuilt. Returns whether gravity stepped.
    pub fn cycle(&mut self) -> bool {
        // The status borrow must end before the board dispatches events to it.
        let advance = self.should_advance();
        if advance {
            self.board.move_down();
            self.status.borrow_mut().refresh_caption();
        }
        advance
    }

    /// Score a clear of `count` lines. The board calls this through the listener.
    pub fn on_lines_cleared(&mut self, count: u32) {
        self.status.borrow_mut().on_lines_cleared(count);
    }

    /// Reset the session and caption. The board calls this through the listener.
    pub fn on_game_over(&mut self) {
        self.status.borrow_mut().on_game_over();
    }

    /// Flip the pause flag; returns the new state.
    pub fn toggle_pause(&mut self) -> bool {
        self.status.borrow_mut().session.toggle_pause()
    }

    /// Forward a movement to the board. Ignored while paused.
    pub fn handle_direction(&mut self, direction: Direction) -> bool {
        if self.paused() {
            return false;
        }
        self.board.move_piece(direction)
    }

    /// Apply one input action; returns whether it changed anything.
    pub fn handle_action(&mut self, action: GameAction) -> bool {
        match action.direction() {
            Some(direction) => self.handle_direction(direction),
            None => {
                self.toggle_pause();
                true
            }
        }
    }

    /// Redraw a whole frame onto `surface`.
    pub fn draw_handler<S: RenderSurface + ?Sized>(&self, surface: &mut S) {
        surface.clear();
        self.board.draw_game_board(surface);
        self.board.draw_preview(surface);
        let status = self.status.borrow();
        surface.set_caption(&status.caption);
        surface.set_paused(status.session.paused());
    }
}
