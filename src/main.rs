//! Terminal runner (default binary).
//!
//! Parses the startup options, builds the game, and drives it from a 60 Hz loop:
//! crossterm for input, a framebuffer canvas for output.

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};

use tui_blocks::core::{GameConfig, GameController};
use tui_blocks::input::{map_key, should_quit};
use tui_blocks::term::{BoardCanvas, Terminal, Viewport};
use tui_blocks::types::{BOARD_HEIGHT, BOARD_WIDTH, DEFAULT_STARTING_LEVEL, FRAME_RATE};

/// Falling-block puzzle in the terminal.
///
/// Arrows, WASD or HJKL move and rotate; P pauses; Q or Esc quits.
#[derive(Debug, Parser)]
#[command(name = "tui-blocks", version)]
struct Args {
    /// Level to start at; higher levels fall faster.
    #[arg(default_value_t = DEFAULT_STARTING_LEVEL, value_name = "LEVEL")]
    level: u32,

    /// Board width in cells.
    #[arg(long, default_value_t = BOARD_WIDTH, value_name = "COLS")]
    width: u16,

    /// Board height in cells.
    #[arg(long, default_value_t = BOARD_HEIGHT, value_name = "ROWS")]
    height: u16,

    /// Seed for the shape sequence; random when omitted.
    #[arg(long)]
    seed: Option<u64>,
}

impl Args {
    fn config(&self) -> GameConfig {
        GameConfig {
            width: self.width,
            height: self.height,
            starting_level: self.level,
            seed: self.seed,
        }
    }
}

/// Everything the running game needs, built once at startup.
struct App {
    terminal: Terminal,
    game: GameController,
    canvas: BoardCanvas,
}

impl App {
    fn new(game: GameController) -> Self {
        let canvas = BoardCanvas::new(game.board().width(), game.board().height());
        Self {
            terminal: Terminal::new(),
            game,
            canvas,
        }
    }

    fn run(&mut self) -> Result<()> {
        let frame = Duration::from_secs(1) / FRAME_RATE;
        let mut last_tick = Instant::now();

        loop {
            self.draw()?;

            let timeout = frame.saturating_sub(last_tick.elapsed());
            if event::poll(timeout)? {
                match event::read()? {
                    Event::Key(key) => {
                        if key.kind == KeyEventKind::Press && should_quit(key) {
                            return Ok(());
                        }
                        if let Some(action) = map_key(key) {
                            self.game.handle_action(action);
                        }
                    }
                    Event::Resize(..) => self.terminal.invalidate(),
                    _ => {}
                }
            }

            if last_tick.elapsed() >= frame {
                last_tick = Instant::now();
                self.game.cycle();
            }
        }
    }

    fn draw(&mut self) -> Result<()> {
        let (w, h) = self.terminal.size();
        self.canvas.set_viewport(Viewport::new(w, h));
        self.game.draw_handler(&mut self.canvas);
        self.terminal.present(self.canvas.framebuffer())?;
        self.terminal.set_title(self.canvas.caption())
    }
}

fn main() -> Result<()> {
    // stderr shares the screen with the game, so logging is opt-in via RUST_LOG.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("off")).init();

    let args = Args::parse();
    let game = GameController::new(&args.config()).context("invalid configuration")?;
    log::info!("starting at level {}", args.level);

    let mut app = App::new(game);
    app.terminal.enter()?;
    let result = app.run();

    // Always try to restore terminal state.
    let _ = app.terminal.exit();
    result
}
