use anyhow::{Context, Result};
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{self, Event},
    execute, queue,
    style::Print,
    terminal::{self, Clear, ClearType},
};
use log::info;
use rand::rngs::StdRng;
use std::io::{stdout, Write};
use std::time::{Duration, Instant};

use crate::engine::{Engine, GameState, Phase};
use crate::grid::{Position, BOARD_SIZE};
use crate::input::{InputHandler, KeyAction};

/// Time between two engine ticks.
pub const TICK_RATE: Duration = Duration::from_millis(150);

const HELP: &str = "Arrows/WASD to move, Enter to start, q to quit";

/// Terminal front-end: reads keys, drives the engine clock and draws the
/// board after every change.
pub struct Game {
    engine: Engine<StdRng>,
    input: InputHandler,
    should_quit: bool,
    last_tick: Instant,
}

impl Game {
    pub fn new(engine: Engine<StdRng>) -> Self {
        Game {
            engine,
            input: InputHandler::new(),
            should_quit: false,
            last_tick: Instant::now(),
        }
    }

    /// Plays until the player quits and returns the last score.
    pub fn run(&mut self) -> Result<u32> {
        terminal::enable_raw_mode().context("failed to enable raw mode")?;
        let mut out = stdout();
        let result = execute!(out, Hide)
            .context("failed to hide cursor")
            .and_then(|_| self.run_loop(&mut out));

        // Restore the terminal even when the loop failed.
        let restored = terminal::disable_raw_mode()
            .context("failed to disable raw mode")
            .and_then(|_| {
                execute!(out, Show, MoveTo(0, BOARD_SIZE + 5), Print("\r\n"))
                    .context("failed to show cursor")
            });

        result?;
        restored?;
        Ok(self.engine.state().score)
    }

    fn run_loop<W: Write>(&mut self, out: &mut W) -> Result<()> {
        self.draw(out).context("failed to draw")?;

        while !self.should_quit {
            let timeout = TICK_RATE.saturating_sub(self.last_tick.elapsed());
            if event::poll(timeout).context("failed to poll input")? {
                if let Event::Key(key) = event::read().context("failed to read input")? {
                    let action = self.input.handle_key_event(key);
                    if self.apply(action) {
                        self.draw(out).context("failed to draw")?;
                    }
                }
            }

            if self.last_tick.elapsed() >= TICK_RATE {
                let before = self.engine.state().phase;
                let state = self.engine.tick();
                if before == Phase::Running && state.is_over() {
                    info!("final score {}", state.score);
                }
                self.draw(out).context("failed to draw")?;
                self.last_tick = Instant::now();
            }
        }

        Ok(())
    }

    /// Forwards one key action to the engine. Returns true when the board
    /// should be redrawn right away.
    fn apply(&mut self, action: KeyAction) -> bool {
        match action {
            KeyAction::Steer(direction) => {
                self.engine.set_direction(direction);
                false
            }
            KeyAction::Start => {
                let before = self.engine.state().phase;
                self.engine.start();
                if before != Phase::Running {
                    self.last_tick = Instant::now();
                    true
                } else {
                    false
                }
            }
            KeyAction::Quit => {
                self.should_quit = true;
                false
            }
            KeyAction::None => false,
        }
    }

    fn draw<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        queue!(out, Clear(ClearType::All))?;
        for (row, line) in frame(self.engine.state()).iter().enumerate() {
            queue!(out, MoveTo(0, row as u16), Print(line))?;
        }
        out.flush()
    }
}

/// Text lines of one frame: bordered board, score, status and help.
pub fn frame(state: &GameState) -> Vec<String> {
    let width = usize::from(BOARD_SIZE) * 2;
    let border = "#".repeat(width + 2);
    let mut lines = Vec::with_capacity(usize::from(BOARD_SIZE) + 5);

    lines.push(border.clone());
    for y in 0..BOARD_SIZE {
        let mut line = String::with_capacity(width + 2);
        line.push('#');
        for x in 0..BOARD_SIZE {
            let pos = Position::new(x, y);
            let cell = if state.head() == pos {
                "@@"
            } else if state.snake.contains(&pos) {
                "oo"
            } else if state.food == pos {
                "**"
            } else {
                "  "
            };
            line.push_str(cell);
        }
        line.push('#');
        lines.push(line);
    }
    lines.push(border);

    lines.push(format!("Score: {}", state.score));
    lines.push(
        match state.phase {
            Phase::NotStarted => "Press Enter to start",
            Phase::Running => "",
            Phase::Over => "Game Over! Press Enter to play again",
        }
        .to_string(),
    );
    lines.push(HELP.to_string());
    lines
}
