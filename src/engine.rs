use crate::grid::{occupied_by, Direction, Position, BOARD_SIZE};
use log::{debug, info, trace, warn};
use rand::rngs::ThreadRng;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::VecDeque;

/// Cell the head occupies at the start of every game.
pub const START_POSITION: Position = Position::new(10, 10);
/// Food cell at the start of every game.
pub const INITIAL_FOOD: Position = Position::new(5, 5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    NotStarted,
    Running,
    Over,
}

/// Everything a renderer needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    /// Body segments, head first.
    pub snake: VecDeque<Position>,
    pub food: Position,
    pub direction: Direction,
    /// Latest accepted turn, committed on the next tick.
    pub pending_direction: Direction,
    pub score: u32,
    pub phase: Phase,
}

impl GameState {
    /// A running game with the given body (head first), food and heading.
    ///
    /// # Panics
    ///
    /// Panics if `snake` yields no segments.
    pub fn new<I>(snake: I, food: Position, direction: Direction) -> Self
    where
        I: IntoIterator<Item = Position>,
    {
        let snake: VecDeque<Position> = snake.into_iter().collect();
        assert!(!snake.is_empty(), "a snake needs at least one segment");

        GameState {
            snake,
            food,
            direction,
            pending_direction: direction,
            score: 0,
            phase: Phase::Running,
        }
    }

    fn initial(phase: Phase) -> Self {
        GameState {
            phase,
            ..GameState::new([START_POSITION], INITIAL_FOOD, Direction::Right)
        }
    }

    pub fn head(&self) -> Position {
        self.snake[0]
    }

    pub fn length(&self) -> usize {
        self.snake.len()
    }

    pub fn is_over(&self) -> bool {
        self.phase == Phase::Over
    }
}

/// The simulation. Callers drive it with [`Engine::start`],
/// [`Engine::set_direction`] and [`Engine::tick`] and read
/// [`Engine::state`] to draw.
pub struct Engine<R: Rng = ThreadRng> {
    state: GameState,
    rng: R,
}

impl Engine<ThreadRng> {
    pub fn new() -> Self {
        Engine::with_rng(rand::thread_rng())
    }
}

impl Default for Engine<ThreadRng> {
    fn default() -> Self {
        Engine::new()
    }
}

impl<R: Rng> Engine<R> {
    /// An engine waiting for [`Engine::start`], drawing food cells from `rng`.
    pub fn with_rng(rng: R) -> Self {
        Engine {
            state: GameState::initial(Phase::NotStarted),
            rng,
        }
    }

    /// An engine continuing from an arbitrary state.
    pub fn resume(state: GameState, rng: R) -> Self {
        Engine { state, rng }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Begins a game, or a fresh one after game over. Does nothing while a
    /// game is running.
    pub fn start(&mut self) -> &GameState {
        if self.state.phase != Phase::Running {
            if self.state.is_over() {
                info!("restarting after game over, final score {}", self.state.score);
            } else {
                info!("starting game");
            }
            self.state = GameState::initial(Phase::Running);
        }
        &self.state
    }

    /// Queues a turn for the next tick. A reversal of the current heading
    /// is dropped, as is any request while no game is running.
    pub fn set_direction(&mut self, requested: Direction) {
        if self.state.phase != Phase::Running {
            return;
        }
        if self.state.direction.is_opposite(requested) {
            trace!("dropping reversal {:?} while heading {:?}", requested, self.state.direction);
            return;
        }
        self.state.pending_direction = requested;
    }

    /// Advances the game by one step.
    pub fn tick(&mut self) -> &GameState {
        if self.state.phase != Phase::Running {
            return &self.state;
        }

        let state = &mut self.state;
        state.direction = state.pending_direction;
        let new_head = state.head().step(state.direction);

        // Checked against the whole body before the tail moves, so the
        // cell the tail is about to leave is still fatal.
        if occupied_by(new_head, &state.snake) {
            state.phase = Phase::Over;
            info!("game over at {} with score {}", new_head, state.score);
            return &self.state;
        }

        state.snake.push_front(new_head);

        if new_head == state.food {
            state.score += 1;
            state.food = spawn_food(&mut self.rng, &state.snake, state.food);
            debug!(
                "ate food at {}, score {}, length {}, next food {}",
                new_head,
                state.score,
                state.snake.len(),
                state.food
            );
        } else {
            state.snake.pop_back();
        }

        &self.state
    }
}

/// Picks a free cell uniformly at random.
///
/// Rejection sampling over the whole board while the snake is short; once
/// it covers half the board the free cells are enumerated and one is
/// chosen directly. With no free cell left `current` is returned.
fn spawn_food<R: Rng + ?Sized>(
    rng: &mut R,
    snake: &VecDeque<Position>,
    current: Position,
) -> Position {
    let cells = usize::from(BOARD_SIZE) * usize::from(BOARD_SIZE);

    if snake.len() * 2 < cells {
        loop {
            let candidate = Position::random(rng);
            if !occupied_by(candidate, snake) {
                return candidate;
            }
        }
    }

    let free: Vec<Position> = (0..BOARD_SIZE)
        .flat_map(|y| (0..BOARD_SIZE).map(move |x| Position::new(x, y)))
        .filter(|pos| !occupied_by(*pos, snake))
        .collect();

    match free.choose(rng) {
        Some(pos) => *pos,
        None => {
            warn!("board is full, food stays at {}", current);
            current
        }
    }
}
