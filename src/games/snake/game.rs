use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use ratatui::Frame;
use tracing::{debug, info};

use super::renderer;
use super::state::{Chain, Collision, Direction, Phase, Point};
use crate::core::config::GameConfig;
use crate::core::game::{Context, Game};

/// What a single tick did, from the runner's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not running, or no direction committed yet; nothing moved.
    Idle,
    /// The chain translated by one cell.
    Moved,
    /// Food was eaten. `rearm` carries the new tick period if the speed
    /// curve lowered it.
    Ate { rearm: Option<Duration> },
    /// The candidate head hit a wall or the chain; the run is over.
    GameOver(Collision),
    /// The chain covers the whole board; the run is over, and won.
    BoardFull,
}

/// All mutable game state plus the rules that advance it.
///
/// The tick and steer methods are synchronous and free of timer or terminal
/// concerns; the [`Game`] impl at the bottom maps their outcomes onto
/// engine commands.
pub struct SnakeGame {
    config: GameConfig,
    phase: Phase,
    chain: Chain,
    direction: Option<Direction>,
    pending: Option<Direction>,
    food: Option<Point>,
    score: u32,
    interval: Duration,
    rng: StdRng,
}

impl SnakeGame {
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, StdRng::from_os_rng())
    }

    pub fn with_rng(config: GameConfig, rng: StdRng) -> Self {
        let head = Point::new(config.start_cell.0, config.start_cell.1);
        Self {
            phase: Phase::Idle,
            chain: Chain::new(head),
            direction: None,
            pending: None,
            food: None,
            score: 0,
            interval: config.base_interval(),
            config,
            rng,
        }
    }

    /// Reset everything and begin a new run. Returns the tick period the
    /// caller should arm.
    pub fn start(&mut self) -> Duration {
        let head = Point::new(self.config.start_cell.0, self.config.start_cell.1);
        self.chain = Chain::new(head);
        self.direction = None;
        self.pending = None;
        self.score = 0;
        self.interval = self.config.base_interval();
        self.food = self.place_food();
        self.phase = Phase::Running;
        info!(interval_ms = self.interval.as_millis() as u64, "game started");
        self.interval
    }

    /// Buffer a direction change for the next tick.
    ///
    /// The intent is judged against the committed direction (the one the
    /// last completed move used), not against an earlier intent from the
    /// same tick window, so a burst of key presses between two ticks cannot
    /// add up to a 180-degree reversal.
    pub fn steer(&mut self, requested: Direction) {
        if let Some(current) = self.direction {
            if current.is_opposite(requested) {
                debug!(?requested, ?current, "ignoring reversal");
                return;
            }
        }
        self.pending = Some(requested);
    }

    /// Advance the game by one tick.
    pub fn tick(&mut self) -> TickOutcome {
        if !self.phase.is_running() {
            return TickOutcome::Idle;
        }

        if let Some(pending) = self.pending.take() {
            // Re-checked here in case state changed since the key arrived.
            if !self.direction.is_some_and(|d| d.is_opposite(pending)) {
                self.direction = Some(pending);
            }
        }

        let Some(direction) = self.direction else {
            // No directional input yet; the chain sits still.
            return TickOutcome::Idle;
        };

        let candidate = self.chain.head().translated(direction.delta());

        if !self.in_bounds(candidate) {
            return self.end_run(Collision::Wall);
        }
        if self.chain.occupies(candidate) {
            return self.end_run(Collision::SelfHit);
        }

        let ate = self.food == Some(candidate);
        self.chain.advance(candidate, ate);

        if !ate {
            return TickOutcome::Moved;
        }

        self.score += 1;
        self.food = self.place_food();

        let rearm = if self.interval > self.config.min_interval() {
            self.interval = self
                .interval
                .saturating_sub(self.config.interval_step())
                .max(self.config.min_interval());
            Some(self.interval)
        } else {
            None
        };
        info!(
            score = self.score,
            interval_ms = self.interval.as_millis() as u64,
            "food eaten"
        );

        if self.food.is_none() {
            // Every cell is covered; there is nowhere left to place food.
            self.phase = Phase::Over { won: true };
            info!(score = self.score, "board full");
            return TickOutcome::BoardFull;
        }

        TickOutcome::Ate { rearm }
    }

    fn end_run(&mut self, collision: Collision) -> TickOutcome {
        self.phase = Phase::Over { won: false };
        info!(?collision, score = self.score, "game over");
        TickOutcome::GameOver(collision)
    }

    fn in_bounds(&self, cell: Point) -> bool {
        let tiles = self.config.tile_count();
        cell.x >= 0 && cell.x < tiles && cell.y >= 0 && cell.y < tiles
    }

    /// Pick a food cell the chain does not occupy.
    ///
    /// Rejection sampling with a bounded attempt count, then a linear scan
    /// over the board. `None` only when the chain covers every cell.
    fn place_food(&mut self) -> Option<Point> {
        let tiles = self.config.tile_count();
        let attempts = (tiles as usize).pow(2) * 4;
        for _ in 0..attempts {
            let cell = Point::new(
                self.rng.random_range(0..tiles),
                self.rng.random_range(0..tiles),
            );
            if !self.chain.occupies(cell) {
                return Some(cell);
            }
        }
        (0..tiles)
            .flat_map(|y| (0..tiles).map(move |x| Point::new(x, y)))
            .find(|cell| !self.chain.occupies(*cell))
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn chain(&self) -> &Chain {
        &self.chain
    }

    pub fn food(&self) -> Option<Point> {
        self.food
    }

    pub fn direction(&self) -> Option<Direction> {
        self.direction
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Label for the start control in the current phase.
    pub fn start_label(&self) -> &'static str {
        match self.phase {
            Phase::Idle => "Start",
            Phase::Running => "Restart",
            Phase::Over { .. } => "Play Again",
        }
    }

    /// The start control only reacts while no game is running.
    pub fn start_enabled(&self) -> bool {
        !self.phase.is_running()
    }

    #[cfg(test)]
    fn set_food(&mut self, food: Option<Point>) {
        self.food = food;
    }
}

impl Game for SnakeGame {
    fn handle_key(&mut self, key: KeyEvent, ctx: &mut Context) {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => ctx.quit(),
            KeyCode::Left => self.steer(Direction::Left),
            KeyCode::Up => self.steer(Direction::Up),
            KeyCode::Right => self.steer(Direction::Right),
            KeyCode::Down => self.steer(Direction::Down),
            KeyCode::Enter | KeyCode::Char(' ') => {
                if self.start_enabled() {
                    let period = self.start();
                    ctx.arm_ticks(period);
                }
            }
            KeyCode::Char('q') | KeyCode::Esc => ctx.quit(),
            _ => {}
        }
    }

    fn on_tick(&mut self, ctx: &mut Context) {
        match self.tick() {
            TickOutcome::Idle | TickOutcome::Moved => {}
            TickOutcome::Ate { rearm } => {
                if let Some(period) = rearm {
                    ctx.arm_ticks(period);
                }
            }
            TickOutcome::GameOver(_) | TickOutcome::BoardFull => ctx.stop_ticks(),
        }
    }

    fn render(&self, frame: &mut Frame) {
        renderer::draw(self, frame);
    }
}
