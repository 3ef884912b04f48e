/// Classic snake: a segment chain on a fixed grid, food, and a linear
/// speed-up per food eaten.
pub mod game;
pub mod renderer;
pub mod state;

pub use game::{SnakeGame, TickOutcome};
pub use state::{Chain, Collision, Direction, Phase, Point};
