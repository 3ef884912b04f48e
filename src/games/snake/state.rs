use std::collections::VecDeque;

/// A cell on the board grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn translated(self, (dx, dy): (i32, i32)) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// One of the four movement directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Unit vector for this direction. The y axis grows downward.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    pub fn is_opposite(self, other: Self) -> bool {
        self.opposite() == other
    }
}

/// The snake's body: grid cells in order, head first. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chain {
    segments: VecDeque<Point>,
}

impl Chain {
    pub fn new(head: Point) -> Self {
        Self {
            segments: VecDeque::from([head]),
        }
    }

    pub fn head(&self) -> Point {
        *self.segments.front().expect("chain is never empty")
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn occupies(&self, cell: Point) -> bool {
        self.segments.contains(&cell)
    }

    pub fn cells(&self) -> impl Iterator<Item = Point> + '_ {
        self.segments.iter().copied()
    }

    /// Prepend a new head; drops the tail unless the chain should grow.
    pub fn advance(&mut self, new_head: Point, grow: bool) {
        self.segments.push_front(new_head);
        if !grow {
            self.segments.pop_back();
        }
        debug_assert!(!self.is_empty(), "chain lost its head");
        debug_assert!(self.is_disjoint(), "chain occupies a cell twice");
    }

    fn is_disjoint(&self) -> bool {
        let unique: std::collections::HashSet<_> = self.segments.iter().collect();
        unique.len() == self.segments.len()
    }
}

/// Why a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collision {
    Wall,
    SelfHit,
}

/// Run phase. `Idle` and `Over` both mean "not running"; they differ only
/// in what the board shows and how the start control is labeled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Before the first game.
    Idle,
    /// A game is in progress and ticks are armed.
    Running,
    /// Terminal: a collision, or a fully covered board (`won`).
    Over { won: bool },
}

impl Phase {
    pub fn is_running(self) -> bool {
        matches!(self, Phase::Running)
    }
}
