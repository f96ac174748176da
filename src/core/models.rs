use std::ops::{Add, Mul, Sub};

/// What a board cell shows right now. Every combination of terrain and
/// occupant has its own tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tile {
    Wall,
    Floor,
    Target,
    Box,
    BoxOnTarget,
    Player,
    PlayerOnTarget,
}

/// The part of a cell that never moves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Terrain {
    Wall,
    Floor,
    Target,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Occupant {
    Box,
    Player,
}

impl Tile {
    pub const ALL: [Tile; 7] = [
        Tile::Wall,
        Tile::Floor,
        Tile::Target,
        Tile::Box,
        Tile::BoxOnTarget,
        Tile::Player,
        Tile::PlayerOnTarget,
    ];

    /// Builds the tile for `occupant` standing on `terrain`.
    /// Walls cannot hold anything, so they stay walls.
    pub fn compose(terrain: Terrain, occupant: Option<Occupant>) -> Tile {
        match (terrain, occupant) {
            (Terrain::Wall, _) => Tile::Wall,
            (Terrain::Floor, None) => Tile::Floor,
            (Terrain::Floor, Some(Occupant::Box)) => Tile::Box,
            (Terrain::Floor, Some(Occupant::Player)) => Tile::Player,
            (Terrain::Target, None) => Tile::Target,
            (Terrain::Target, Some(Occupant::Box)) => Tile::BoxOnTarget,
            (Terrain::Target, Some(Occupant::Player)) => Tile::PlayerOnTarget,
        }
    }

    pub fn terrain(self) -> Terrain {
        match self {
            Tile::Wall => Terrain::Wall,
            Tile::Floor | Tile::Box | Tile::Player => Terrain::Floor,
            Tile::Target | Tile::BoxOnTarget | Tile::PlayerOnTarget => Terrain::Target,
        }
    }

    pub fn occupant(self) -> Option<Occupant> {
        match self {
            Tile::Box | Tile::BoxOnTarget => Some(Occupant::Box),
            Tile::Player | Tile::PlayerOnTarget => Some(Occupant::Player),
            Tile::Wall | Tile::Floor | Tile::Target => None,
        }
    }

    pub fn has_box(self) -> bool {
        self.occupant() == Some(Occupant::Box)
    }

    pub fn has_player(self) -> bool {
        self.occupant() == Some(Occupant::Player)
    }

    /// Floor or target with nothing on it.
    pub fn is_free(self) -> bool {
        self.terrain() != Terrain::Wall && self.occupant().is_none()
    }

    /// Level-file symbol.
    pub fn symbol(self) -> char {
        match self {
            Tile::Wall => '#',
            Tile::Floor => ' ',
            Tile::Target => '.',
            Tile::Box => '$',
            Tile::BoxOnTarget => '*',
            Tile::Player => '@',
            Tile::PlayerOnTarget => '+',
        }
    }

    pub fn from_symbol(symbol: u8) -> Option<Tile> {
        Some(match symbol {
            b'#' => Tile::Wall,
            b' ' => Tile::Floor,
            b'.' => Tile::Target,
            b'$' => Tile::Box,
            b'*' => Tile::BoxOnTarget,
            b'@' => Tile::Player,
            b'+' => Tile::PlayerOnTarget,
            _ => return None,
        })
    }
}

/// Row/column position. `i` is the row, `j` the column.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Vec2 {
    pub i: i32,
    pub j: i32,
}

impl Vec2 {
    pub const fn new(i: i32, j: i32) -> Self {
        Vec2 { i, j }
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2 {
            i: self.i + rhs.i,
            j: self.j + rhs.j,
        }
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2 {
            i: self.i - rhs.i,
            j: self.j - rhs.j,
        }
    }
}

impl Mul<i32> for Vec2 {
    type Output = Vec2;

    fn mul(self, rhs: i32) -> Vec2 {
        Vec2 {
            i: self.i * rhs,
            j: self.j * rhs,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn offset(self) -> Vec2 {
        match self {
            Direction::Up => Vec2 { i: -1, j: 0 },
            Direction::Down => Vec2 { i: 1, j: 0 },
            Direction::Left => Vec2 { i: 0, j: -1 },
            Direction::Right => Vec2 { i: 0, j: 1 },
        }
    }

    pub fn inverse(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// One discrete command from the input source.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyCommand {
    Move(Direction),
    Undo,
    Reload,
    ZoomIn,
    ZoomOut,
    Quit,
}

/// Everything needed to do or undo one step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MoveRecord {
    pub direction: Direction,
    pub pushed_box: bool,
}

impl MoveRecord {
    pub fn step(direction: Direction) -> Self {
        MoveRecord {
            direction,
            pushed_box: false,
        }
    }

    pub fn push(direction: Direction) -> Self {
        MoveRecord {
            direction,
            pushed_box: true,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    Moved { record: MoveRecord, player: Vec2 },
    Blocked,
}
