use crate::core::bounded_grid::BoundedGrid;
use crate::core::bounds::BoundsOriginRoot;
use crate::core::errors::{GameError, LevelDefect, Result};
use crate::core::models::{Terrain, Tile, Vec2};

/// The mutable board.
pub type Grid = BoundedGrid<Tile>;

/// Terrain of every cell, captured when the level was loaded, along with the
/// tiles the level started from. Never mutated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BaseLayout {
    terrain: BoundedGrid<Terrain>,
    initial: Grid,
}

impl BaseLayout {
    pub fn from_grid(grid: &Grid) -> Self {
        BaseLayout {
            terrain: grid.map(|tile| tile.terrain()),
            initial: grid.clone(),
        }
    }

    pub fn terrain(&self, pos: &Vec2) -> Terrain {
        self.terrain[pos]
    }

    pub fn is_target(&self, pos: &Vec2) -> bool {
        self.terrain[pos] == Terrain::Target
    }

    pub fn target_count(&self) -> usize {
        self.terrain
            .iter()
            .filter(|(_, terrain)| **terrain == Terrain::Target)
            .count()
    }

    pub fn initial_grid(&self) -> &Grid {
        &self.initial
    }

    pub fn size(&self) -> BoundsOriginRoot {
        self.terrain.size()
    }
}

/// Parses a standard 12x12 level.
pub fn load(source: &[u8]) -> Result<(Grid, BaseLayout)> {
    load_sized(source, BoundsOriginRoot::STANDARD)
}

/// Parses a level that must be exactly `size`. One trailing newline is
/// allowed and `\r\n` line endings are accepted.
pub fn load_sized(source: &[u8], size: BoundsOriginRoot) -> Result<(Grid, BaseLayout)> {
    let grid = parse_grid(source, size)?;
    let base = BaseLayout::from_grid(&grid);
    Ok((grid, base))
}

fn parse_grid(source: &[u8], size: BoundsOriginRoot) -> std::result::Result<Grid, LevelDefect> {
    let rows = size.rows() as usize;
    let cols = size.cols() as usize;

    let body = source.strip_suffix(b"\n").unwrap_or(source);
    let lines: Vec<&[u8]> = if body.is_empty() {
        Vec::new()
    } else {
        body.split(|&b| b == b'\n')
            .map(|line| line.strip_suffix(b"\r").unwrap_or(line))
            .collect()
    };

    if lines.len() != rows {
        return Err(LevelDefect::RowCount {
            expected: rows,
            found: lines.len(),
        });
    }

    let mut cells = Vec::with_capacity(rows * cols);
    for (row, line) in lines.iter().enumerate() {
        if line.len() != cols {
            return Err(LevelDefect::RowWidth {
                row,
                expected: cols,
                found: line.len(),
            });
        }
        for (col, &symbol) in line.iter().enumerate() {
            let tile = Tile::from_symbol(symbol).ok_or(LevelDefect::UnknownSymbol {
                row,
                col,
                symbol: symbol as char,
            })?;
            cells.push(tile);
        }
    }

    BoundedGrid::from_cells(size, cells).ok_or(LevelDefect::RowCount {
        expected: rows,
        found: lines.len(),
    })
}

/// First player cell in row-major order.
pub fn locate_player(grid: &Grid) -> Result<Vec2> {
    grid.iter()
        .find(|(_, tile)| tile.has_player())
        .map(|(pos, _)| pos)
        .ok_or(GameError::PlayerNotFound)
}

pub fn count_players(grid: &Grid) -> usize {
    grid.iter().filter(|(_, tile)| tile.has_player()).count()
}

/// Serializes the grid back to the level-file format.
pub fn to_level_bytes(grid: &Grid) -> Vec<u8> {
    let size = grid.size();
    let mut out = Vec::with_capacity((size.area() + size.rows()) as usize);
    for row in grid.rows() {
        out.extend(row.iter().map(|tile| tile.symbol() as u8));
        out.push(b'\n');
    }
    out
}
