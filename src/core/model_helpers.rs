use crate::core::level::{BaseLayout, Grid};
use crate::core::models::Tile;

/// Won once every target cell holds a box. A level without targets is won
/// from the start.
pub fn is_won(grid: &Grid, base: &BaseLayout) -> bool {
    count_boxes_on_targets(grid) == base.target_count()
}

pub fn count_boxes_on_targets(grid: &Grid) -> usize {
    grid.iter()
        .filter(|(_, tile)| **tile == Tile::BoxOnTarget)
        .count()
}

