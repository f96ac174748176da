use crate::core::level::{BaseLayout, Grid};
use crate::core::models::{Direction, MoveOutcome, MoveRecord, Occupant, Tile, Vec2};

/// Applies one step of the player at `player` in `dir`.
///
/// Blocked moves leave the grid untouched. A step is also blocked when the
/// cell two steps away lies off the board, even if no box is pushed.
pub fn resolve(grid: &mut Grid, base: &BaseLayout, player: Vec2, dir: Direction) -> MoveOutcome {
    let offset = dir.offset();
    let next = player + offset;
    let beyond = player + offset * 2;
    if !grid.contains(&next) || !grid.contains(&beyond) {
        return MoveOutcome::Blocked;
    }

    let dest = grid[&next];
    if dest == Tile::Wall {
        return MoveOutcome::Blocked;
    }

    let pushing = dest.has_box();
    if pushing {
        if !grid[&beyond].is_free() {
            return MoveOutcome::Blocked;
        }
        place(grid, base, &beyond, Some(Occupant::Box));
    }

    place(grid, base, &player, None);
    place(grid, base, &next, Some(Occupant::Player));

    MoveOutcome::Moved {
        record: MoveRecord {
            direction: dir,
            pushed_box: pushing,
        },
        player: next,
    }
}

/// Reverses `record`, which must be the last move applied with the player now
/// at `player`. Returns where the player stands afterwards.
pub fn unapply(grid: &mut Grid, base: &BaseLayout, player: Vec2, record: MoveRecord) -> Vec2 {
    let back = record.direction.inverse().offset();
    let previous = player + back;

    place(grid, base, &player, None);
    if record.pushed_box {
        place(grid, base, &player, Some(Occupant::Box));
        place(grid, base, &(player - back), None);
    }
    place(grid, base, &previous, Some(Occupant::Player));

    previous
}

/// Puts `occupant` (or nothing) on the cell, keeping its terrain.
fn place(grid: &mut Grid, base: &BaseLayout, pos: &Vec2, occupant: Option<Occupant>) {
    grid[pos] = Tile::compose(base.terrain(pos), occupant);
}
