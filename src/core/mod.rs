mod bounded_grid;
mod bounds;
mod errors;
mod history;
mod level;
mod model_helpers;
mod models;
mod update;

pub use bounded_grid::BoundedGrid;
pub use bounds::BoundsOriginRoot;
pub use errors::{GameError, LevelDefect, Result};
pub use history::{
    DEFAULT_HISTORY_CAPACITY, HistoryDecodeError, MoveHistory, decode as decode_history,
    encode as encode_history,
};
pub use level::{BaseLayout, Grid, count_players, load, load_sized, locate_player, to_level_bytes};
pub use model_helpers::{count_boxes_on_targets, is_won};
pub use models::{Direction, KeyCommand, MoveOutcome, MoveRecord, Occupant, Terrain, Tile, Vec2};
pub use update::{resolve, unapply};
