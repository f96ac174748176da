use crate::core::Grid;
use crate::session::SessionState;

/// Read-only snapshot handed to the renderer after every state change.
#[derive(Clone, Copy, Debug)]
pub struct GameRenderState<'a> {
    pub level_name: &'a str,
    pub grid: &'a Grid,
    pub zoom: u8,
    pub move_count: usize,
    pub boxes_on_targets: usize,
    pub target_count: usize,
    pub state: SessionState,
}
