// Terminal Sokoban.
// Tiles: '#' wall, '@' player, '$' box, '.' target, '*' box on target, '+' player on target, ' ' floor.

pub mod app;
pub mod config;
pub mod console_interface;
pub mod core;
pub mod interfaces;
pub mod models;
pub mod persistence;
pub mod replay;
pub mod session;

#[cfg(test)]
mod test;
