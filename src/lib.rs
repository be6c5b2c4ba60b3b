// Public API for the bluff-round core and the demo binary

pub mod bank;
pub mod config;
pub mod leaderboard;
pub mod round;
pub mod simulate;
pub mod solo;
pub mod types;
