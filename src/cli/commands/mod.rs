/// Configuration inspection commands
pub mod config;
/// Simulated device controls
pub mod device;
/// Session and transport commands
pub mod player;
/// Route and rendering commands
pub mod ui;
