pub mod attempts;
pub mod gl;
pub mod scoreboard;
