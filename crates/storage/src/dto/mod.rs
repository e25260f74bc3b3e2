pub mod attempt;
pub mod gl;
pub mod scoreboard;
