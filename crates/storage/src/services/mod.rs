pub mod attempt_lifecycle;
pub mod gl_points;
pub mod scoreboard;
