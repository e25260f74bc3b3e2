pub mod athlete;
pub mod attempt;
pub mod event;
pub mod submission;
