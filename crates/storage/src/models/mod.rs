mod athlete;
mod attempt;
mod event;
mod submission;

pub use athlete::Athlete;
pub use attempt::{ATTEMPTS_PER_LIFT, Attempt, AttemptStatus, LiftType, NewAttempt};
pub use event::Event;
pub use submission::{FormField, Submission, fields};
