mod factory;
mod interval;
mod manager;
mod sequence;
mod speed;
mod template;

pub use factory::IntervalFactory;
pub use interval::{Color, Interval, IntervalId, IntervalKind, IntervalState, IntervalStatus};
pub use manager::{Command, SequenceManager};
pub use sequence::Sequence;
pub use speed::Speed;
pub use template::{IntervalTemplate, SequenceTemplate};
