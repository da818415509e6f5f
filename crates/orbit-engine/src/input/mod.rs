pub mod queue;
pub mod dispatch;
