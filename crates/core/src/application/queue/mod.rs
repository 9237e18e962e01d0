// Queue Engine - bounded buffer, worker supervision & lifecycle

mod builder;
mod engine;
mod live;

pub use builder::QueueBuilder;
pub use engine::TaskQueue;
