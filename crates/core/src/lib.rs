#![forbid(unsafe_code)]

pub mod forum;
pub mod model;
pub mod planner;
pub mod progress;
pub mod time;
pub mod timer;

pub use time::Clock;
