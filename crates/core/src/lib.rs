#![forbid(unsafe_code)]

pub mod evaluate;
pub mod model;
pub mod time;

pub use evaluate::{Verdict, evaluate};
pub use time::Clock;
