#![forbid(unsafe_code)]

pub mod literal;
pub mod model;
pub mod time;

pub use time::{Clock, LogTimeZone};
