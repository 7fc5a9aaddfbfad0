//! Find the fewest button presses that configure a factory machine's joltage counters

#![warn(rust_2018_idioms)]

#[macro_use]
extern crate log;

pub mod error;
pub mod machine;
pub mod solve;

mod parse;
