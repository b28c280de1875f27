pub mod frame;
pub mod indicators;
pub mod scorer;

#[cfg(test)]
mod indicators_tests;

pub use frame::*;
pub use indicators::*;
pub use scorer::*;
