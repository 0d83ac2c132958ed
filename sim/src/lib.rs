//! Cycle-stepped models of small synchronous memory primitives.
//!
//! See [lle] for the clocking layer and the components built on it.

pub mod error;
pub mod lle;

pub use error::SimError;

#[cfg(test)]
#[macro_use(quickcheck)]
extern crate quickcheck_macros;
