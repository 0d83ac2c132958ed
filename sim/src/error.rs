//! Error types

use thiserror::Error;

/// Errors raised by the simulated components.
///
/// Dropped writes (queue full) and dropped reads (queue empty) are not
/// errors; they are ordinary outcomes of a clock edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SimError {
    #[error("invalid capacity {capacity} (must be at least 1)")]
    InvalidCapacity { capacity: usize },

    #[error("address {addr:#x} out of range for a {size}-entry memory")]
    AddressOutOfRange { addr: usize, size: usize },
}
