
use std::fmt;

use crate::lle::*;

/// A register with a synchronous reset value.
///
/// Reads always observe the value latched at the previous clock edge; a
/// value driven during the current cycle only becomes visible after
/// [Clocked::update]. An undriven register holds its value.
#[derive(Clone, Copy, Debug)]
pub struct Reg<T: Copy> {
    /// The [instantaneous] value of this register.
    data: T,
    /// The next value of this register (effective at the next clock edge).
    next: Option<T>,
    /// Value loaded by [Reg::reset].
    init: T,
}
impl <T: Copy> Reg<T> {
    /// Create a new register holding (and resetting to) `init`.
    pub fn new(init: T) -> Self {
        Self { data: init, next: None, init }
    }
    /// Drive input to this register.
    pub fn drive(&mut self, val: T) { self.next = Some(val) }
    /// Drive the reset value into this register.
    pub fn reset(&mut self) { self.next = Some(self.init) }
    /// Returns true if a value has been driven during this cycle.
    pub fn is_driven(&self) -> bool { self.next.is_some() }
    /// Sample the current value of this register.
    pub fn sample(&self) -> T { self.data }
    /// Sample the current value of this register (as a reference).
    pub fn sample_ref(&self) -> &T { &self.data }
}
impl <T: Copy + Default> Default for Reg<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}
impl <T: Copy> Clocked for Reg<T> {
    fn update(&mut self) {
        if let Some(next) = self.next.take() {
            self.data = next;
        }
    }
}
impl <T: Copy + fmt::LowerHex> fmt::Display for Reg<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.data)
    }
}
