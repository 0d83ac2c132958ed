//! Low-level emulation.
//!
//! These are abstractions for representing/simulating clocked circuits.
//! The idea is to *approximate* the semantics of a behavioral RTL so that
//! the memory primitives in this crate look and behave *somewhat* like
//! their simulated RTL counterparts: inputs are driven during a cycle and
//! only take effect at the following clock edge.
//!
//! [ClockedState] is a container used to synchronize updates to multiple
//! simulated clocked components.
//!
//! All clocked components must implement [Clocked], which specifies how the
//! internal state of an object should change at clock edges.
//!

pub mod register;
pub mod storage;
pub mod mem;
pub mod rom;
pub mod fifo;

use std::cell::*;
use std::rc::*;

/// Interface to a clocked component.
pub trait Clocked {
    /// Simulate a clock edge, mutating some internal state.
    fn update(&mut self);
}

/// A shared mutable reference to some clocked component.
pub type StateRef<T> = Rc<RefCell<T>>;

/// Wrap a component in a [StateRef].
pub fn state_ref<T>(obj: T) -> StateRef<T> {
    Rc::new(RefCell::new(obj))
}

/// A container for components sharing the same clock signal.
pub struct ClockedState {
    cycle: usize,
    /// The set of clocked components being tracked.
    components: Vec<StateRef<dyn Clocked>>,
}
impl ClockedState {
    /// Create a new clock domain.
    pub fn new() -> Self {
        Self {
            cycle: 0,
            components: Vec::new(),
        }
    }

    /// Track a component so that it is clocked along with this domain.
    pub fn track<T>(&mut self, obj: &StateRef<T>)
        where T: Clocked + 'static
    {
        self.components.push(obj.clone());
    }

    /// Number of clock edges simulated so far.
    pub fn cycle(&self) -> usize {
        self.cycle
    }

    pub fn num_components(&self) -> usize {
        self.components.len()
    }
}
impl Default for ClockedState {
    fn default() -> Self {
        Self::new()
    }
}

impl Clocked for ClockedState {
    // Update all tracked components.
    fn update(&mut self) {
        for entry in self.components.iter() {
            entry.borrow_mut().update()
        }
        self.cycle += 1;
    }
}
