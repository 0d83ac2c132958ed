
use crate::error::SimError;

/// Read-only memory with a combinational read port.
///
/// The contents are fixed at construction. There is no clock: a read
/// returns the addressed word immediately.
#[derive(Clone, Debug)]
pub struct Rom<D: Copy, const SZ: usize> {
    data: [D; SZ],
}
impl <D: Copy, const SZ: usize> Rom<D, SZ> {
    pub fn new_init_array(init: [D; SZ]) -> Result<Self, SimError> {
        if SZ == 0 {
            return Err(SimError::InvalidCapacity { capacity: SZ });
        }
        Ok(Self { data: init })
    }

    /// Preload each word from a function of its address.
    pub fn from_fn(f: impl FnMut(usize) -> D) -> Result<Self, SimError> {
        Self::new_init_array(std::array::from_fn(f))
    }

    pub fn read(&self, addr: usize) -> Result<D, SimError> {
        self.data
            .get(addr)
            .copied()
            .ok_or(SimError::AddressOutOfRange { addr, size: SZ })
    }

    pub fn len(&self) -> usize { SZ }
    pub fn is_empty(&self) -> bool { SZ == 0 }
}
