
use std::fmt;

use crate::error::SimError;
use crate::lle::*;
use crate::lle::register::*;

/// Memory element (asynchronous read, synchronous write)
pub struct Mem<D: Copy, const SZ: usize> {
    data: [ Reg<D>; SZ ],
}
impl <D: Copy, const SZ: usize> Mem<D, SZ> {
    pub fn new_init_val(init: D) -> Self {
        Self { data: [ Reg::new(init); SZ ] }
    }
    pub fn new_init_array(init: &[D; SZ]) -> Self {
        let data: [Reg<D>; SZ] = init.map(Reg::new);
        Self { data }
    }

    /// Drive a write into entry `idx` (visible after the next clock edge).
    pub fn drive(&mut self, idx: usize, val: D) {
        self.data[idx].drive(val);
    }
    /// Read entry `idx` as of the last clock edge.
    pub fn sample(&self, idx: usize) -> D {
        self.data[idx].sample()
    }
    pub fn len(&self) -> usize { SZ }
    pub fn is_empty(&self) -> bool { SZ == 0 }
}
impl <D: Copy, const SZ: usize> Clocked for Mem<D, SZ> {
    fn update(&mut self) {
        for r in self.data.iter_mut() {
            r.update();
        }
    }
}
impl <D: Copy, const SZ: usize>
std::ops::Index<usize> for Mem<D, SZ>
{
    type Output = D;
    fn index(&self, idx: usize) -> &Self::Output {
        self.data[idx].sample_ref()
    }
}


/// Input signals for one cycle of a [SyncRam].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RamInput<D> {
    pub addr: usize,
    pub data_in: D,
    /// Write enable. When set, this cycle stores `data_in` and produces
    /// no read result.
    pub we: bool,
}

/// Single-port RAM with synchronous write and registered read.
///
/// Each cycle is either a write or a read, never both. On a read cycle
/// the addressed word is latched into the output register at the clock
/// edge; on a write cycle the output register keeps its old value.
pub struct SyncRam<D: Copy, const SZ: usize> {
    mem: Mem<D, SZ>,
    data_out: Reg<D>,
    input: Option<RamInput<D>>,
}
impl <D: Copy, const SZ: usize> SyncRam<D, SZ> {
    /// Create a RAM with every word (and the output register) set to `init`.
    pub fn new_init_val(init: D) -> Result<Self, SimError> {
        Self::check_capacity()?;
        Ok(Self {
            mem: Mem::new_init_val(init),
            data_out: Reg::new(init),
            input: None,
        })
    }

    /// Create a RAM preloaded with `init`. The output register starts out
    /// holding word 0.
    pub fn new_init_array(init: &[D; SZ]) -> Result<Self, SimError> {
        Self::check_capacity()?;
        Ok(Self {
            mem: Mem::new_init_array(init),
            data_out: Reg::new(init[0]),
            input: None,
        })
    }

    fn check_capacity() -> Result<(), SimError> {
        if SZ == 0 {
            return Err(SimError::InvalidCapacity { capacity: SZ });
        }
        Ok(())
    }

    fn check_addr(addr: usize) -> Result<(), SimError> {
        if addr >= SZ {
            return Err(SimError::AddressOutOfRange { addr, size: SZ });
        }
        Ok(())
    }

    /// Drive the input signals for this cycle.
    ///
    /// An out-of-range address is rejected and nothing is driven.
    pub fn drive(&mut self, input: RamInput<D>) -> Result<(), SimError> {
        Self::check_addr(input.addr)?;
        self.input = Some(input);
        Ok(())
    }

    /// Sample the output register.
    pub fn data_out(&self) -> D { self.data_out.sample() }

    /// Inspect a word without going through the port (no clock edge).
    pub fn peek(&self, addr: usize) -> Result<D, SimError> {
        Self::check_addr(addr)?;
        Ok(self.mem.sample(addr))
    }

    /// Run one full cycle. Returns `None` on a write cycle, otherwise the
    /// word read from `addr`.
    pub fn read_or_write(&mut self, addr: usize, data_in: D, we: bool)
        -> Result<Option<D>, SimError>
    {
        self.drive(RamInput { addr, data_in, we })?;
        self.update();
        if we {
            Ok(None)
        } else {
            Ok(Some(self.data_out()))
        }
    }

    pub fn len(&self) -> usize { SZ }
    pub fn is_empty(&self) -> bool { SZ == 0 }
}
impl <D: Copy, const SZ: usize> Clocked for SyncRam<D, SZ> {
    fn update(&mut self) {
        if let Some(input) = self.input.take() {
            if input.we {
                self.mem.drive(input.addr, input.data_in);
            } else {
                self.data_out.drive(self.mem.sample(input.addr));
            }
        }
        self.mem.update();
        self.data_out.update();
    }
}
impl <D: Copy + fmt::LowerHex, const SZ: usize> fmt::Display for SyncRam<D, SZ> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ram[{}] dout={}", SZ, self.data_out)
    }
}
