//! Testbenches for the three memory primitives.
//!
//! Each bench clocks its device through a [ClockedState], prints the state
//! after every edge and compares what it observes against the expected
//! value for that cycle.

use std::fmt::Debug;

use sim::lle::*;
use sim::lle::fifo::*;
use sim::lle::mem::*;
use sim::lle::rom::*;
use sim::lle::storage::*;
use sim::SimError;

use crate::error::LabError;

pub const FIFO_DEPTH: usize = 4;
pub const RAM_SIZE: usize = 16;
pub const ROM_SIZE: usize = 16;

/// Contents of the lab ROM.
pub const ROM_IMAGE: [u8; ROM_SIZE] = [
    0x00, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77,
    0x88, 0x99, 0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff,
];

fn check<T: PartialEq + Debug>(bench: &'static str, cycle: usize, expected: T, observed: T)
    -> Result<(), LabError>
{
    if expected == observed {
        Ok(())
    } else {
        Err(LabError::Mismatch {
            bench,
            cycle,
            expected: format!("{:x?}", expected),
            observed: format!("{:x?}", observed),
        })
    }
}

fn banner(bench: &str, cycle: usize) {
    println!("================= {} cycle {} ==============", bench, cycle);
}

pub fn fifo_bench() -> Result<(), LabError> {
    let mut d = ClockedState::new();
    let fifo = state_ref(BoundedQueue::<u8, FIFO_DEPTH>::new()?);
    d.track(&fifo);

    // (stimulus, expected occupancy, expected last output)
    let steps: [(FifoInput<u8>, usize, Option<u8>); 12] = [
        (FifoInput::reset(),           0, None),
        (FifoInput::write(0x11),       1, None),
        (FifoInput::write(0x22),       2, None),
        (FifoInput::write(0x33),       3, None),
        (FifoInput::write(0x44),       4, None),
        // Full: dropped.
        (FifoInput::write(0x55),       4, None),
        (FifoInput::read(),            3, Some(0x11)),
        (FifoInput::read(),            2, Some(0x22)),
        (FifoInput::write_read(0x66),  2, Some(0x33)),
        (FifoInput::read(),            1, Some(0x44)),
        (FifoInput::read(),            0, Some(0x66)),
        // Empty: dropped, output holds.
        (FifoInput::read(),            0, Some(0x66)),
    ];

    for (input, occupancy, dout) in steps {
        let cycle = d.cycle();
        fifo.borrow_mut().drive(input);
        d.update();

        let q = fifo.borrow();
        banner("fifo", cycle);
        println!("{:x?}", input);
        println!("{}", q);
        check("fifo", cycle, occupancy, q.occupancy())?;
        check("fifo", cycle, occupancy == FIFO_DEPTH, q.is_full())?;
        check("fifo", cycle, occupancy == 0, q.is_empty())?;
        check("fifo", cycle, dout, q.peek_last_output())?;
    }

    let q = fifo.borrow();
    println!("fifo: dropped {} write(s), {} read(s)", q.dropped_writes(), q.dropped_reads());
    check("fifo", d.cycle(), (1, 1), (q.dropped_writes(), q.dropped_reads()))
}

pub fn ram_bench() -> Result<(), LabError> {
    let mut d = ClockedState::new();
    let ram = state_ref(SyncRam::<u8, RAM_SIZE>::new_init_val(0)?);
    d.track(&ram);

    let pattern = |addr: usize| (addr as u8).wrapping_mul(0x11) ^ 0x5a;

    for addr in 0..RAM_SIZE {
        let cycle = d.cycle();
        let before = ram.borrow().data_out();
        ram.borrow_mut().drive(RamInput { addr, data_in: pattern(addr), we: true })?;
        d.update();

        banner("ram", cycle);
        println!("write [{:#x}] <- {:#x}", addr, pattern(addr));
        println!("{}", ram.borrow());
        // No read result on a write cycle.
        check("ram", cycle, before, ram.borrow().data_out())?;
    }

    for addr in (0..RAM_SIZE).rev() {
        let cycle = d.cycle();
        ram.borrow_mut().drive(RamInput { addr, data_in: 0, we: false })?;
        d.update();

        banner("ram", cycle);
        println!("read [{:#x}]", addr);
        println!("{}", ram.borrow());
        check("ram", cycle, pattern(addr), ram.borrow().data_out())?;
    }

    let err = ram.borrow_mut().drive(RamInput { addr: RAM_SIZE, data_in: 0, we: true });
    check("ram", d.cycle(), Err(SimError::AddressOutOfRange { addr: RAM_SIZE, size: RAM_SIZE }), err)
}

pub fn rom_bench() -> Result<(), LabError> {
    let rom = Rom::<u8, ROM_SIZE>::new_init_array(ROM_IMAGE)?;

    for (addr, expected) in ROM_IMAGE.iter().enumerate() {
        let data = rom.read(addr)?;
        println!("rom [{:#x}] -> {:#x}", addr, data);
        check("rom", addr, *expected, data)?;
    }
    check("rom", ROM_SIZE, Err(SimError::AddressOutOfRange { addr: ROM_SIZE, size: ROM_SIZE }),
        rom.read(ROM_SIZE))
}


#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn fifo_bench_passes() {
        fifo_bench().unwrap();
    }

    #[test]
    fn ram_bench_passes() {
        ram_bench().unwrap();
    }

    #[test]
    fn rom_bench_passes() {
        rom_bench().unwrap();
    }

    #[test]
    fn check_reports_mismatch() {
        match check("fifo", 3, 1usize, 2usize) {
            Err(LabError::Mismatch { bench, cycle, expected, observed }) => {
                assert_eq!((bench, cycle), ("fifo", 3));
                assert_eq!((expected.as_str(), observed.as_str()), ("1", "2"));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
