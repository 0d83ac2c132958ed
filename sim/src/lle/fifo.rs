//! Bounded first-in first-out queue.
//!
//! [BoundedQueue] models a small synchronous FIFO: a circular buffer with
//! registered write/read pointers and an occupancy counter. Requests are
//! driven during a cycle and resolved at the following clock edge, where
//! the full/empty status observed *before* the edge decides whether each
//! request is accepted. The status flags are derived from the occupancy
//! (see [Storage]) and so always reflect the state after the last edge.
//!
//! A write while full and a read while empty are silently dropped; the
//! queue keeps a count of both for inspection but they are not errors.

use std::fmt;

use crate::error::SimError;
use crate::lle::*;
use crate::lle::mem::*;
use crate::lle::register::*;
use crate::lle::storage::*;


/// Input signals for one cycle of a [BoundedQueue].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FifoInput<T> {
    /// Write request, carrying the data to enqueue.
    pub write: Option<T>,
    /// Read request.
    pub read: bool,
    /// Synchronous reset. Takes priority over both requests.
    pub reset: bool,
}
impl <T> FifoInput<T> {
    pub fn idle() -> Self {
        Self { write: None, read: false, reset: false }
    }
    pub fn write(data: T) -> Self {
        Self { write: Some(data), read: false, reset: false }
    }
    pub fn read() -> Self {
        Self { write: None, read: true, reset: false }
    }
    pub fn write_read(data: T) -> Self {
        Self { write: Some(data), read: true, reset: false }
    }
    pub fn reset() -> Self {
        Self { write: None, read: false, reset: true }
    }
}
impl <T> Default for FifoInput<T> {
    fn default() -> Self {
        Self::idle()
    }
}

/// Fixed-capacity FIFO with `N` slots.
pub struct BoundedQueue<T: Copy, const N: usize> {
    /// Backing storage. A slot is [None] when it holds no unread element.
    storage: Mem<Option<T>, N>,
    wptr: Reg<usize>,
    rptr: Reg<usize>,
    /// Occupancy, in `0..=N`.
    count: Reg<usize>,
    /// Output register holding the most recently read element.
    dout: Reg<Option<T>>,

    input: Option<FifoInput<T>>,

    dropped_writes: usize,
    dropped_reads: usize,
}
impl <T: Copy, const N: usize> BoundedQueue<T, N> {
    /// Create an empty queue. Fails when `N` is zero.
    pub fn new() -> Result<Self, SimError> {
        if N == 0 {
            return Err(SimError::InvalidCapacity { capacity: N });
        }
        Ok(Self {
            storage: Mem::new_init_val(None),
            wptr: Reg::new(0),
            rptr: Reg::new(0),
            count: Reg::new(0),
            dout: Reg::new(None),
            input: None,
            dropped_writes: 0,
            dropped_reads: 0,
        })
    }

    /// Drive the input signals for this cycle (resolved at the next edge).
    pub fn drive(&mut self, input: FifoInput<T>) {
        self.input = Some(input);
    }

    /// Drive the given signals and simulate one clock edge.
    pub fn tick(&mut self, wr_en: bool, data_in: T, rd_en: bool, reset: bool) {
        self.drive(FifoInput {
            write: wr_en.then_some(data_in),
            read: rd_en,
            reset,
        });
        self.update();
    }

    /// Reset the queue to the empty state (one clock edge).
    pub fn reset(&mut self) {
        self.drive(FifoInput::reset());
        self.update();
    }

    /// The element returned by the most recent accepted read, or [None] if
    /// no read has been accepted since construction or the last reset.
    pub fn peek_last_output(&self) -> Option<T> {
        self.dout.sample()
    }

    /// The oldest unread element, without consuming it.
    pub fn front(&self) -> Option<T> {
        if self.is_empty() {
            None
        } else {
            self.storage.sample(self.rptr.sample())
        }
    }

    pub fn occupancy(&self) -> usize { self.count.sample() }
    pub fn write_index(&self) -> usize { self.wptr.sample() }
    pub fn read_index(&self) -> usize { self.rptr.sample() }

    /// Number of write requests rejected because the queue was full.
    pub fn dropped_writes(&self) -> usize { self.dropped_writes }
    /// Number of read requests rejected because the queue was empty.
    pub fn dropped_reads(&self) -> usize { self.dropped_reads }

    fn next_ptr(ptr: usize) -> usize {
        (ptr + 1) % N
    }

    /// Check the pointer/occupancy/storage relationship.
    ///
    /// Exactly the `count` slots starting at the read pointer are occupied,
    /// and the write pointer sits just past the last of them.
    pub fn is_consistent(&self) -> bool {
        let (wptr, rptr, count) = (self.wptr.sample(), self.rptr.sample(), self.count.sample());
        if count > N || wptr >= N || rptr >= N {
            return false;
        }
        if (rptr + count) % N != wptr {
            return false;
        }
        (0..N).all(|off| {
            let occupied = self.storage.sample((rptr + off) % N).is_some();
            occupied == (off < count)
        })
    }
}
impl <T: Copy, const N: usize> Clocked for BoundedQueue<T, N> {
    fn update(&mut self) {
        let input = match self.input.take() {
            Some(input) => input,
            None => return,
        };

        if input.reset {
            self.wptr.reset();
            self.rptr.reset();
            self.count.reset();
            self.dout.reset();
            for idx in 0..N {
                self.storage.drive(idx, None);
            }
        } else {
            // Both requests are judged against the state before this edge.
            let (full, empty) = (self.is_full(), self.is_empty());
            let wptr = self.wptr.sample();
            let rptr = self.rptr.sample();
            let mut count = self.count.sample();

            if let Some(data) = input.write {
                if full {
                    self.dropped_writes += 1;
                } else {
                    self.storage.drive(wptr, Some(data));
                    self.wptr.drive(Self::next_ptr(wptr));
                    count += 1;
                }
            }
            if input.read {
                if empty {
                    self.dropped_reads += 1;
                } else {
                    self.dout.drive(self.storage.sample(rptr));
                    self.storage.drive(rptr, None);
                    self.rptr.drive(Self::next_ptr(rptr));
                    count -= 1;
                }
            }
            self.count.drive(count);
        }

        self.storage.update();
        self.wptr.update();
        self.rptr.update();
        self.count.update();
        self.dout.update();
        debug_assert!(self.is_consistent());
    }
}
impl <T: Copy, const N: usize> Storage<N> for BoundedQueue<T, N> {
    fn num_used(&self) -> usize {
        self.count.sample()
    }
}
impl <T: Copy + fmt::LowerHex, const N: usize> fmt::Display for BoundedQueue<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fifo[{}] wptr={} rptr={} count={} full={} empty={} dout=",
            N, self.wptr.sample(), self.rptr.sample(), self.count.sample(),
            self.is_full() as u8, self.is_empty() as u8)?;
        match self.dout.sample() {
            Some(data) => write!(f, "{:#x}", data),
            None => write!(f, "--"),
        }
    }
}


#[cfg(test)]
mod test {
    use super::*;

    fn fill(q: &mut BoundedQueue<u8, 4>, vals: &[u8]) {
        for &v in vals {
            q.tick(true, v, false, false);
        }
    }

    #[test]
    fn fifo_zero_capacity() {
        assert_eq!(
            BoundedQueue::<u8, 0>::new().err(),
            Some(SimError::InvalidCapacity { capacity: 0 })
        );
    }

    #[test]
    fn fifo_initially_empty() {
        let q = BoundedQueue::<u8, 4>::new().unwrap();
        assert!(q.is_empty());
        assert!(!q.is_full());
        assert_eq!(q.capacity(), 4);
        assert_eq!(q.num_free(), 4);
        assert_eq!(q.peek_last_output(), None);
        assert_eq!(q.front(), None);
    }

    #[test]
    fn fifo_fill_then_drain() {
        let mut q = BoundedQueue::<u8, 4>::new().unwrap();
        q.reset();
        fill(&mut q, &[0x11, 0x22, 0x33, 0x44]);
        assert_eq!(q.occupancy(), 4);
        assert!(q.is_full());
        assert_eq!(q.write_index(), 0);

        let mut out = Vec::new();
        for _ in 0..4 {
            q.tick(false, 0, true, false);
            out.push(q.peek_last_output());
        }
        assert_eq!(out, vec![Some(0x11), Some(0x22), Some(0x33), Some(0x44)]);
        assert!(q.is_empty());
        assert_eq!(q.occupancy(), 0);
        assert_eq!(q.read_index(), 0);
    }

    #[test]
    fn fifo_write_while_full_dropped() {
        let mut q = BoundedQueue::<u8, 4>::new().unwrap();
        fill(&mut q, &[0x11, 0x22, 0x33, 0x44]);
        q.tick(true, 0x55, false, false);
        assert_eq!(q.occupancy(), 4);
        assert!(q.is_full());
        assert_eq!(q.write_index(), 0);
        assert_eq!(q.dropped_writes(), 1);
        assert_eq!(q.front(), Some(0x11));

        let mut out = Vec::new();
        for _ in 0..6 {
            q.tick(false, 0, true, false);
            out.push(q.peek_last_output());
        }
        assert!(!out.contains(&Some(0x55)));
        assert_eq!(out[3], Some(0x44));
        assert_eq!(q.dropped_reads(), 2);
    }

    #[test]
    fn fifo_read_while_empty_keeps_output() {
        let mut q = BoundedQueue::<u8, 4>::new().unwrap();
        q.tick(false, 0, true, false);
        assert_eq!(q.peek_last_output(), None);
        assert!(q.is_empty());

        q.tick(true, 0x7e, false, false);
        q.tick(false, 0, true, false);
        assert_eq!(q.peek_last_output(), Some(0x7e));
        q.tick(false, 0, true, false);
        assert_eq!(q.peek_last_output(), Some(0x7e));
        assert!(q.is_empty());
        assert_eq!(q.dropped_reads(), 2);
    }

    #[test]
    fn fifo_write_read_same_cycle() {
        let mut q = BoundedQueue::<u8, 4>::new().unwrap();
        fill(&mut q, &[1, 2]);
        q.drive(FifoInput::write_read(3));
        q.update();
        assert_eq!(q.occupancy(), 2);
        assert_eq!(q.peek_last_output(), Some(1));
        assert_eq!(q.front(), Some(2));
    }

    #[test]
    fn fifo_write_read_while_full() {
        let mut q = BoundedQueue::<u8, 4>::new().unwrap();
        fill(&mut q, &[1, 2, 3, 4]);
        // The read is accepted, the write is judged against the full queue.
        q.tick(true, 5, true, false);
        assert_eq!(q.peek_last_output(), Some(1));
        assert_eq!(q.occupancy(), 3);
        assert!(!q.is_full());
        assert_eq!(q.dropped_writes(), 1);
    }

    #[test]
    fn fifo_write_read_while_empty() {
        let mut q = BoundedQueue::<u8, 4>::new().unwrap();
        // The write is accepted, the read is judged against the empty queue.
        q.tick(true, 9, true, false);
        assert_eq!(q.peek_last_output(), None);
        assert_eq!(q.occupancy(), 1);
        assert_eq!(q.front(), Some(9));
    }

    #[test]
    fn fifo_reset_priority() {
        let mut q = BoundedQueue::<u8, 4>::new().unwrap();
        fill(&mut q, &[1, 2, 3]);
        q.tick(false, 0, true, false);
        q.tick(true, 4, true, true);
        assert!(q.is_empty());
        assert_eq!(q.occupancy(), 0);
        assert_eq!(q.write_index(), 0);
        assert_eq!(q.read_index(), 0);
        assert_eq!(q.peek_last_output(), None);
        assert_eq!(q.front(), None);

        q.reset();
        assert_eq!((q.occupancy(), q.write_index(), q.read_index()), (0, 0, 0));
    }

    #[test]
    fn fifo_wraparound() {
        let mut q = BoundedQueue::<u32, 3>::new().unwrap();
        let mut out = Vec::new();
        for v in 0..10u32 {
            q.tick(true, v, q.occupancy() == 2, false);
            if let Some(v) = q.peek_last_output() {
                out.push(v);
            }
            assert!(q.write_index() < 3 && q.read_index() < 3);
        }
        out.dedup();
        assert_eq!(out, (0..8).collect::<Vec<_>>());
    }

    #[test]
    fn fifo_capacity_one() {
        let mut q = BoundedQueue::<u8, 1>::new().unwrap();
        q.tick(true, 1, false, false);
        assert!(q.is_full() && !q.is_empty());
        q.tick(true, 2, false, false);
        q.tick(false, 0, true, false);
        assert!(q.is_empty() && !q.is_full());
        assert_eq!(q.peek_last_output(), Some(1));
    }

    #[test]
    fn fifo_idle_edge() {
        let mut q = BoundedQueue::<u8, 4>::new().unwrap();
        fill(&mut q, &[1]);
        q.update();
        q.drive(FifoInput::idle());
        q.update();
        assert_eq!(q.occupancy(), 1);
        assert_eq!(q.front(), Some(1));
    }

    #[test]
    fn fifo_clockedstate() {
        let mut d = ClockedState::new();
        let q = state_ref(BoundedQueue::<u8, 4>::new().unwrap());
        d.track(&q);

        q.borrow_mut().drive(FifoInput::write(0xab));
        assert!(q.borrow().is_empty());
        d.update();
        assert_eq!(q.borrow().occupancy(), 1);
        q.borrow_mut().drive(FifoInput::read());
        d.update();
        assert_eq!(
            format!("{}", q.borrow()),
            "fifo[4] wptr=1 rptr=1 count=0 full=0 empty=1 dout=0xab"
        );
    }
}
