
use crate::lle::Clocked;

/// Common interface for storage elements which have some notion of
/// "a capacity," and where storage elements can be "occupied" by data.
///
/// `CAP` indicates the capacity. Only [Storage::num_used] is provided by
/// implementors; the status flags are always derived from it, so they can
/// never disagree with the occupancy.
pub trait Storage<const CAP: usize>: Clocked {

    /// Returns the capacity of this object.
    fn capacity(&self) -> usize { CAP }

    /// Returns true when the object is full.
    fn is_full(&self) -> bool { self.num_used() == CAP }

    /// Returns true when the object is empty.
    fn is_empty(&self) -> bool { self.num_used() == 0 }

    /// Return the number of free storage elements.
    fn num_free(&self) -> usize { CAP - self.num_used() }

    /// Return the number of occupied storage elements.
    fn num_used(&self) -> usize;

}
