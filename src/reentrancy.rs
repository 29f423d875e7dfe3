//! Debug-only reentrancy detection.
//!
//! The table runs user `Hash`/`Eq` code while its internals can be
//! transiently inconsistent (mid-growth, mid-sweep). If that user code
//! finds a way back into the same table, debug builds panic at the
//! door instead of corrupting state; release builds carry no flag and
//! no check.

use core::cell::Cell;
use core::marker::PhantomData;

/// Per-table entry flag. Public entry points open a frame with
/// `let _frame = self.reentrancy.enter();` and hold it for the whole
/// call.
#[derive(Debug)]
pub(crate) struct Reentrancy {
    #[cfg(debug_assertions)]
    entered: Cell<bool>,
    // !Send + !Sync, matching the single-threaded table.
    _single_thread: PhantomData<*mut ()>,
}

impl Reentrancy {
    pub(crate) const fn new() -> Self {
        Self {
            #[cfg(debug_assertions)]
            entered: Cell::new(false),
            _single_thread: PhantomData,
        }
    }

    /// Open a call frame. Panics in debug builds if a frame is already
    /// open on this table.
    #[inline]
    pub(crate) fn enter(&self) -> Frame<'_> {
        #[cfg(debug_assertions)]
        {
            assert!(
                !self.entered.replace(true),
                "reentrant call into ProbeHashMap from user Hash/Eq code"
            );
            return Frame { flag: self };
        }

        #[cfg(not(debug_assertions))]
        {
            return Frame {
                _life: PhantomData,
            };
        }
    }
}

/// RAII frame closing the flag on drop.
pub(crate) struct Frame<'a> {
    #[cfg(debug_assertions)]
    flag: &'a Reentrancy,
    #[cfg(not(debug_assertions))]
    _life: PhantomData<&'a ()>,
}

impl Drop for Frame<'_> {
    fn drop(&mut self) {
        #[cfg(debug_assertions)]
        self.flag.entered.set(false);
    }
}
