//! Bulk pixel transfers and completion signalling
//!
//! At most one bulk transfer is outstanding at a time. The
//! [`CompletionFlag`] is the only state shared between the draw code and the
//! transfer hardware:
//!
//! - the [`TransferEngine`] clears it immediately before starting a transfer;
//! - the completion interrupt sets it through [`CompletionFlag::signal`].
//!
//! [`TransferEngine::begin`] hands out an [`InFlight`] guard that keeps the
//! engine, the interface and the source bytes borrowed until the transfer
//! has been waited for, so a chunk can neither be rewritten nor followed by
//! another command while the hardware is still reading it.
//!
//! ## Example
//!
//! ```rust,ignore
//! static TX_DONE: CompletionFlag = CompletionFlag::new();
//!
//! #[interrupt]
//! fn DMA2_STREAM1() {
//!     // acknowledge the DMA interrupt, then:
//!     TX_DONE.signal();
//! }
//!
//! let mut display = Display::new(interface, config, &TX_DONE);
//! ```

use core::sync::atomic::{AtomicBool, Ordering};

use crate::error::TransferError;
use crate::interface::{DisplayInterface, TransferStatus};

/// Single-slot "transfer finished" flag
///
/// `true` means no transfer is pending. Place it in a `static` so that the
/// completion interrupt can reach it.
#[derive(Debug)]
pub struct CompletionFlag {
    idle: AtomicBool,
}

impl CompletionFlag {
    /// Create an idle flag
    pub const fn new() -> Self {
        Self {
            idle: AtomicBool::new(true),
        }
    }

    /// Report that the outstanding transfer has finished
    ///
    /// Safe to call from an interrupt handler.
    pub fn signal(&self) {
        self.idle.store(true, Ordering::Release);
    }

    /// Whether no transfer is pending
    pub fn is_idle(&self) -> bool {
        self.idle.load(Ordering::Acquire)
    }

    fn arm(&self) {
        self.idle.store(false, Ordering::Release);
    }
}

impl Default for CompletionFlag {
    fn default() -> Self {
        Self::new()
    }
}

/// Poll `flag` until idle or until `spin_limit` polls have failed
///
/// A limit of 0 never gives up.
fn spin_until_idle(flag: &CompletionFlag, spin_limit: u32) -> Result<(), TransferError> {
    let mut spins = 0u32;
    while !flag.is_idle() {
        if spin_limit > 0 && spins >= spin_limit {
            log::warn!("transfer still pending after {spins} polls");
            return Err(TransferError::Timeout { spins });
        }
        spins = spins.saturating_add(1);
        core::hint::spin_loop();
    }
    Ok(())
}

/// Starts bulk transfers and waits for their completion
#[derive(Debug)]
pub struct TransferEngine<'f> {
    flag: &'f CompletionFlag,
    spin_limit: u32,
}

impl<'f> TransferEngine<'f> {
    /// Create an engine reporting through `flag`
    ///
    /// `spin_limit` bounds every wait; 0 waits forever.
    pub fn new(flag: &'f CompletionFlag, spin_limit: u32) -> Self {
        Self { flag, spin_limit }
    }

    /// The completion flag this engine waits on
    pub fn flag(&self) -> &'f CompletionFlag {
        self.flag
    }

    /// Configured spin limit
    pub fn spin_limit(&self) -> u32 {
        self.spin_limit
    }

    /// Start sending `data` as one bulk transfer
    ///
    /// # Errors
    ///
    /// Returns [`BeginError::Transfer`] with [`TransferError::Pending`] if an
    /// earlier transfer has not completed, and [`BeginError::Interface`] if
    /// the interface refused to start. In both cases the flag is left the
    /// way the earlier transfer left it.
    pub fn begin<'t, I: DisplayInterface>(
        &'t mut self,
        interface: &'t mut I,
        data: &'t [u8],
    ) -> Result<InFlight<'t>, BeginError<I::Error>> {
        if !self.flag.is_idle() {
            log::warn!("transfer requested while previous transfer is pending");
            return Err(BeginError::Transfer(TransferError::Pending));
        }

        log::trace!("bulk transfer of {} bytes", data.len());
        self.flag.arm();
        match interface.start_transfer(data) {
            Ok(TransferStatus::Complete) => self.flag.signal(),
            Ok(TransferStatus::Pending) => {}
            Err(e) => {
                self.flag.signal();
                return Err(BeginError::Interface(e));
            }
        }

        Ok(InFlight {
            flag: self.flag,
            spin_limit: self.spin_limit,
            settled: false,
        })
    }

    /// Start a transfer and wait for it to finish
    ///
    /// # Errors
    ///
    /// See [`begin`](Self::begin) and [`InFlight::wait`].
    pub fn send<I: DisplayInterface>(
        &mut self,
        interface: &mut I,
        data: &[u8],
    ) -> Result<(), BeginError<I::Error>> {
        self.begin(interface, data)?
            .wait()
            .map_err(BeginError::Transfer)
    }
}

/// Why a transfer could not be started or finished
#[derive(Debug)]
pub enum BeginError<E> {
    /// The interface failed to start the transfer
    Interface(E),
    /// The completion flag was not idle, or the wait timed out
    Transfer(TransferError),
}

/// A transfer that has been started but not yet waited for
///
/// Dropping the guard without calling [`wait`](Self::wait) still waits,
/// discarding a timeout.
#[must_use = "a transfer in flight must be waited for"]
#[derive(Debug)]
pub struct InFlight<'t> {
    flag: &'t CompletionFlag,
    spin_limit: u32,
    settled: bool,
}

impl InFlight<'_> {
    /// Busy-wait until the completion flag is set
    ///
    /// # Errors
    ///
    /// Returns [`TransferError::Timeout`] if the flag stays clear for more
    /// than the engine's spin limit. The flag stays clear, so the next
    /// [`TransferEngine::begin`] reports [`TransferError::Pending`] until
    /// the notification finally arrives.
    pub fn wait(mut self) -> Result<(), TransferError> {
        self.settled = true;
        spin_until_idle(self.flag, self.spin_limit)
    }

    /// Whether the transfer has already finished
    pub fn is_complete(&self) -> bool {
        self.flag.is_idle()
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.settled {
            let _ = spin_until_idle(self.flag, self.spin_limit);
        }
    }
}
