//! Inter-task communication
//!
//! The control task owns the machine; everything else sees it only
//! through the snapshots published here.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;

use flapjack_core::StatusView;

/// Latest status snapshot and the control clock it was taken at (ms)
///
/// Overwritten every control tick; the display task only ever needs the
/// newest value.
pub static STATUS_VIEW: Signal<CriticalSectionRawMutex, (StatusView, u32)> = Signal::new();
