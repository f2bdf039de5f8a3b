//! Control loop task
//!
//! Step pulses every poll, then buttons, safety and the cook cycle once
//! per millisecond. Nothing inside an iteration waits; the only await is
//! the ticker between iterations. Display I/O lives in its own task so a
//! slow bus never delays a step pulse.

use defmt::*;
use embassy_time::{Duration, Instant, Ticker};
use flapjack_core::Status;

use crate::board::Machine;
use crate::channels::STATUS_VIEW;

/// Motion poll period; step pulse width is one period
pub const MOTION_POLL_US: u64 = 50;

/// Control task - owns the machine for the life of the firmware
#[embassy_executor::task]
pub async fn control_task(mut machine: Machine) {
    info!("Control loop started");

    let mut ticker = Ticker::every(Duration::from_micros(MOTION_POLL_US));
    let start = Instant::now();

    let mut last_ms: Option<u32> = None;

    loop {
        ticker.next().await;

        let now_us = start.elapsed().as_micros();
        machine.poll_motion(now_us);

        let now_ms = (now_us / 1000) as u32;
        if last_ms == Some(now_ms) {
            continue;
        }
        last_ms = Some(now_ms);

        if let Some(event) = machine.tick(now_ms) {
            debug!("Event {} -> {}", event, machine.status());
            if machine.status() == Status::Empty {
                debug!("Completed cycles: {}", machine.completed_cycles());
            }
        }

        STATUS_VIEW.signal((machine.view(now_ms), now_ms));
    }
}
