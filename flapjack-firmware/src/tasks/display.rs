//! Display task
//!
//! Renders the latest status snapshot to the LCD and the LED strip every
//! refresh period. Bus transfers are async, so the control task keeps
//! running while a frame is on the wire.

use defmt::*;
use embassy_time::{Duration, Ticker};
use flapjack_core::StatusView;
use flapjack_display::{DisplayBackend, DisplayError, Rgb, StatusIndicator, StatusRenderer};
use smart_leds::RGB8;

use crate::board::{Lcd, LedStrip, LED_COUNT};
use crate::channels::STATUS_VIEW;

/// Time between display refreshes
pub const DISPLAY_REFRESH_MS: u64 = 50;

/// Delay before re-initializing an LCD that stopped answering
pub const DISPLAY_RETRY_MS: u32 = 2_000;

/// Display task - owns the LCD and the LED strip
#[embassy_executor::task]
pub async fn display_task(
    mut lcd: Lcd,
    mut renderer: StatusRenderer,
    mut leds: LedStrip,
    indicator: StatusIndicator,
) {
    info!("Display task started");

    let mut ticker = Ticker::every(Duration::from_millis(DISPLAY_REFRESH_MS));
    let mut link = DisplayLink::new(lcd.is_ready());
    let (mut view, mut now_ms) = (StatusView::idle(), 0u32);

    loop {
        ticker.next().await;

        if let Some((latest, at_ms)) = STATUS_VIEW.try_take() {
            view = latest;
            now_ms = at_ms;
        }

        renderer.update(&view, now_ms);
        link.refresh(&mut lcd, &mut renderer, now_ms).await;

        let frame: [Rgb; LED_COUNT] = indicator.frame(&view, now_ms);
        leds.write(&frame.map(|c| RGB8::new(c.r, c.g, c.b))).await;
    }
}

/// LCD health tracking
///
/// A dead display never stops the machine; it is retried in the background
/// and the full screen is redrawn once it answers again.
struct DisplayLink {
    healthy: bool,
    failed_at_ms: u32,
}

impl DisplayLink {
    fn new(ready: bool) -> Self {
        Self {
            healthy: ready,
            failed_at_ms: 0,
        }
    }

    async fn refresh(&mut self, lcd: &mut Lcd, renderer: &mut StatusRenderer, now_ms: u32) {
        if !self.healthy {
            if now_ms.wrapping_sub(self.failed_at_ms) < DISPLAY_RETRY_MS {
                return;
            }
            if let Err(e) = lcd.init().await {
                self.failed_at_ms = now_ms;
                debug!("LCD still unavailable: {}", e);
                return;
            }
            info!("LCD recovered");
            self.healthy = true;
            renderer.invalidate();
        }

        if let Err(e) = renderer.render_to(lcd).await {
            self.fail(e, now_ms);
        }
    }

    fn fail(&mut self, error: DisplayError, now_ms: u32) {
        warn!("LCD write failed: {}", error);
        self.healthy = false;
        self.failed_at_ms = now_ms;
    }
}
