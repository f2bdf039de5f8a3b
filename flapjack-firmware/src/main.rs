//! Flapjack - Pancake Maker Firmware
//!
//! Main firmware binary for RP2040 boards. Wires the GPIO drivers into the
//! cook cycle, then splits the work between a control task that owns the
//! machine and a display task that owns the LCD and the LED strip.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::i2c::{self, I2c};
use embassy_rp::peripherals::{I2C0, PIO0};
use embassy_rp::pio::{self, Pio};
use embassy_rp::pio_programs::ws2812::{PioWs2812, PioWs2812Program};
use embassy_time::Delay;
use {defmt_rtt as _, panic_probe as _};

use flapjack_core::config::MachineConfig;
use flapjack_core::cycle::Axes;
use flapjack_core::CookCycle;
use flapjack_display::{StatusIndicator, StatusRenderer};
use flapjack_drivers::display::{Lcd1602, LCD_I2C_ADDR};

mod board;
mod channels;
mod tasks;

bind_interrupts!(struct Irqs {
    I2C0_IRQ => i2c::InterruptHandler<I2C0>;
    PIO0_IRQ_0 => pio::InterruptHandler<PIO0>;
});

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Flapjack firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config: MachineConfig = board::machine_config();
    info!(
        "Timing: heatup={}ms cook={}ms kill={}ms",
        config.timing.heatup_ms, config.timing.cook_time_ms, config.timing.kill_timeout_ms
    );

    let pins = &config.pins;
    let heater = board::heater(p.PIN_8, pins.griddle);

    let conveyor = board::axis(p.PIN_10, p.PIN_11, p.PIN_12, pins.conveyor, &config.conveyor);
    let dispenser = board::axis(p.PIN_13, p.PIN_14, p.PIN_15, pins.dispenser, &config.dispenser);
    let cooling = board::axis(p.PIN_16, p.PIN_17, p.PIN_18, pins.cooling, &config.cooling);
    info!("Steppers initialized");

    let confirm = board::button(p.PIN_7, pins.confirm);
    let cancel = board::button(p.PIN_2, pins.cancel);

    let machine = match CookCycle::new(
        config,
        heater,
        Axes::new(conveyor, dispenser, cooling),
        confirm,
        cancel,
    ) {
        Ok(machine) => machine,
        Err(e) => {
            // Drivers were dropped; the relay pin floats back to off
            error!("Invalid machine configuration: {}", e);
            loop {
                embassy_time::Timer::after_secs(60).await;
            }
        }
    };
    info!("Cook cycle ready");

    // LCD1602 on I2C0 (SDA=GPIO20, SCL=GPIO21)
    let mut i2c_config = i2c::Config::default();
    i2c_config.frequency = board::LCD_I2C_HZ;
    let i2c = I2c::new_async(p.I2C0, p.PIN_21, p.PIN_20, Irqs, i2c_config);
    let mut lcd = Lcd1602::new(i2c, Delay, LCD_I2C_ADDR);
    match lcd.init().await {
        Ok(()) => info!("LCD initialized"),
        Err(e) => warn!("LCD init failed: {}, running without display", e),
    }

    // WS2812 status strip on PIO0 (DATA=GPIO6)
    let Pio {
        mut common, sm0, ..
    } = Pio::new(p.PIO0, Irqs);
    let program = PioWs2812Program::new(&mut common);
    let leds = PioWs2812::new(&mut common, sm0, p.DMA_CH0, p.PIN_6, &program);
    info!("LED strip initialized ({} LEDs)", board::LED_COUNT);

    let renderer = StatusRenderer::new(&config.timing);
    let indicator = StatusIndicator::new(&config.timing);

    spawner.spawn(tasks::control_task(machine)).unwrap();
    spawner
        .spawn(tasks::display_task(lcd, renderer, leds, indicator))
        .unwrap();

    info!("All tasks spawned, firmware running");
}
