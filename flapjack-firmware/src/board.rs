//! Raspberry Pi Pico wiring
//!
//! Pin numbers here must match the `PIN_n` peripherals taken in `main`;
//! the const checks below fail the build if they drift apart. Electrical
//! details (pull-ups, polarity) are read from the map when the drivers are
//! built, so the map is the only place to change them.

use embassy_rp::gpio::{Input, Level, Output, Pin, Pull};
use embassy_rp::i2c::{Async, I2c};
use embassy_rp::peripherals::{I2C0, PIO0};
use embassy_rp::pio_programs::ws2812::PioWs2812;
use embassy_rp::Peri;
use embassy_time::Delay;
use flapjack_core::config::{AxisConfig, MachineConfig, PinConfig, PinMap, StepperPins};
use flapjack_core::CookCycle;
use flapjack_drivers::display::Lcd1602;
use flapjack_drivers::heater::GpioHeater;
use flapjack_drivers::input::GpioButton;
use flapjack_drivers::stepper::{NoStallGuard, StepDirAxis};

/// GPIO assignment on the Pico
pub const PINS: PinMap = PinMap {
    confirm: PinConfig::button(7),
    cancel: PinConfig::button(2),
    // WS2812 data
    led: PinConfig::new(6),
    griddle: PinConfig::new(8),
    conveyor: StepperPins::new(10, 11, 12),
    dispenser: StepperPins::new(13, 14, 15),
    cooling: StepperPins::new(16, 17, 18),
    // I2C0
    lcd_sda: PinConfig::new(20),
    lcd_scl: PinConfig::new(21),
};

const _: () = {
    assert!(PINS.confirm.pin == 7);
    assert!(PINS.cancel.pin == 2);
    assert!(PINS.led.pin == 6);
    assert!(PINS.griddle.pin == 8);
    assert!(PINS.conveyor.step.pin == 10);
    assert!(PINS.conveyor.dir.pin == 11);
    assert!(PINS.conveyor.enable.pin == 12);
    assert!(PINS.dispenser.step.pin == 13);
    assert!(PINS.dispenser.dir.pin == 14);
    assert!(PINS.dispenser.enable.pin == 15);
    assert!(PINS.cooling.step.pin == 16);
    assert!(PINS.cooling.dir.pin == 17);
    assert!(PINS.cooling.enable.pin == 18);
    assert!(PINS.lcd_sda.pin == 20);
    assert!(PINS.lcd_scl.pin == 21);
};

/// LCD backpack bus speed
pub const LCD_I2C_HZ: u32 = 100_000;

/// LEDs on the status strip
pub const LED_COUNT: usize = 8;

/// Machine configuration for this board
pub const fn machine_config() -> MachineConfig {
    let mut config = MachineConfig::new();
    config.pins = PINS;
    config
}

pub type Heater = GpioHeater<Output<'static>>;
pub type Axis = StepDirAxis<Output<'static>, Output<'static>, Output<'static>, NoStallGuard>;
pub type Button = GpioButton<Input<'static>>;
pub type Lcd = Lcd1602<I2c<'static, I2C0, Async>, Delay>;
pub type LedStrip = PioWs2812<'static, PIO0, 0, LED_COUNT>;
pub type Machine = CookCycle<Heater, Axis, Button>;

/// Push button with pull and polarity taken from its pin config
pub fn button(pin: Peri<'static, impl Pin>, cfg: PinConfig) -> Button {
    let pull = if cfg.pull_up { Pull::Up } else { Pull::None };
    let input = Input::new(pin, pull);
    if cfg.inverted {
        GpioButton::active_low(input)
    } else {
        GpioButton::active_high(input)
    }
}

/// Griddle relay, driven to its off level before the driver exists
pub fn heater(pin: Peri<'static, impl Pin>, cfg: PinConfig) -> Heater {
    GpioHeater::new(Output::new(pin, Level::from(cfg.inverted)), cfg.inverted)
}

/// Step/dir driver with its enable line de-energized
pub fn axis(
    step: Peri<'static, impl Pin>,
    dir: Peri<'static, impl Pin>,
    enable: Peri<'static, impl Pin>,
    pins: StepperPins,
    config: &AxisConfig,
) -> Axis {
    StepDirAxis::new(
        Output::new(step, Level::Low),
        Output::new(dir, Level::Low),
        Output::new(enable, Level::from(pins.enable.inverted)),
        NoStallGuard,
        config,
        pins.enable.inverted,
    )
}
