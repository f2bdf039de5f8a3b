//! Character display implementations

pub mod lcd1602;

pub use lcd1602::{Lcd1602, LCD_I2C_ADDR};
