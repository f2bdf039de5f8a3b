//! HD44780 1602 character LCD behind a PCF8574 I2C backpack
//!
//! The backpack maps its eight outputs to the LCD control lines and the
//! upper data nibble, so the controller runs in 4-bit mode and every byte
//! goes out as two nibbles, each latched by pulsing EN.
//!
//! Bus transfers and controller delays are awaited, so a full redraw
//! (about 20 ms at 100 kHz) never holds up other tasks.

use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::i2c::I2c;
use flapjack_display::{DisplayBackend, DisplayError, SCREEN_COLS, SCREEN_ROWS};

/// Default backpack address (A0-A2 open)
pub const LCD_I2C_ADDR: u8 = 0x27;

/// PCF8574 output bits
mod pin {
    pub const RS: u8 = 0x01;
    pub const EN: u8 = 0x04;
    pub const BACKLIGHT: u8 = 0x08;
}

/// HD44780 instructions
#[allow(dead_code)]
mod cmd {
    pub const CLEAR: u8 = 0x01;
    pub const HOME: u8 = 0x02;
    pub const ENTRY_MODE: u8 = 0x04;
    pub const ENTRY_INCREMENT: u8 = 0x02;
    pub const DISPLAY_CONTROL: u8 = 0x08;
    pub const DISPLAY_ON: u8 = 0x04;
    pub const FUNCTION_SET: u8 = 0x20;
    pub const TWO_LINES: u8 = 0x08;
    pub const SET_DDRAM: u8 = 0x80;
}

/// DDRAM address of the first column of each row
const ROW_OFFSETS: [u8; SCREEN_ROWS] = [0x00, 0x40];

/// 16x2 LCD driver
pub struct Lcd1602<I2C, D> {
    i2c: I2C,
    delay: D,
    address: u8,
    backlight: bool,
    initialized: bool,
}

impl<I2C, D> Lcd1602<I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    /// Create a driver; call [`Lcd1602::init`] before drawing
    pub fn new(i2c: I2C, delay: D, address: u8) -> Self {
        Self {
            i2c,
            delay,
            address,
            backlight: true,
            initialized: false,
        }
    }

    /// Run the power-on initialization sequence
    ///
    /// Forces 4-bit mode from any starting state, then configures two
    /// lines, display on without cursor, and left-to-right entry.
    pub async fn init(&mut self) -> Result<(), DisplayError> {
        self.initialized = false;
        self.delay.delay_ms(50).await;

        // Three times 8-bit mode, so a controller stuck mid-nibble resyncs
        self.write_nibble(0x03, false).await?;
        self.delay.delay_us(4500).await;
        self.write_nibble(0x03, false).await?;
        self.delay.delay_us(4500).await;
        self.write_nibble(0x03, false).await?;
        self.delay.delay_us(150).await;
        self.write_nibble(0x02, false).await?;

        self.command(cmd::FUNCTION_SET | cmd::TWO_LINES).await?;
        self.command(cmd::DISPLAY_CONTROL | cmd::DISPLAY_ON).await?;
        self.command(cmd::CLEAR).await?;
        self.delay.delay_ms(2).await;
        self.command(cmd::ENTRY_MODE | cmd::ENTRY_INCREMENT).await?;

        self.initialized = true;
        Ok(())
    }

    /// Switch the backlight
    pub async fn set_backlight(&mut self, on: bool) -> Result<(), DisplayError> {
        self.backlight = on;
        let level = self.backlight_bit();
        self.i2c
            .write(self.address, &[level])
            .await
            .map_err(|_| DisplayError::Communication)
    }

    /// Release the bus and delay
    pub fn release(self) -> (I2C, D) {
        (self.i2c, self.delay)
    }

    fn backlight_bit(&self) -> u8 {
        if self.backlight {
            pin::BACKLIGHT
        } else {
            0
        }
    }

    /// Put one nibble on D4-D7 and strobe EN
    async fn write_nibble(&mut self, nibble: u8, data: bool) -> Result<(), DisplayError> {
        let mut bits = (nibble << 4) | self.backlight_bit();
        if data {
            bits |= pin::RS;
        }
        // Both bytes in one transfer: EN high, then EN low latches the nibble
        self.i2c
            .write(self.address, &[bits | pin::EN, bits])
            .await
            .map_err(|_| DisplayError::Communication)
    }

    async fn send(&mut self, byte: u8, data: bool) -> Result<(), DisplayError> {
        self.write_nibble(byte >> 4, data).await?;
        self.write_nibble(byte & 0x0F, data).await?;
        // Execution time of most instructions
        self.delay.delay_us(40).await;
        Ok(())
    }

    async fn command(&mut self, instruction: u8) -> Result<(), DisplayError> {
        self.send(instruction, false).await
    }
}

impl<I2C, D> DisplayBackend for Lcd1602<I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    async fn clear(&mut self) -> Result<(), DisplayError> {
        if !self.initialized {
            return Err(DisplayError::NotInitialized);
        }
        self.command(cmd::CLEAR).await?;
        self.delay.delay_ms(2).await;
        Ok(())
    }

    async fn draw_text(&mut self, row: u8, col: u8, text: &str) -> Result<(), DisplayError> {
        if !self.initialized {
            return Err(DisplayError::NotInitialized);
        }
        if row as usize >= SCREEN_ROWS || col as usize >= SCREEN_COLS {
            return Err(DisplayError::InvalidCoordinates);
        }

        self.command(cmd::SET_DDRAM | (ROW_OFFSETS[row as usize] + col))
            .await?;
        for ch in text.chars().take(SCREEN_COLS - col as usize) {
            // The character ROM is ASCII in the printable range
            let code = if ch.is_ascii() && !ch.is_ascii_control() {
                ch as u8
            } else {
                b'?'
            };
            self.send(code, true).await?;
        }
        Ok(())
    }

    async fn flush(&mut self) -> Result<(), DisplayError> {
        // Writes go straight to DDRAM
        Ok(())
    }

    fn dimensions(&self) -> (u8, u8) {
        (SCREEN_COLS as u8, SCREEN_ROWS as u8)
    }

    fn is_ready(&self) -> bool {
        self.initialized
    }
}
