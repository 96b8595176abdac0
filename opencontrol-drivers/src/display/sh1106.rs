//! SH1106 OLED display driver
//!
//! Driver for 128x64 SH1106-based OLED displays over blocking I2C. Keeps a
//! page-organized frame buffer, renders text with the `embedded-graphics`
//! 5x8 mono font on a 6x8 cell (21 chars x 8 rows) and sends the buffer in
//! [`DisplayBackend::flush`].

use core::convert::Infallible;

use embedded_graphics::mono_font::ascii::FONT_5X8;
use embedded_graphics::mono_font::MonoTextStyleBuilder;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Baseline, Text};
use embedded_hal::i2c::I2c;
use opencontrol_view::{DisplayBackend, DisplayError};

/// Default SH1106 I2C address (0x3D on some modules)
pub const SH1106_ADDR: u8 = 0x3C;

/// Display dimensions
pub const WIDTH: usize = 128;
pub const HEIGHT: usize = 64;
const PAGES: usize = HEIGHT / 8;

/// Character cell size
const CELL_WIDTH: usize = 6;
const CELL_HEIGHT: usize = 8;

/// The 128 visible columns start at column 2 of the 132-column RAM
const COLUMN_OFFSET: u8 = 2;

/// Control bytes
const CONTROL_COMMAND: u8 = 0x00;
const CONTROL_DATA: u8 = 0x40;

/// SH1106 commands
mod cmd {
    pub const DISPLAY_OFF: u8 = 0xAE;
    pub const DISPLAY_ON: u8 = 0xAF;
    pub const SET_CONTRAST: u8 = 0x81;
    pub const SET_NORMAL: u8 = 0xA6;
    pub const SET_DISPLAY_OFFSET: u8 = 0xD3;
    pub const SET_COM_PINS: u8 = 0xDA;
    pub const SET_VCOM_DETECT: u8 = 0xDB;
    pub const SET_CLOCK_DIV: u8 = 0xD5;
    pub const SET_PRECHARGE: u8 = 0xD9;
    pub const SET_MUX_RATIO: u8 = 0xA8;
    pub const SET_LOW_COLUMN: u8 = 0x00;
    pub const SET_HIGH_COLUMN: u8 = 0x10;
    pub const SET_PAGE_ADDR: u8 = 0xB0;
    pub const SET_START_LINE: u8 = 0x40;
    pub const SET_SEG_REMAP: u8 = 0xA1;
    pub const SET_COM_SCAN_DEC: u8 = 0xC8;
    pub const SET_CHARGE_PUMP: u8 = 0x8D;
}

const INIT_SEQUENCE: &[u8] = &[
    cmd::DISPLAY_OFF,
    cmd::SET_CLOCK_DIV,
    0x80,
    cmd::SET_MUX_RATIO,
    0x3F, // 64 lines
    cmd::SET_DISPLAY_OFFSET,
    0x00,
    cmd::SET_START_LINE,
    cmd::SET_CHARGE_PUMP,
    0x14,
    cmd::SET_SEG_REMAP,
    cmd::SET_COM_SCAN_DEC,
    cmd::SET_COM_PINS,
    0x12,
    cmd::SET_CONTRAST,
    0xCF,
    cmd::SET_PRECHARGE,
    0xF1,
    cmd::SET_VCOM_DETECT,
    0x40,
    cmd::SET_NORMAL,
    cmd::DISPLAY_ON,
];

/// SH1106 OLED driver
pub struct Sh1106<I2C> {
    i2c: I2C,
    address: u8,
    /// Frame buffer, one byte per 8 vertical pixels
    buffer: [[u8; WIDTH]; PAGES],
    ready: bool,
}

impl<I2C: I2c> Sh1106<I2C> {
    pub fn new(i2c: I2C) -> Self {
        Self::with_address(i2c, SH1106_ADDR)
    }

    pub fn with_address(i2c: I2C, address: u8) -> Self {
        Self {
            i2c,
            address,
            buffer: [[0; WIDTH]; PAGES],
            ready: false,
        }
    }

    /// Run the power-up sequence and blank the panel
    pub fn init(&mut self) -> Result<(), DisplayError> {
        for &c in INIT_SEQUENCE {
            self.command(c)?;
        }
        self.ready = true;
        DisplayBackend::clear(self)?;
        self.flush()
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Set display contrast (0-255)
    pub fn set_contrast(&mut self, contrast: u8) -> Result<(), DisplayError> {
        self.command(cmd::SET_CONTRAST)?;
        self.command(contrast)
    }

    /// Turn the panel on or off; the frame buffer is kept
    pub fn set_display_on(&mut self, on: bool) -> Result<(), DisplayError> {
        self.command(if on { cmd::DISPLAY_ON } else { cmd::DISPLAY_OFF })
    }

    /// Give the bus back
    pub fn release(self) -> I2C {
        self.i2c
    }

    fn command(&mut self, c: u8) -> Result<(), DisplayError> {
        self.i2c
            .write(self.address, &[CONTROL_COMMAND, c])
            .map_err(|_| DisplayError::Communication)
    }

    fn set_pixel(&mut self, x: usize, y: usize, on: bool) {
        if x >= WIDTH || y >= HEIGHT {
            return;
        }
        let bit = 1 << (y % 8);
        let cell = &mut self.buffer[y / 8][x];
        if on {
            *cell |= bit;
        } else {
            *cell &= !bit;
        }
    }
}

impl<I2C> OriginDimensions for Sh1106<I2C> {
    fn size(&self) -> Size {
        Size::new(WIDTH as u32, HEIGHT as u32)
    }
}

impl<I2C: I2c> DrawTarget for Sh1106<I2C> {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<It>(&mut self, pixels: It) -> Result<(), Self::Error>
    where
        It: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if let (Ok(x), Ok(y)) = (usize::try_from(point.x), usize::try_from(point.y)) {
                self.set_pixel(x, y, color.is_on());
            }
        }
        Ok(())
    }
}

impl<I2C: I2c> DisplayBackend for Sh1106<I2C> {
    fn clear(&mut self) -> Result<(), DisplayError> {
        for page in self.buffer.iter_mut() {
            page.fill(0);
        }
        Ok(())
    }

    fn draw_text(&mut self, row: u8, col: u8, text: &str) -> Result<(), DisplayError> {
        if row as usize >= PAGES {
            return Err(DisplayError::InvalidCoordinates);
        }

        let style = MonoTextStyleBuilder::new()
            .font(&FONT_5X8)
            .text_color(BinaryColor::On)
            .background_color(BinaryColor::Off)
            .build();
        let origin = Point::new(
            (col as usize * CELL_WIDTH) as i32,
            (row as usize * CELL_HEIGHT) as i32,
        );

        Text::with_baseline(text, origin, style, Baseline::Top)
            .draw(self)
            .map_err(|e: Infallible| -> DisplayError { match e {} })?;
        Ok(())
    }

    fn invert_region(&mut self, row: u8, start_col: u8, end_col: u8) -> Result<(), DisplayError> {
        let page = self
            .buffer
            .get_mut(row as usize)
            .ok_or(DisplayError::InvalidCoordinates)?;
        let start = (start_col as usize * CELL_WIDTH).min(WIDTH);
        let end = (end_col as usize * CELL_WIDTH).min(WIDTH);

        for byte in page.iter_mut().take(end).skip(start) {
            *byte ^= 0xFF;
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<(), DisplayError> {
        if !self.ready {
            return Err(DisplayError::NotInitialized);
        }

        for page in 0..PAGES {
            self.command(cmd::SET_PAGE_ADDR | page as u8)?;
            self.command(cmd::SET_LOW_COLUMN | (COLUMN_OFFSET & 0x0F))?;
            self.command(cmd::SET_HIGH_COLUMN | (COLUMN_OFFSET >> 4))?;

            let mut data = [0u8; WIDTH + 1];
            data[0] = CONTROL_DATA;
            data[1..].copy_from_slice(&self.buffer[page]);
            self.i2c
                .write(self.address, &data)
                .map_err(|_| DisplayError::Communication)?;
        }
        Ok(())
    }

    fn dimensions(&self) -> (u8, u8) {
        ((WIDTH / CELL_WIDTH) as u8, PAGES as u8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::i2c::{ErrorKind, ErrorType, Operation};
    use heapless::Vec;

    /// Bus recording every write
    struct MockI2c {
        writes: Vec<Vec<u8, { WIDTH + 1 }>, 64>,
        fail: bool,
    }

    impl MockI2c {
        fn new() -> Self {
            Self {
                writes: Vec::new(),
                fail: false,
            }
        }
    }

    impl ErrorType for MockI2c {
        type Error = ErrorKind;
    }

    impl I2c for MockI2c {
        fn transaction(
            &mut self,
            address: u8,
            operations: &mut [Operation<'_>],
        ) -> Result<(), Self::Error> {
            assert_eq!(address, SH1106_ADDR);
            if self.fail {
                return Err(ErrorKind::Other);
            }
            for op in operations {
                match op {
                    Operation::Write(bytes) => {
                        let mut write = Vec::new();
                        write.extend_from_slice(bytes).unwrap();
                        // Keep only the latest writes
                        if self.writes.is_full() {
                            self.writes.remove(0);
                        }
                        self.writes.push(write).unwrap();
                    }
                    Operation::Read(buf) => buf.fill(0),
                }
            }
            Ok(())
        }
    }

    fn display() -> Sh1106<MockI2c> {
        let mut display = Sh1106::new(MockI2c::new());
        display.init().unwrap();
        display.i2c.writes.clear();
        display
    }

    #[test]
    fn test_init_sends_sequence() {
        let mut display = Sh1106::new(MockI2c::new());
        display.init().unwrap();
        assert!(display.is_ready());

        let first = &display.i2c.writes[0];
        assert_eq!(first.as_slice(), &[CONTROL_COMMAND, cmd::DISPLAY_OFF]);
        let last_cmd = &display.i2c.writes[INIT_SEQUENCE.len() - 1];
        assert_eq!(last_cmd.as_slice(), &[CONTROL_COMMAND, cmd::DISPLAY_ON]);
    }

    #[test]
    fn test_init_blanks_then_text_reaches_panel() {
        let mut display = Sh1106::new(MockI2c::new());
        // Stale frame from before power-up
        display.draw_text(0, 0, "old").unwrap();
        display.init().unwrap();
        assert!(display.buffer.iter().flatten().all(|&b| b == 0));

        display.i2c.writes.clear();
        display.draw_text(1, 0, "Enc 1").unwrap();
        display.flush().unwrap();

        let writes = &display.i2c.writes;
        let page0 = &writes[3];
        let page1 = &writes[4 + 3];
        assert_eq!(page0[0], CONTROL_DATA);
        assert!(page0[1..].iter().all(|&b| b == 0));
        assert_eq!(page1[0], CONTROL_DATA);
        assert!(page1[1..].iter().any(|&b| b != 0));
    }

    #[test]
    fn test_init_failure() {
        let mut i2c = MockI2c::new();
        i2c.fail = true;
        let mut display = Sh1106::new(i2c);
        assert_eq!(display.init(), Err(DisplayError::Communication));
        assert!(!display.is_ready());
    }

    #[test]
    fn test_flush_before_init() {
        let mut display = Sh1106::new(MockI2c::new());
        assert_eq!(display.flush(), Err(DisplayError::NotInitialized));
    }

    #[test]
    fn test_draw_text_sets_pixels_in_cell() {
        let mut display = display();
        display.draw_text(2, 1, "A").unwrap();

        let page = &display.buffer[2];
        assert!(page[CELL_WIDTH..2 * CELL_WIDTH].iter().any(|&b| b != 0));
        assert!(page[..CELL_WIDTH].iter().all(|&b| b == 0));
        assert!(display.buffer[1].iter().all(|&b| b == 0));
        assert!(display.buffer[3].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_draw_text_clips_long_lines() {
        let mut display = display();
        display
            .draw_text(0, 20, "this runs off the edge")
            .unwrap();
        assert!(display.buffer[0][120..].iter().any(|&b| b != 0));
    }

    #[test]
    fn test_draw_text_bad_row() {
        let mut display = display();
        assert_eq!(
            display.draw_text(8, 0, "x"),
            Err(DisplayError::InvalidCoordinates)
        );
    }

    #[test]
    fn test_invert_region() {
        let mut display = display();
        display.invert_region(0, 1, 3).unwrap();

        let page = &display.buffer[0];
        assert!(page[..6].iter().all(|&b| b == 0));
        assert!(page[6..18].iter().all(|&b| b == 0xFF));
        assert!(page[18..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_flush_addresses_each_page() {
        let mut display = display();
        display.buffer[3][0] = 0xAA;
        display.flush().unwrap();

        let writes = &display.i2c.writes;
        assert_eq!(writes.len(), PAGES * 4);

        let page3 = &writes[3 * 4..3 * 4 + 4];
        assert_eq!(page3[0].as_slice(), &[CONTROL_COMMAND, 0xB3]);
        assert_eq!(page3[1].as_slice(), &[CONTROL_COMMAND, 0x02]);
        assert_eq!(page3[2].as_slice(), &[CONTROL_COMMAND, 0x10]);
        assert_eq!(page3[3].len(), WIDTH + 1);
        assert_eq!(page3[3][0], CONTROL_DATA);
        assert_eq!(page3[3][1], 0xAA);
    }

    #[test]
    fn test_dimensions() {
        let display = display();
        assert_eq!(display.dimensions(), (21, 8));
        assert_eq!(display.size(), Size::new(128, 64));
    }
}
