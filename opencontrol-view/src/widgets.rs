//! Row widgets
//!
//! Each widget renders into one screen row:
//!
//! ```text
//! Enc 1 [####    ]  50%
//! Btn 1 [*]
//! ```

use core::fmt::Write;

use heapless::String;
use opencontrol_core::NormalizedValue;

use crate::screen::SCREEN_COLS;

/// Cells inside the slider brackets
pub const SLIDER_WIDTH: u32 = 8;

/// Columns covered by an indicator's highlight
pub const INDICATOR_LEN: u8 = 9;

/// Slider for the encoder at registry `slot`
pub fn slider(slot: usize, value: NormalizedValue) -> String<SCREEN_COLS> {
    let filled = value.to_steps(SLIDER_WIDTH);

    let mut line = String::new();
    let _ = write!(line, "Enc {} [", slot + 1);
    for cell in 0..SLIDER_WIDTH {
        let _ = line.push(if cell < filled { '#' } else { ' ' });
    }
    let _ = write!(line, "] {:>3}%", value.to_percent());
    line
}

/// Indicator for the button at registry `slot`
pub fn indicator(slot: usize, pressed: bool) -> String<SCREEN_COLS> {
    let mut line = String::new();
    let _ = write!(line, "Btn {} [{}]", slot + 1, if pressed { '*' } else { ' ' });
    line
}
