//! Board configuration
//!
//! Everything the firmware needs to know about the hardware and the
//! control layout, fixed at build time. The `const` assertions at the
//! bottom reject an invalid layout before the firmware is ever flashed.

use opencontrol_core::{ButtonDef, EncoderDef, MidiConfig, Registry, Timing};
use opencontrol_view::MAX_CONTROLS;

// Scheduler rates

/// Input polling and dispatch rate
pub const APP_HZ: u32 = 2000;
/// Display refresh rate
pub const LVGL_HZ: u32 = 100;
/// Button debounce time
pub const DEBOUNCE_MS: u8 = 5;

pub const TIMING: Timing = Timing::new(APP_HZ, LVGL_HZ, DEBOUNCE_MS);

// Encoder tuning shared by every encoder

pub const ENC_PPR: u16 = 24;
pub const ENC_RANGE_DEG: u16 = 270;
pub const ENC_TICKS_PER_EVENT: u8 = 1;
pub const ENC_INVERT: bool = true;

// Input devices. GPIO numbers must match the pins claimed in main.

pub const ENC_LEFT: EncoderDef =
    EncoderDef::new(10, 10, 11).with_tuning(ENC_PPR, ENC_RANGE_DEG, ENC_TICKS_PER_EVENT, ENC_INVERT);
pub const ENC_RIGHT: EncoderDef =
    EncoderDef::new(11, 12, 13).with_tuning(ENC_PPR, ENC_RANGE_DEG, ENC_TICKS_PER_EVENT, ENC_INVERT);

/// Slot 0, so it is also the reset control
pub const BTN_MAIN: ButtonDef = ButtonDef::active_low(100, 14);

pub const ENCODERS: [EncoderDef; 2] = [ENC_LEFT, ENC_RIGHT];
pub const BUTTONS: [ButtonDef; 1] = [BTN_MAIN];

pub const ENCODER_COUNT: usize = ENCODERS.len();
pub const BUTTON_COUNT: usize = BUTTONS.len();

pub const REGISTRY: Registry = Registry::new(&ENCODERS, &BUTTONS);

// MIDI

pub const MIDI_CHANNEL: u8 = 0;
pub const ENC_CC_BASE: u8 = 16;
pub const BTN_CC_BASE: u8 = 20;

pub const MIDI: MidiConfig = MidiConfig::new(MIDI_CHANNEL, ENC_CC_BASE, BTN_CC_BASE);

/// MIDI OUT on UART0
pub mod midi_uart {
    pub const TX_PIN: u8 = 0;
    pub const RX_PIN: u8 = 1;
    pub const TX_BUFFER: usize = 64;
    pub const RX_BUFFER: usize = 16;
}

/// SH1106 128x64 OLED on I2C0
pub mod display {
    pub const SDA_PIN: u8 = 4;
    pub const SCL_PIN: u8 = 5;
    pub const I2C_FREQUENCY: u32 = 400_000;
    pub const ADDRESS: u8 = 0x3C;
}

const _: () = assert!(TIMING.validate().is_ok(), "invalid scheduler rates");
const _: () = assert!(REGISTRY.validate(&MIDI).is_ok(), "invalid control layout");
const _: () = assert!(
    ENCODER_COUNT + BUTTON_COUNT <= MAX_CONTROLS,
    "more controls than display rows"
);
