//! Open Control - MIDI Controller Firmware
//!
//! Firmware binary for RP2040-based control surfaces: rotary encoders and
//! buttons in, MIDI control changes out, a small OLED showing the state.
//!
//! Boot brings up the display, the view and the application in that
//! order. Any failing step is logged and the firmware halts. Once running,
//! a single task steps the runtime forever, yielding between steps.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_futures::yield_now;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Pull};
use embassy_rp::i2c::{Config as I2cConfig, I2c};
use embassy_rp::peripherals::UART0;
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use embassy_time::Timer;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use opencontrol_core::traits::Clock;
use opencontrol_core::{Binding, Context, Runtime, StandaloneContext, StartupError};
use opencontrol_drivers::midi::MIDI_BAUD;
use opencontrol_drivers::{ControlSurface, SerialMidi, Sh1106};
use opencontrol_view::ControlView;

use crate::clock::EmbassyClock;
use crate::config::{BUTTON_COUNT, ENCODER_COUNT, MIDI, REGISTRY, TIMING};

mod clock;
mod config;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; config::midi_uart::TX_BUFFER]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; config::midi_uart::RX_BUFFER]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("Open Control firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    debug!(
        "Timing: app {} Hz, view {} Hz, debounce {} ms",
        TIMING.app_hz, TIMING.view_hz, TIMING.debounce_ms
    );
    debug!(
        "Controls: {} encoders from CC {}, {} buttons from CC {}, channel {}",
        ENCODER_COUNT,
        MIDI.enc_cc_base,
        BUTTON_COUNT,
        MIDI.btn_cc_base,
        MIDI.channel + 1
    );

    // Display: SH1106 on I2C0 (SDA=GPIO4, SCL=GPIO5)
    let mut i2c_config = I2cConfig::default();
    i2c_config.frequency = config::display::I2C_FREQUENCY;
    let i2c = I2c::new_blocking(p.I2C0, p.PIN_5, p.PIN_4, i2c_config);

    let mut display = Sh1106::with_address(i2c, config::display::ADDRESS);
    if let Err(e) = display.init() {
        error!("[ERROR] Display init failed: {}", e);
        halt().await;
    }
    info!("[OK] Display");

    let mut view = ControlView::<_, ENCODER_COUNT, BUTTON_COUNT>::new(display);
    if let Err(e) = view.init() {
        error!("[ERROR] View init failed: {}", e);
        halt().await;
    }
    info!("[OK] View");

    // MIDI OUT on UART0 (TX=GPIO0, RX=GPIO1), 31250 baud
    let mut uart_config = UartConfig::default();
    uart_config.baudrate = MIDI_BAUD;

    let tx_buf = TX_BUF.init([0u8; config::midi_uart::TX_BUFFER]);
    let rx_buf = RX_BUF.init([0u8; config::midi_uart::RX_BUFFER]);

    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, uart_config);
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (tx, _rx) = uart.split();
    let midi = SerialMidi::new(tx, MIDI.channel);
    info!("[OK] MIDI out");

    // Inputs: pins in registry order, pulled up
    let clock = EmbassyClock;
    let encoder_pins = [
        (Input::new(p.PIN_10, Pull::Up), Input::new(p.PIN_11, Pull::Up)),
        (Input::new(p.PIN_12, Pull::Up), Input::new(p.PIN_13, Pull::Up)),
    ];
    let button_pins = [Input::new(p.PIN_14, Pull::Up)];

    let surface = match ControlSurface::new(clock, &REGISTRY, encoder_pins, button_pins, &TIMING) {
        Ok(surface) => surface,
        Err(e) => {
            error!("[ERROR] Input init failed: {}", e);
            halt().await
        }
    };
    info!("[OK] Inputs");

    let binding = match Binding::new(&REGISTRY, &MIDI, surface, midi, view) {
        Ok(binding) => binding,
        Err(e) => {
            error!("[ERROR] Binding failed: {}", e);
            halt().await
        }
    };

    let context = StandaloneContext::new(binding);
    let runtime = match Runtime::new(clock, &TIMING, context) {
        Ok(runtime) => runtime,
        Err(StartupError::Config(e)) => {
            error!("[ERROR] App init failed: {}", e);
            halt().await
        }
        Err(StartupError::Context(never)) => match never {},
    };
    info!("[OK] {} context running", runtime.name());

    run(runtime).await
}

/// Step the runtime forever
///
/// Yields between steps so other tasks can run; never waits on a timer.
async fn run<K: Clock, X: Context>(mut runtime: Runtime<K, X>) -> ! {
    loop {
        runtime.step();
        yield_now().await;
    }
}

/// Stop after an unrecoverable startup failure
async fn halt() -> ! {
    loop {
        Timer::after_secs(1).await;
    }
}
