//! GPIO control surface
//!
//! Input source over plain digital pins. Each fast tick [`update`] samples
//! every encoder and button once and queues the resulting events for the
//! subscribed slots. A full queue drops the newest event.
//!
//! [`update`]: opencontrol_core::traits::InputSource::update

use embedded_hal::digital::InputPin;
use heapless::{Deque, Vec};
use opencontrol_core::traits::{Clock, InputEvent, InputSource};
use opencontrol_core::{DeviceId, DeviceKind, NormalizedValue, Registry, Timing};

use super::debounce::{Debouncer, Edge};
use super::position::EncoderPosition;
use super::quadrature::QuadratureDecoder;

/// Pending events held between polls
pub const EVENT_QUEUE_LEN: usize = 32;

/// Control surface construction errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SurfaceError {
    /// Pins supplied do not match the registry
    PinCountMismatch {
        kind: DeviceKind,
        expected: usize,
        supplied: usize,
    },
}

struct EncoderChannel<P> {
    id: DeviceId,
    pin_a: P,
    pin_b: P,
    decoder: QuadratureDecoder,
    position: EncoderPosition,
    turned: Option<usize>,
}

struct ButtonChannel<P> {
    id: DeviceId,
    pin: P,
    active_low: bool,
    debouncer: Debouncer,
    pressed: Option<usize>,
    released: Option<usize>,
}

/// Encoders and buttons on GPIO pins
pub struct ControlSurface<P, K, const E: usize, const B: usize> {
    clock: K,
    encoders: Vec<EncoderChannel<P>, E>,
    buttons: Vec<ButtonChannel<P>, B>,
    queue: Deque<InputEvent, EVENT_QUEUE_LEN>,
    dropped: u32,
    pin_errors: u32,
}

impl<P, K, const E: usize, const B: usize> ControlSurface<P, K, E, B>
where
    P: InputPin,
    K: Clock,
{
    /// Pair the registry descriptors with their pins, in registry order
    pub fn new(
        clock: K,
        registry: &Registry,
        encoder_pins: [(P, P); E],
        button_pins: [P; B],
        timing: &Timing,
    ) -> Result<Self, SurfaceError> {
        if registry.encoders.len() != E {
            return Err(SurfaceError::PinCountMismatch {
                kind: DeviceKind::Rotary,
                expected: registry.encoders.len(),
                supplied: E,
            });
        }
        if registry.buttons.len() != B {
            return Err(SurfaceError::PinCountMismatch {
                kind: DeviceKind::Momentary,
                expected: registry.buttons.len(),
                supplied: B,
            });
        }

        let encoders = registry
            .encoders
            .iter()
            .zip(encoder_pins)
            .map(|(def, (pin_a, pin_b))| EncoderChannel {
                id: def.id,
                pin_a,
                pin_b,
                decoder: QuadratureDecoder::new(),
                position: EncoderPosition::new(def),
                turned: None,
            })
            .collect();

        let debounce_ms = u32::from(timing.debounce_ms);
        let buttons = registry
            .buttons
            .iter()
            .zip(button_pins)
            .map(|(def, pin)| ButtonChannel {
                id: def.id,
                pin,
                active_low: def.is_active_low(),
                debouncer: Debouncer::new(debounce_ms),
                pressed: None,
                released: None,
            })
            .collect();

        Ok(Self {
            clock,
            encoders,
            buttons,
            queue: Deque::new(),
            dropped: 0,
            pin_errors: 0,
        })
    }

    /// Events lost to a full queue
    pub fn dropped_events(&self) -> u32 {
        self.dropped
    }

    /// Samples skipped because a pin read failed
    pub fn pin_errors(&self) -> u32 {
        self.pin_errors
    }

    /// Current position of an encoder
    pub fn position(&self, device: DeviceId) -> Option<NormalizedValue> {
        self.encoders
            .iter()
            .find(|e| e.id == device)
            .map(|e| e.position.value())
    }

    fn enqueue(queue: &mut Deque<InputEvent, EVENT_QUEUE_LEN>, dropped: &mut u32, event: InputEvent) {
        if queue.push_back(event).is_err() {
            *dropped = dropped.wrapping_add(1);
        }
    }
}

impl<P, K, const E: usize, const B: usize> InputSource for ControlSurface<P, K, E, B>
where
    P: InputPin,
    K: Clock,
{
    fn subscribe_turned(&mut self, device: DeviceId, slot: usize) {
        if let Some(enc) = self.encoders.iter_mut().find(|e| e.id == device) {
            enc.turned = Some(slot);
        }
    }

    fn subscribe_pressed(&mut self, device: DeviceId, slot: usize) {
        if let Some(btn) = self.buttons.iter_mut().find(|b| b.id == device) {
            btn.pressed = Some(slot);
        }
    }

    fn subscribe_released(&mut self, device: DeviceId, slot: usize) {
        if let Some(btn) = self.buttons.iter_mut().find(|b| b.id == device) {
            btn.released = Some(slot);
        }
    }

    fn update(&mut self) {
        let now = self.clock.now_micros();

        for enc in self.encoders.iter_mut() {
            let (a, b) = match (enc.pin_a.is_high(), enc.pin_b.is_high()) {
                (Ok(a), Ok(b)) => (a, b),
                _ => {
                    self.pin_errors = self.pin_errors.wrapping_add(1);
                    continue;
                }
            };

            let Some(step) = enc.decoder.update(a, b) else {
                continue;
            };
            let Some(value) = enc.position.apply(step) else {
                continue;
            };
            if let Some(slot) = enc.turned {
                Self::enqueue(
                    &mut self.queue,
                    &mut self.dropped,
                    InputEvent::Turned { slot, value },
                );
            }
        }

        for btn in self.buttons.iter_mut() {
            let Ok(high) = btn.pin.is_high() else {
                self.pin_errors = self.pin_errors.wrapping_add(1);
                continue;
            };

            let event = match btn.debouncer.update(high != btn.active_low, now) {
                Some(Edge::Pressed) => btn.pressed.map(|slot| InputEvent::Pressed { slot }),
                Some(Edge::Released) => btn.released.map(|slot| InputEvent::Released { slot }),
                None => None,
            };
            if let Some(event) = event {
                Self::enqueue(&mut self.queue, &mut self.dropped, event);
            }
        }
    }

    fn poll(&mut self) -> Option<InputEvent> {
        self.queue.pop_front()
    }

    fn force_position(&mut self, device: DeviceId, value: NormalizedValue) {
        if let Some(enc) = self.encoders.iter_mut().find(|e| e.id == device) {
            enc.position.force(value);
        }
    }
}
