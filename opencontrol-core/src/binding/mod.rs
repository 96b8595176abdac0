//! Binding layer
//!
//! Connects every registry device to the output and view sinks:
//!
//! - Encoder `i` turned to `v` sends `(ENC_CC_BASE + i, round(v * 127))`
//!   and shows `v` in analog slot `i`
//! - Button `i` pressed sends `(BTN_CC_BASE + i, 127)` and lights boolean
//!   slot `i`; released sends `(BTN_CC_BASE + i, 0)`
//! - Pressing the reset control re-syncs every encoder to the view default,
//!   then redraws the view
//!
//! The registry index is the only key. Subscriptions are made in
//! [`Binding::new`] and never change afterwards.

use crate::config::{ConfigError, DeviceKind, MidiConfig, Registry};
use crate::mapping::ChannelMapping;
use crate::traits::{InputEvent, InputSource, OutputSink, ViewSink};
use crate::value::NormalizedValue;

/// Button slot whose press triggers the encoder reset
pub const RESET_CONTROL: usize = 0;

/// Control-change value sent on press
pub const VALUE_ON: u8 = 127;

/// Control-change value sent on release
pub const VALUE_OFF: u8 = 0;

/// Input-to-output binding over a fixed registry
pub struct Binding<I, O, V> {
    registry: &'static Registry,
    mapping: ChannelMapping,
    input: I,
    output: O,
    view: V,
}

impl<I, O, V> Binding<I, O, V>
where
    I: InputSource,
    O: OutputSink,
    V: ViewSink,
{
    /// Validate the configuration and subscribe to every device
    ///
    /// Fails if the registry is invalid for `midi` or has more devices
    /// than the view has slots. This is the only place the view capacity
    /// is compared with the registry.
    pub fn new(
        registry: &'static Registry,
        midi: &MidiConfig,
        mut input: I,
        output: O,
        view: V,
    ) -> Result<Self, ConfigError> {
        registry.validate(midi)?;

        if registry.encoders.len() > view.analog_capacity() {
            return Err(ConfigError::CapacityExceeded {
                kind: DeviceKind::Rotary,
                devices: registry.encoders.len(),
                slots: view.analog_capacity(),
            });
        }
        if registry.buttons.len() > view.boolean_capacity() {
            return Err(ConfigError::CapacityExceeded {
                kind: DeviceKind::Momentary,
                devices: registry.buttons.len(),
                slots: view.boolean_capacity(),
            });
        }

        for (slot, encoder) in registry.encoders.iter().enumerate() {
            input.subscribe_turned(encoder.id, slot);
        }
        for (slot, button) in registry.buttons.iter().enumerate() {
            input.subscribe_pressed(button.id, slot);
            input.subscribe_released(button.id, slot);
        }

        Ok(Self {
            registry,
            mapping: ChannelMapping::from_midi(midi),
            input,
            output,
            view,
        })
    }

    /// Let the input source sample its hardware, then dispatch every
    /// pending event
    ///
    /// Returns the number of events dispatched.
    pub fn dispatch_pending(&mut self) -> usize {
        self.input.update();

        let mut count = 0;
        while let Some(event) = self.input.poll() {
            self.handle(event);
            count += 1;
        }
        count
    }

    /// Dispatch a single event
    pub fn handle(&mut self, event: InputEvent) {
        match event {
            InputEvent::Turned { slot, value } => self.on_turned(slot, value),
            InputEvent::Pressed { slot } => self.on_pressed(slot),
            InputEvent::Released { slot } => self.on_released(slot),
        }
    }

    /// Force every encoder to the view default, then redraw the view
    ///
    /// The hardware resync must come first: redrawing first would let the
    /// next turn report a jump from the stale hardware position.
    pub fn reset_encoders(&mut self) {
        let default = self.view.default_value();
        #[cfg(feature = "defmt")]
        defmt::trace!("Reset {} encoders to {}", self.registry.encoders.len(), default);

        for encoder in self.registry.encoders {
            self.input.force_position(encoder.id, default);
        }
        self.view.reset_all_analog();
    }

    /// Run the view refresh
    pub fn refresh_view(&mut self) {
        self.view.refresh();
    }

    /// The registry this binding was built from
    pub fn registry(&self) -> &'static Registry {
        self.registry
    }

    /// The channel mapping in use
    pub fn mapping(&self) -> ChannelMapping {
        self.mapping
    }

    /// Get the input source
    pub fn input(&self) -> &I {
        &self.input
    }

    /// Get the output sink
    pub fn output(&self) -> &O {
        &self.output
    }

    /// Get the view sink
    pub fn view(&self) -> &V {
        &self.view
    }

    /// Get the view sink mutably
    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// Take the collaborators back
    pub fn into_parts(self) -> (I, O, V) {
        (self.input, self.output, self.view)
    }

    fn on_turned(&mut self, slot: usize, value: NormalizedValue) {
        let channel = self.mapping.channel(DeviceKind::Rotary, slot);
        self.output.send(channel, value.to_midi());
        self.view.set_analog(slot, value);
    }

    fn on_pressed(&mut self, slot: usize) {
        let channel = self.mapping.channel(DeviceKind::Momentary, slot);
        self.output.send(channel, VALUE_ON);
        self.view.set_boolean(slot, true);

        if slot == RESET_CONTROL {
            self.reset_encoders();
        }
    }

    fn on_released(&mut self, slot: usize) {
        let channel = self.mapping.channel(DeviceKind::Momentary, slot);
        self.output.send(channel, VALUE_OFF);
        self.view.set_boolean(slot, false);
    }
}
