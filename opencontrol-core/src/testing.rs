//! Recording collaborators shared by the unit tests

use core::cell::RefCell;

use heapless::{Deque, Vec};

use crate::config::DeviceId;
use crate::traits::{InputEvent, InputSource, OutputSink, ViewSink};
use crate::value::NormalizedValue;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Trigger {
    Turned,
    Pressed,
    Released,
}

/// One observed collaborator call
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Call {
    Subscribe(Trigger, DeviceId, usize),
    Force(DeviceId, NormalizedValue),
    Send(u8, u8),
    Analog(usize, NormalizedValue),
    Boolean(usize, bool),
    ResetAll,
    Refresh,
}

/// Call log shared by every fake so cross-collaborator order is visible
#[derive(Default)]
pub struct Journal(RefCell<Vec<Call, 64>>);

impl Journal {
    pub fn record(&self, call: Call) {
        self.0.borrow_mut().push(call).unwrap();
    }

    pub fn take(&self) -> Vec<Call, 64> {
        core::mem::take(&mut *self.0.borrow_mut())
    }
}

pub struct FakeInput<'a> {
    journal: &'a Journal,
    queue: Deque<InputEvent, 16>,
    pub updates: u32,
}

impl<'a> FakeInput<'a> {
    pub fn new(journal: &'a Journal) -> Self {
        Self {
            journal,
            queue: Deque::new(),
            updates: 0,
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        self.queue.push_back(event).unwrap();
    }
}

impl InputSource for FakeInput<'_> {
    fn subscribe_turned(&mut self, device: DeviceId, slot: usize) {
        self.journal.record(Call::Subscribe(Trigger::Turned, device, slot));
    }

    fn subscribe_pressed(&mut self, device: DeviceId, slot: usize) {
        self.journal.record(Call::Subscribe(Trigger::Pressed, device, slot));
    }

    fn subscribe_released(&mut self, device: DeviceId, slot: usize) {
        self.journal.record(Call::Subscribe(Trigger::Released, device, slot));
    }

    fn update(&mut self) {
        self.updates += 1;
    }

    fn poll(&mut self) -> Option<InputEvent> {
        self.queue.pop_front()
    }

    fn force_position(&mut self, device: DeviceId, value: NormalizedValue) {
        self.journal.record(Call::Force(device, value));
    }
}

pub struct FakeOutput<'a> {
    journal: &'a Journal,
}

impl<'a> FakeOutput<'a> {
    pub fn new(journal: &'a Journal) -> Self {
        Self { journal }
    }
}

impl OutputSink for FakeOutput<'_> {
    fn send(&mut self, channel: u8, value: u8) {
        self.journal.record(Call::Send(channel, value));
    }
}

pub struct FakeView<'a> {
    journal: &'a Journal,
    analog: usize,
    boolean: usize,
}

impl<'a> FakeView<'a> {
    pub fn new(journal: &'a Journal, analog: usize, boolean: usize) -> Self {
        Self {
            journal,
            analog,
            boolean,
        }
    }
}

impl ViewSink for FakeView<'_> {
    fn analog_capacity(&self) -> usize {
        self.analog
    }

    fn boolean_capacity(&self) -> usize {
        self.boolean
    }

    fn set_analog(&mut self, slot: usize, value: NormalizedValue) {
        self.journal.record(Call::Analog(slot, value));
    }

    fn set_boolean(&mut self, slot: usize, pressed: bool) {
        self.journal.record(Call::Boolean(slot, pressed));
    }

    fn reset_all_analog(&mut self) {
        self.journal.record(Call::ResetAll);
    }

    fn refresh(&mut self) {
        self.journal.record(Call::Refresh);
    }
}
