//! Control view
//!
//! [`ControlView`] implements the core's `ViewSink`: one slider row per
//! encoder, one indicator row per button, between a title and a footer.

use opencontrol_core::traits::ViewSink;
use opencontrol_core::NormalizedValue;

use crate::backend::{DisplayBackend, DisplayError};
use crate::screen::{Screen, SCREEN_ROWS};
use crate::widgets::{self, INDICATOR_LEN};

/// Title row text
pub const TITLE: &str = "Open Control";

/// Footer row text
pub const FOOTER: &str = "Btn: reset";

const TITLE_ROW: usize = 0;
const FIRST_CONTROL_ROW: usize = 1;
const FOOTER_ROW: usize = SCREEN_ROWS - 1;

/// Rows available between title and footer
pub const MAX_CONTROLS: usize = FOOTER_ROW - FIRST_CONTROL_ROW;

/// View with `E` encoder sliders and `B` button indicators
pub struct ControlView<D, const E: usize, const B: usize> {
    display: D,
    screen: Screen,
    analog: [NormalizedValue; E],
    pressed: [bool; B],
    default: NormalizedValue,
    render_errors: u32,
    last_error: Option<DisplayError>,
}

impl<D: DisplayBackend, const E: usize, const B: usize> ControlView<D, E, B> {
    const LAYOUT_FITS: () = assert!(E + B <= MAX_CONTROLS, "too many controls for the screen");

    /// Create a view with every slider at the centre
    pub fn new(display: D) -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::LAYOUT_FITS;

        let mut view = Self {
            display,
            screen: Screen::new(),
            analog: [NormalizedValue::CENTER; E],
            pressed: [false; B],
            default: NormalizedValue::CENTER,
            render_errors: 0,
            last_error: None,
        };
        view.layout();
        view
    }

    /// Use a different reset value
    pub fn with_default(mut self, default: NormalizedValue) -> Self {
        self.default = default;
        self
    }

    /// Draw the initial layout and push it to the display
    pub fn init(&mut self) -> Result<(), DisplayError> {
        self.display.clear()?;
        self.layout();
        self.screen.render(&mut self.display)
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn value(&self, slot: usize) -> Option<NormalizedValue> {
        self.analog.get(slot).copied()
    }

    pub fn is_pressed(&self, slot: usize) -> Option<bool> {
        self.pressed.get(slot).copied()
    }

    /// Number of refreshes whose render failed
    pub fn render_errors(&self) -> u32 {
        self.render_errors
    }

    pub fn last_error(&self) -> Option<DisplayError> {
        self.last_error
    }

    fn layout(&mut self) {
        self.screen.clear();
        self.screen.set_line(TITLE_ROW, TITLE);
        for slot in 0..E {
            self.draw_slider(slot);
        }
        for slot in 0..B {
            self.draw_indicator(slot);
        }
        self.screen.set_line(FOOTER_ROW, FOOTER);
    }

    fn draw_slider(&mut self, slot: usize) {
        let line = widgets::slider(slot, self.analog[slot]);
        self.screen.set_line(FIRST_CONTROL_ROW + slot, &line);
    }

    fn draw_indicator(&mut self, slot: usize) {
        let row = FIRST_CONTROL_ROW + E + slot;
        let pressed = self.pressed[slot];
        self.screen.set_line(row, &widgets::indicator(slot, pressed));
        self.screen
            .set_highlight(row, pressed.then_some((0, INDICATOR_LEN)));
    }
}

impl<D: DisplayBackend, const E: usize, const B: usize> ViewSink for ControlView<D, E, B> {
    fn default_value(&self) -> NormalizedValue {
        self.default
    }

    fn analog_capacity(&self) -> usize {
        E
    }

    fn boolean_capacity(&self) -> usize {
        B
    }

    fn set_analog(&mut self, slot: usize, value: NormalizedValue) {
        if let Some(current) = self.analog.get_mut(slot) {
            *current = value;
            self.draw_slider(slot);
        }
    }

    fn set_boolean(&mut self, slot: usize, pressed: bool) {
        if let Some(current) = self.pressed.get_mut(slot) {
            *current = pressed;
            self.draw_indicator(slot);
        }
    }

    fn reset_all_analog(&mut self) {
        for slot in 0..E {
            self.analog[slot] = self.default;
            self.draw_slider(slot);
        }
    }

    fn refresh(&mut self) {
        if !self.screen.is_dirty() {
            return;
        }
        if let Err(e) = self.screen.render(&mut self.display) {
            self.render_errors = self.render_errors.wrapping_add(1);
            self.last_error = Some(e);
        }
    }
}
