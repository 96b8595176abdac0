//! Output sink trait

/// Destination for control-change messages
pub trait OutputSink {
    /// Send a control change
    ///
    /// - `channel`: control-change number (0-127)
    /// - `value`: 7-bit value (0-127)
    ///
    /// Transport failures are handled inside the sink.
    fn send(&mut self, channel: u8, value: u8);
}
