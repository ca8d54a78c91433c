//! The stepper driver boundary.
//!
//! Pulse generation, limit-switch debouncing and encoder decoding live in
//! firmware behind this trait. Every command is fire-and-forget: completions
//! and sensor edges come back as [`DriverEvent`] values which the host loop
//! feeds into [`crate::Arm::handle_event`]. Nothing here blocks.

#[cfg(feature = "std")]
mod mock;

#[cfg(feature = "std")]
pub use mock::{DriverCall, MockDriver};

/// Pin assignment for one stepper channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelConfig {
    /// STEP pulse pin.
    pub step_pin: u8,
    /// Direction pin.
    pub dir_pin: u8,
    /// Enable pin.
    pub enable_pin: u8,
    /// Invert direction pin logic.
    pub invert: bool,
}

/// An event reported by the driver.
///
/// Events are processed in arrival order; the arm never polls the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverEvent {
    /// A move finished (or was stopped); `actual_steps` is the channel's
    /// step counter at the moment it came to rest.
    MoveComplete {
        /// Driver channel.
        channel: u8,
        /// Absolute step position when the move ended.
        actual_steps: i64,
    },
    /// The channel's limit switch closed.
    LimitEdge {
        /// Driver channel.
        channel: u8,
    },
    /// Periodic encoder position report.
    EncoderReport {
        /// Driver channel.
        channel: u8,
        /// Encoder-decoded position in steps.
        position: i64,
    },
}

impl DriverEvent {
    /// The channel this event belongs to.
    pub fn channel(&self) -> u8 {
        match *self {
            DriverEvent::MoveComplete { channel, .. } => channel,
            DriverEvent::LimitEdge { channel } => channel,
            DriverEvent::EncoderReport { channel, .. } => channel,
        }
    }
}

/// Commands consumed by the pulse-generation firmware.
///
/// Implementations must not block; a long-running `move_to` returns
/// immediately and reports completion through a [`DriverEvent`]. A stopped
/// move still delivers its completion event with the position where the
/// channel came to rest.
pub trait StepDriver {
    /// Error type for driver commands.
    type Error: core::fmt::Debug;

    /// Configure a stepper channel's pins.
    fn configure(&mut self, channel: u8, config: &ChannelConfig) -> Result<(), Self::Error>;

    /// Drive the channel's enable line.
    fn enable(&mut self, channel: u8, on: bool) -> Result<(), Self::Error>;

    /// Set cruise speed for subsequent moves, steps per second.
    fn set_speed(&mut self, channel: u8, steps_per_sec: f32) -> Result<(), Self::Error>;

    /// Set acceleration for subsequent moves, steps per second squared.
    fn set_acceleration(&mut self, channel: u8, steps_per_sec2: f32) -> Result<(), Self::Error>;

    /// Move to an absolute step position.
    fn move_to(&mut self, channel: u8, target_steps: i64) -> Result<(), Self::Error>;

    /// Move by a relative step count.
    fn move_by(&mut self, channel: u8, delta_steps: i64) -> Result<(), Self::Error>;

    /// Stop the channel immediately without disabling it.
    fn stop(&mut self, channel: u8) -> Result<(), Self::Error>;

    /// Reset the channel's step counter to zero at the current pose.
    fn zero(&mut self, channel: u8) -> Result<(), Self::Error>;

    /// Attach a quadrature encoder to the channel.
    fn attach_encoder(&mut self, channel: u8, pin_a: u8, pin_b: u8) -> Result<(), Self::Error>;

    /// Reset the channel's encoder reference to zero.
    fn reset_encoder(&mut self, channel: u8) -> Result<(), Self::Error>;

    /// Subscribe to limit-switch edges on the given pin for this channel.
    fn watch_limit(&mut self, channel: u8, pin: u8) -> Result<(), Self::Error>;

    /// Request an encoder sweep; positions come back as one
    /// [`DriverEvent::EncoderReport`] per attached channel.
    fn report_encoders(&mut self) -> Result<(), Self::Error>;
}
