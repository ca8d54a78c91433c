//! Mock driver for testing without hardware.
//!
//! Records every command for verification and lets tests synthesize the
//! [`DriverEvent`]s a real driver would deliver.
//!
//! # Example
//!
//! ```rust
//! use arm_motion::{MockDriver, StepDriver};
//!
//! let mut driver = MockDriver::new();
//! driver.set_speed(0, 500.0).unwrap();
//! driver.move_to(0, 4000).unwrap();
//!
//! assert_eq!(driver.moves_issued(0), 1);
//! let done = driver.complete_move(0);
//! ```

use super::{ChannelConfig, DriverEvent, StepDriver};

const CHANNELS: usize = 16;

/// One recorded driver command.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DriverCall {
    /// `configure` on a channel.
    Configure(u8),
    /// `enable` with the requested state.
    Enable(u8, bool),
    /// `set_speed` in steps/s.
    SetSpeed(u8, f32),
    /// `set_acceleration` in steps/s².
    SetAcceleration(u8, f32),
    /// Absolute move target.
    MoveTo(u8, i64),
    /// Relative move delta.
    MoveBy(u8, i64),
    /// Immediate stop.
    Stop(u8),
    /// Step counter reset.
    Zero(u8),
    /// Encoder attach.
    AttachEncoder(u8),
    /// Encoder reference reset.
    ResetEncoder(u8),
    /// Limit-switch subscription.
    WatchLimit(u8),
    /// Encoder sweep request.
    ReportEncoders,
}

impl DriverCall {
    fn channel(&self) -> Option<u8> {
        match *self {
            DriverCall::Configure(ch)
            | DriverCall::Enable(ch, _)
            | DriverCall::SetSpeed(ch, _)
            | DriverCall::SetAcceleration(ch, _)
            | DriverCall::MoveTo(ch, _)
            | DriverCall::MoveBy(ch, _)
            | DriverCall::Stop(ch)
            | DriverCall::Zero(ch)
            | DriverCall::AttachEncoder(ch)
            | DriverCall::ResetEncoder(ch)
            | DriverCall::WatchLimit(ch) => Some(ch),
            DriverCall::ReportEncoders => None,
        }
    }
}

/// Recording test double for [`StepDriver`].
#[derive(Debug, Default)]
pub struct MockDriver {
    /// Every command in issue order.
    pub calls: Vec<DriverCall>,
    enabled: [bool; CHANNELS],
    speed: [f32; CHANNELS],
    accel: [f32; CHANNELS],
    position: [i64; CHANNELS],
    target: [Option<i64>; CHANNELS],
}

impl MockDriver {
    /// Create a new mock driver with all channels idle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of moves issued on a channel.
    pub fn moves_issued(&self, channel: u8) -> usize {
        self.calls
            .iter()
            .filter(|c| {
                matches!(c, DriverCall::MoveTo(..) | DriverCall::MoveBy(..))
                    && c.channel() == Some(channel)
            })
            .count()
    }

    /// Target of the most recent move on a channel, resolved to absolute steps.
    pub fn last_move_target(&self, channel: u8) -> Option<i64> {
        self.target[channel as usize]
    }

    /// Whether the channel's enable line is on.
    pub fn is_enabled(&self, channel: u8) -> bool {
        self.enabled[channel as usize]
    }

    /// Last commanded speed on a channel.
    pub fn speed_of(&self, channel: u8) -> f32 {
        self.speed[channel as usize]
    }

    /// Last commanded acceleration on a channel.
    pub fn accel_of(&self, channel: u8) -> f32 {
        self.accel[channel as usize]
    }

    /// Current step counter of a channel.
    pub fn position_of(&self, channel: u8) -> i64 {
        self.position[channel as usize]
    }

    /// Whether the channel's most recent move was followed by a stop.
    pub fn was_stopped(&self, channel: u8) -> bool {
        for call in self.calls.iter().rev() {
            match call {
                DriverCall::Stop(ch) if *ch == channel => return true,
                DriverCall::MoveTo(ch, _) | DriverCall::MoveBy(ch, _) if *ch == channel => {
                    return false
                }
                _ => {}
            }
        }
        false
    }

    /// Finish the channel's in-flight move at its target and produce the
    /// completion event.
    pub fn complete_move(&mut self, channel: u8) -> DriverEvent {
        let idx = channel as usize;
        if let Some(target) = self.target[idx].take() {
            self.position[idx] = target;
        }
        DriverEvent::MoveComplete {
            channel,
            actual_steps: self.position[idx],
        }
    }

    /// Finish the channel's in-flight move at an arbitrary position, as a
    /// stopped or interrupted move would.
    pub fn complete_move_at(&mut self, channel: u8, actual_steps: i64) -> DriverEvent {
        let idx = channel as usize;
        self.target[idx] = None;
        self.position[idx] = actual_steps;
        DriverEvent::MoveComplete {
            channel,
            actual_steps,
        }
    }

    /// Produce a limit-switch edge for the channel.
    pub fn limit_edge(&self, channel: u8) -> DriverEvent {
        DriverEvent::LimitEdge { channel }
    }

    /// Produce an encoder report for the channel.
    pub fn encoder_report(&self, channel: u8, position: i64) -> DriverEvent {
        DriverEvent::EncoderReport { channel, position }
    }
}

impl StepDriver for MockDriver {
    type Error = core::convert::Infallible;

    fn configure(&mut self, channel: u8, _config: &ChannelConfig) -> Result<(), Self::Error> {
        self.calls.push(DriverCall::Configure(channel));
        Ok(())
    }

    fn enable(&mut self, channel: u8, on: bool) -> Result<(), Self::Error> {
        self.enabled[channel as usize] = on;
        self.calls.push(DriverCall::Enable(channel, on));
        Ok(())
    }

    fn set_speed(&mut self, channel: u8, steps_per_sec: f32) -> Result<(), Self::Error> {
        self.speed[channel as usize] = steps_per_sec;
        self.calls.push(DriverCall::SetSpeed(channel, steps_per_sec));
        Ok(())
    }

    fn set_acceleration(&mut self, channel: u8, steps_per_sec2: f32) -> Result<(), Self::Error> {
        self.accel[channel as usize] = steps_per_sec2;
        self.calls
            .push(DriverCall::SetAcceleration(channel, steps_per_sec2));
        Ok(())
    }

    fn move_to(&mut self, channel: u8, target_steps: i64) -> Result<(), Self::Error> {
        self.target[channel as usize] = Some(target_steps);
        self.calls.push(DriverCall::MoveTo(channel, target_steps));
        Ok(())
    }

    fn move_by(&mut self, channel: u8, delta_steps: i64) -> Result<(), Self::Error> {
        let idx = channel as usize;
        self.target[idx] = Some(self.position[idx] + delta_steps);
        self.calls.push(DriverCall::MoveBy(channel, delta_steps));
        Ok(())
    }

    fn stop(&mut self, channel: u8) -> Result<(), Self::Error> {
        self.calls.push(DriverCall::Stop(channel));
        Ok(())
    }

    fn zero(&mut self, channel: u8) -> Result<(), Self::Error> {
        let idx = channel as usize;
        self.position[idx] = 0;
        if self.target[idx].is_some() {
            // A zeroed channel's pending completion reports from the new origin
            self.target[idx] = Some(0);
        }
        self.calls.push(DriverCall::Zero(channel));
        Ok(())
    }

    fn attach_encoder(&mut self, channel: u8, _pin_a: u8, _pin_b: u8) -> Result<(), Self::Error> {
        self.calls.push(DriverCall::AttachEncoder(channel));
        Ok(())
    }

    fn reset_encoder(&mut self, channel: u8) -> Result<(), Self::Error> {
        self.calls.push(DriverCall::ResetEncoder(channel));
        Ok(())
    }

    fn watch_limit(&mut self, channel: u8, _pin: u8) -> Result<(), Self::Error> {
        self.calls.push(DriverCall::WatchLimit(channel));
        Ok(())
    }

    fn report_encoders(&mut self) -> Result<(), Self::Error> {
        self.calls.push(DriverCall::ReportEncoders);
        Ok(())
    }
}
