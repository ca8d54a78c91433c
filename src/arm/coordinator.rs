//! The whole-arm motion coordinator.
//!
//! Owns the six joints and the driver, routes driver events to the owning
//! joint, aggregates readiness/homing/motion state, and runs the multi-joint
//! sequences: whole-arm homing with one deferred joint, split homing, and
//! calibration. All of it runs on one cooperative loop; the only clock is
//! the `now_ms` value callers thread through.

use core::mem;

use log::{debug, info, warn};

use crate::config::units::Degrees;
use crate::config::{validate_config, ArmConfig, JointId};
use crate::driver::{DriverEvent, StepDriver};
use crate::error::{ConfigError, Error, Result};
use crate::joint::{Joint, JointFault, JointSignal, JointStatus};
use crate::motion::{plan_synchronized, AxisRequest};

/// Delay before the deferred joint starts homing, giving its neighbours time
/// to clear the trailing cable off its switch.
pub const DEFERRED_HOME_DELAY_MS: u64 = 2000;

/// Settle delay between reaching aggregate home and the automatic centering
/// move of a calibration.
pub const CALIBRATE_SETTLE_MS: u64 = 1000;

/// Outward arm event for the remote boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArmEvent {
    /// A joint finished starting.
    JointReady(JointId),
    /// A joint began a homing sweep.
    JointHoming(JointId),
    /// A joint reached its homed reference.
    JointHome(JointId),
    /// A joint finished a move.
    JointMoved(JointId),
    /// A joint recorded a fault.
    JointFault(JointId, JointFault),
    /// Every joint is started.
    ArmReady,
    /// Every joint reports home.
    ArmHome,
    /// Every joint came to rest after a whole-arm move.
    ArmMoved,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimerAction {
    HomeDeferred,
    CalibrateCenter,
}

#[derive(Debug, Clone, Copy)]
struct Timer {
    due_ms: u64,
    action: TimerAction,
}

/// Phases of the split-homing sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SplitPhase {
    Inactive,
    /// Homing every joint except the deferred one.
    HomingOthers,
    /// Centering those joints so the deferred one has room.
    CenteringOthers,
    /// Homing the deferred joint.
    HomingDeferred,
    /// Centering the deferred joint.
    CenteringDeferred,
}

/// Coordinator owning the six joints and the driver.
pub struct Arm<D: StepDriver> {
    driver: D,
    joints: [Joint; 6],
    deferred: JointId,

    stopped: bool,
    moving: bool,
    homing: bool,
    calibrating: bool,
    split: SplitPhase,

    timers: heapless::Vec<Timer, 8>,
    outbox: heapless::Vec<ArmEvent, 32>,
}

impl<D: StepDriver> Arm<D> {
    /// Build an arm from a validated configuration.
    pub fn new(driver: D, config: &ArmConfig) -> Result<Self> {
        validate_config(config)?;

        fn joint_for(config: &ArmConfig, id: JointId) -> Result<Joint> {
            let jc = config
                .joint(id)
                .ok_or(Error::Config(ConfigError::MissingJoint(id)))?;
            Ok(Joint::new(id, jc.clone()))
        }

        Ok(Self {
            driver,
            joints: [
                joint_for(config, JointId::J0)?,
                joint_for(config, JointId::J1)?,
                joint_for(config, JointId::J2)?,
                joint_for(config, JointId::J3)?,
                joint_for(config, JointId::J4)?,
                joint_for(config, JointId::J5)?,
            ],
            deferred: config.deferred_joint,
            stopped: false,
            moving: false,
            homing: false,
            calibrating: false,
            split: SplitPhase::Inactive,
            timers: heapless::Vec::new(),
            outbox: heapless::Vec::new(),
        })
    }

    /// Borrow the driver (tests and encoder polling glue).
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Mutably borrow the driver.
    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    /// Borrow a joint.
    pub fn joint(&self, id: JointId) -> &Joint {
        &self.joints[id.index()]
    }

    /// The joint whose whole-arm homing is deferred.
    pub fn deferred_joint(&self) -> JointId {
        self.deferred
    }

    /// Start every joint. Call exactly once before anything else.
    pub fn start(&mut self) -> Result<()> {
        for joint in self.joints.iter_mut() {
            let signal = joint.start(&mut self.driver)?;
            if let JointSignal::Ready(id) = signal {
                Self::push_event(&mut self.outbox, ArmEvent::JointReady(id));
            }
        }
        info!("arm ready, {} joints started", self.joints.len());
        Self::push_event(&mut self.outbox, ArmEvent::ArmReady);
        Ok(())
    }

    // ---- aggregates -------------------------------------------------------

    /// All joints started.
    pub fn ready(&self) -> bool {
        self.joints.iter().all(|j| j.is_ready())
    }

    /// All joints at their homed reference.
    pub fn home(&self) -> bool {
        self.joints.iter().all(|j| j.is_home())
    }

    /// Any joint with a move or sweep in flight.
    pub fn any_moving(&self) -> bool {
        self.joints.iter().any(|j| j.is_moving())
    }

    /// Whole-arm move in flight.
    pub fn is_moving(&self) -> bool {
        self.moving
    }

    /// Arm disabled by `robot_stop`.
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Whole-arm homing sequence in flight.
    pub fn is_homing(&self) -> bool {
        self.homing
    }

    /// Calibration (home-then-center) in flight.
    pub fn is_calibrating(&self) -> bool {
        self.calibrating
    }

    /// Split-homing sequence in flight.
    pub fn is_split_homing(&self) -> bool {
        self.split != SplitPhase::Inactive
    }

    /// Snapshot every joint.
    pub fn statuses(&self) -> [JointStatus; 6] {
        [
            self.joints[0].status(),
            self.joints[1].status(),
            self.joints[2].status(),
            self.joints[3].status(),
            self.joints[4].status(),
            self.joints[5].status(),
        ]
    }

    /// Current limit adjustments in slot order.
    pub fn limit_adjustments(&self) -> [f32; 6] {
        let mut out = [0.0; 6];
        for (i, joint) in self.joints.iter().enumerate() {
            out[i] = joint.geometry().limit_adjustment().0;
        }
        out
    }

    /// Drain queued outward events.
    pub fn take_events(&mut self) -> heapless::Vec<ArmEvent, 32> {
        mem::take(&mut self.outbox)
    }

    // ---- per-joint operations --------------------------------------------

    /// Home one joint.
    pub fn home_joint(&mut self, id: JointId) -> Result<()> {
        let signal = self.joints[id.index()].go_home(&mut self.driver)?;
        if let JointSignal::Homing(id) = signal {
            Self::push_event(&mut self.outbox, ArmEvent::JointHoming(id));
        }
        Ok(())
    }

    /// Move one joint to an absolute angle.
    pub fn set_joint_position(
        &mut self,
        id: JointId,
        angle: Degrees,
        speed: Option<f32>,
        now_ms: u64,
    ) -> Result<()> {
        self.joints[id.index()].set_position(&mut self.driver, angle, speed, None, now_ms)?;
        self.moving = true;
        Ok(())
    }

    /// Enable one joint's motor.
    pub fn enable_joint(&mut self, id: JointId) -> Result<()> {
        self.joints[id.index()].enable(&mut self.driver)
    }

    /// Disable one joint's motor. The joint must re-home before moving again.
    pub fn disable_joint(&mut self, id: JointId) -> Result<()> {
        self.joints[id.index()].disable(&mut self.driver)
    }

    /// Redefine one joint's current pose as step zero.
    pub fn zero_joint(&mut self, id: JointId) -> Result<()> {
        self.joints[id.index()].zero(&mut self.driver)
    }

    /// Clear one joint's recorded fault.
    pub fn reset_joint_errors(&mut self, id: JointId) {
        self.joints[id.index()].reset_errors();
    }

    /// Update one joint's limit adjustment, recomputing its zero offset.
    /// Persisting the new value is the caller's business.
    pub fn set_limit_adjustment(&mut self, id: JointId, adjustment: Degrees) {
        self.joints[id.index()].set_limit_adjustment(adjustment);
    }

    /// Ask the driver for an encoder sweep. Positions come back as
    /// [`DriverEvent::EncoderReport`] events on the next loop turns.
    pub fn poll_encoders(&mut self) {
        if self.driver.report_encoders().is_err() {
            warn!("encoder sweep request failed");
        }
    }

    // ---- whole-arm sequences ---------------------------------------------

    /// Home every joint, deferring the designated one by a fixed delay so
    /// its trailing cable clears the switch.
    pub fn robot_home(&mut self, now_ms: u64) -> Result<()> {
        info!("arm homing, {} deferred", self.deferred);
        self.homing = true;
        for id in JointId::ALL {
            if id == self.deferred {
                continue;
            }
            if let Err(e) = self.home_joint(id) {
                warn!("arm homing: {}", e);
            }
        }
        self.schedule(now_ms + DEFERRED_HOME_DELAY_MS, TimerAction::HomeDeferred);
        Ok(())
    }

    /// Split homing: home all but the deferred joint, center them, then home
    /// and center the deferred joint once the others are out of its way.
    pub fn robot_split_home(&mut self, now_ms: u64) -> Result<()> {
        info!("arm split homing");
        self.split = SplitPhase::HomingOthers;
        for id in JointId::ALL {
            if id == self.deferred {
                continue;
            }
            if let Err(e) = self.home_joint(id) {
                warn!("split homing: {}", e);
            }
        }
        self.advance_split(now_ms);
        Ok(())
    }

    /// Home everything, then center automatically after a settle delay.
    pub fn robot_calibrate(&mut self, now_ms: u64) -> Result<()> {
        info!("arm calibrating");
        self.calibrating = true;
        self.robot_home(now_ms)
    }

    /// Move every joint to logical zero.
    pub fn robot_center(&mut self, now_ms: u64) -> Result<()> {
        for joint in self.joints.iter_mut() {
            if let Err(e) = joint.center(&mut self.driver, now_ms) {
                warn!("centering: {}", e);
            }
        }
        self.moving = self.any_moving();
        Ok(())
    }

    /// Stop every joint immediately without disabling.
    pub fn robot_freeze(&mut self) -> Result<()> {
        for joint in self.joints.iter_mut() {
            if let Err(e) = joint.freeze(&mut self.driver) {
                warn!("freeze: {}", e);
            }
        }
        self.moving = false;
        Ok(())
    }

    /// Disable every joint. Motion is not trusted again until re-homed.
    pub fn robot_stop(&mut self) -> Result<()> {
        info!("arm stopped");
        for joint in self.joints.iter_mut() {
            if let Err(e) = joint.disable(&mut self.driver) {
                warn!("stop: {}", e);
            }
        }
        self.stopped = true;
        Ok(())
    }

    /// Re-enable every joint after a stop.
    pub fn robot_enable(&mut self) -> Result<()> {
        for joint in self.joints.iter_mut() {
            if let Err(e) = joint.enable(&mut self.driver) {
                warn!("enable: {}", e);
            }
        }
        self.stopped = false;
        Ok(())
    }

    /// Synchronized whole-arm move: all accepted axes start together and
    /// finish together.
    ///
    /// Per-axis rejection (unhomed joint, out-of-bounds target, solved
    /// speed/acceleration at a hard ceiling) is non-atomic: the remaining
    /// axes still move.
    pub fn set_arm_positions(
        &mut self,
        degrees: [Degrees; 6],
        speed: Option<f32>,
        now_ms: u64,
    ) -> Result<()> {
        let mut requests: heapless::Vec<AxisRequest, 6> = heapless::Vec::new();
        for id in JointId::ALL {
            let angle = degrees[id.index()];
            let joint = &mut self.joints[id.index()];
            if let Err(e) = joint.check_move(angle) {
                warn!("arm move: {}", e);
                continue;
            }
            let geometry = joint.geometry();
            let _ = requests.push(AxisRequest {
                joint: id,
                current_steps: joint.step_position(),
                target_steps: geometry.degrees_to_steps(angle).0,
                max_speed: geometry.max_speed,
                max_accel: geometry.max_accel,
            });
        }

        let plan = plan_synchronized(&requests, speed);
        debug!(
            "arm move: {} axes over {:.3}s, {} rejected",
            plan.commands.len(),
            plan.duration,
            plan.rejected.len()
        );

        for command in &plan.commands {
            let joint = &mut self.joints[command.joint.index()];
            if let Err(e) = joint.set_position(
                &mut self.driver,
                degrees[command.joint.index()],
                Some(command.speed),
                Some(command.acceleration),
                now_ms,
            ) {
                warn!("arm move: {}", e);
            }
        }

        self.moving = self.any_moving();
        Ok(())
    }

    // ---- event loop -------------------------------------------------------

    /// Route a driver event to its joint and advance sequences.
    pub fn handle_event(&mut self, event: DriverEvent, now_ms: u64) {
        let channel = event.channel();
        let Some(index) = self.joints.iter().position(|j| j.channel() == channel) else {
            warn!("event for unknown channel {}", channel);
            return;
        };

        let signal = match event {
            DriverEvent::MoveComplete { actual_steps, .. } => {
                self.joints[index].on_move_complete(actual_steps, now_ms)
            }
            DriverEvent::LimitEdge { .. } => {
                self.joints[index].on_limit_edge(&mut self.driver, now_ms)
            }
            DriverEvent::EncoderReport { position, .. } => {
                self.joints[index].on_encoder_report(position);
                None
            }
        };

        if let Some(signal) = signal {
            self.process_signal(signal, now_ms);
        }
    }

    /// Advance timers and per-joint deadlines. Call periodically with a
    /// monotonic millisecond clock.
    pub fn tick(&mut self, now_ms: u64) {
        for index in 0..self.joints.len() {
            if let Some(signal) = self.joints[index].tick(now_ms) {
                self.process_signal(signal, now_ms);
            }
        }

        let mut due: heapless::Vec<TimerAction, 8> = heapless::Vec::new();
        let mut i = 0;
        while i < self.timers.len() {
            if self.timers[i].due_ms <= now_ms {
                let timer = self.timers.swap_remove(i);
                let _ = due.push(timer.action);
            } else {
                i += 1;
            }
        }

        for action in due {
            match action {
                TimerAction::HomeDeferred => {
                    debug!("deferred joint {} starts homing", self.deferred);
                    if let Err(e) = self.home_joint(self.deferred) {
                        warn!("deferred homing: {}", e);
                    }
                }
                TimerAction::CalibrateCenter => {
                    info!("calibration settle elapsed, centering");
                    if let Err(e) = self.robot_center(now_ms) {
                        warn!("calibration centering: {}", e);
                    }
                }
            }
        }
    }

    // ---- internals --------------------------------------------------------

    fn schedule(&mut self, due_ms: u64, action: TimerAction) {
        if self.timers.push(Timer { due_ms, action }).is_err() {
            warn!("timer queue full, dropping {:?}", action);
        }
    }

    fn has_timer(&self, action: TimerAction) -> bool {
        self.timers.iter().any(|t| t.action == action)
    }

    fn push_event(outbox: &mut heapless::Vec<ArmEvent, 32>, event: ArmEvent) {
        if outbox.push(event).is_err() {
            warn!("event outbox full, dropping {:?}", event);
        }
    }

    fn process_signal(&mut self, signal: JointSignal, now_ms: u64) {
        match signal {
            JointSignal::Ready(id) => {
                Self::push_event(&mut self.outbox, ArmEvent::JointReady(id));
                if self.ready() {
                    Self::push_event(&mut self.outbox, ArmEvent::ArmReady);
                }
            }
            JointSignal::Homing(id) => {
                Self::push_event(&mut self.outbox, ArmEvent::JointHoming(id));
            }
            JointSignal::Home(id) => {
                Self::push_event(&mut self.outbox, ArmEvent::JointHome(id));
                self.after_home_progress(now_ms);
            }
            JointSignal::Moved(id) => {
                Self::push_event(&mut self.outbox, ArmEvent::JointMoved(id));
                self.after_move_progress(now_ms);
            }
            JointSignal::Fault(id, fault) => {
                Self::push_event(&mut self.outbox, ArmEvent::JointFault(id, fault));
            }
        }
    }

    fn others_home(&self) -> bool {
        self.joints
            .iter()
            .filter(|j| j.id() != self.deferred)
            .all(|j| j.is_home())
    }

    fn others_idle(&self) -> bool {
        self.joints
            .iter()
            .filter(|j| j.id() != self.deferred)
            .all(|j| !j.is_moving())
    }

    fn after_home_progress(&mut self, now_ms: u64) {
        if self.home() {
            self.homing = false;
            info!("arm home");
            Self::push_event(&mut self.outbox, ArmEvent::ArmHome);
            if self.calibrating {
                self.schedule(now_ms + CALIBRATE_SETTLE_MS, TimerAction::CalibrateCenter);
            }
        }
        self.advance_split(now_ms);
    }

    fn after_move_progress(&mut self, now_ms: u64) {
        if !self.any_moving() {
            if self.moving {
                self.moving = false;
                Self::push_event(&mut self.outbox, ArmEvent::ArmMoved);
            }
            if self.calibrating
                && !self.homing
                && !self.has_timer(TimerAction::CalibrateCenter)
            {
                self.calibrating = false;
                info!("calibration complete");
            }
        }
        self.advance_split(now_ms);
    }

    fn advance_split(&mut self, now_ms: u64) {
        match self.split {
            SplitPhase::Inactive => {}
            SplitPhase::HomingOthers => {
                if self.others_home() {
                    info!("split homing: centering the other joints");
                    self.split = SplitPhase::CenteringOthers;
                    for id in JointId::ALL {
                        if id == self.deferred {
                            continue;
                        }
                        let joint = &mut self.joints[id.index()];
                        if let Err(e) = joint.center(&mut self.driver, now_ms) {
                            warn!("split centering: {}", e);
                        }
                    }
                    self.moving = self.any_moving();
                }
            }
            SplitPhase::CenteringOthers => {
                if self.others_idle() {
                    info!("split homing: homing deferred joint {}", self.deferred);
                    self.split = SplitPhase::HomingDeferred;
                    if let Err(e) = self.home_joint(self.deferred) {
                        warn!("split homing: {}", e);
                        self.split = SplitPhase::Inactive;
                    }
                }
            }
            SplitPhase::HomingDeferred => {
                if self.joints[self.deferred.index()].is_home() {
                    self.split = SplitPhase::CenteringDeferred;
                    let index = self.deferred.index();
                    if let Err(e) = self.joints[index].center(&mut self.driver, now_ms) {
                        warn!("split centering: {}", e);
                        self.split = SplitPhase::Inactive;
                    }
                    self.moving = self.any_moving();
                }
            }
            SplitPhase::CenteringDeferred => {
                if !self.joints[self.deferred.index()].is_moving() {
                    info!("split homing complete");
                    self.split = SplitPhase::Inactive;
                }
            }
        }
    }
}
