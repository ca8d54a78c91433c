//! The per-joint motion state machine.
//!
//! One [`Joint`] owns the bookkeeping for a single stepper axis: homing,
//! motion, enable state and the limit-switch safety interlock. It never
//! talks to hardware directly; every operation borrows the shared
//! [`StepDriver`] and every asynchronous outcome arrives as a driver event
//! routed in by the coordinator.

use log::{debug, error, info, warn};

use crate::config::units::Degrees;
use crate::config::{JointConfig, JointGeometry, JointId};
use crate::driver::{ChannelConfig, StepDriver};
use crate::error::{Error, JointError, Result};

use super::state::{JointFault, JointSignal, JointStatus};

/// Reduced speed for homing sweeps, steps per second.
pub const HOMING_SPEED_STEPS_PER_SEC: f32 = 500.0;

/// How long after a homing move's completion the switch may still report in,
/// before the sweep is declared failed.
pub const HOMING_GRACE_MS: u64 = 500;

/// How long after departing the switch the `home` flag is held, absorbing
/// sensor bounce while the joint physically leaves it.
pub const DEPART_GRACE_MS: u64 = 500;

/// State machine for one stepper axis.
pub struct Joint {
    id: JointId,
    config: JointConfig,
    geometry: JointGeometry,

    ready: bool,
    enabled: bool,
    homing: bool,
    home: bool,
    homed: bool,
    moving: bool,

    step_position: i64,
    encoder_position: i64,
    fault: Option<JointFault>,

    /// When set, `home` clears at this time (bounce absorption after departure).
    depart_deadline: Option<u64>,
    /// When set, a finished homing sweep is waiting for a late switch edge.
    nohome_deadline: Option<u64>,
}

impl Joint {
    /// Create a joint from its configuration. Call [`Joint::start`] exactly
    /// once before issuing any other operation.
    pub fn new(id: JointId, config: JointConfig) -> Self {
        let geometry = JointGeometry::from_config(&config);
        Self {
            id,
            config,
            geometry,
            ready: false,
            enabled: false,
            homing: false,
            home: false,
            homed: false,
            moving: false,
            step_position: 0,
            encoder_position: 0,
            fault: None,
            depart_deadline: None,
            nohome_deadline: None,
        }
    }

    /// Joint id.
    #[inline]
    pub fn id(&self) -> JointId {
        self.id
    }

    /// Driver channel index.
    #[inline]
    pub fn channel(&self) -> u8 {
        self.config.channel
    }

    /// Derived geometry.
    #[inline]
    pub fn geometry(&self) -> &JointGeometry {
        &self.geometry
    }

    /// Whether a move or homing sweep is in flight.
    #[inline]
    pub fn is_moving(&self) -> bool {
        self.moving
    }

    /// Whether the joint sits at its homed reference.
    #[inline]
    pub fn is_home(&self) -> bool {
        self.home
    }

    /// Whether the joint has homed since its last disable.
    #[inline]
    pub fn is_homed(&self) -> bool {
        self.homed
    }

    /// Whether the joint is in a homing sweep.
    #[inline]
    pub fn is_homing(&self) -> bool {
        self.homing
    }

    /// Whether the joint has been started.
    #[inline]
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Authoritative position in absolute steps.
    #[inline]
    pub fn step_position(&self) -> i64 {
        self.step_position
    }

    /// Snapshot for the remote boundary.
    pub fn status(&self) -> JointStatus {
        JointStatus {
            id: self.id,
            ready: self.ready,
            enabled: self.enabled,
            homing: self.homing,
            home: self.home,
            homed: self.homed,
            moving: self.moving,
            step_position: self.step_position,
            encoder_position: self.encoder_position,
            fault: self.fault,
        }
    }

    /// Arm the driver channel and install safety subscriptions.
    ///
    /// Transitions the joint to ready. Not idempotent: the limit subscription
    /// is installed once, so call exactly once.
    pub fn start<D: StepDriver>(&mut self, driver: &mut D) -> Result<JointSignal> {
        let channel = self.config.channel;
        let pins = ChannelConfig {
            step_pin: self.config.step_pin,
            dir_pin: self.config.dir_pin,
            enable_pin: self.config.enable_pin,
            invert: self.config.invert_direction,
        };

        driver
            .configure(channel, &pins)
            .map_err(|_| Error::Joint(JointError::Driver(self.id)))?;
        driver
            .enable(channel, true)
            .map_err(|_| Error::Joint(JointError::Driver(self.id)))?;
        driver
            .attach_encoder(channel, self.config.encoder_pin_a, self.config.encoder_pin_b)
            .map_err(|_| Error::Joint(JointError::Driver(self.id)))?;
        driver
            .watch_limit(channel, self.config.limit_pin)
            .map_err(|_| Error::Joint(JointError::Driver(self.id)))?;

        self.enabled = true;
        self.ready = true;
        info!("joint {} ready on channel {}", self.id, channel);
        Ok(JointSignal::Ready(self.id))
    }

    /// Begin a homing sweep toward the limit switch.
    ///
    /// Rejects with `DoubleHome` when already home. The sweep runs at reduced
    /// speed for a bounded step budget; the switch edge is the success path.
    pub fn go_home<D: StepDriver>(&mut self, driver: &mut D) -> Result<JointSignal> {
        if !self.ready {
            return Err(Error::Joint(JointError::NotReady(self.id)));
        }
        if self.home {
            self.fault = Some(JointFault::DoubleHome);
            warn!("joint {} is already home", self.id);
            return Err(Error::Joint(JointError::DoubleHome(self.id)));
        }
        if self.moving {
            return Err(Error::Joint(JointError::MoveInFlight(self.id)));
        }

        self.homing = true;
        self.moving = true;
        self.nohome_deadline = None;

        let channel = self.config.channel;
        let travel = self.geometry.homing_travel_steps * self.geometry.homing_dir as i64;
        driver
            .set_speed(channel, HOMING_SPEED_STEPS_PER_SEC)
            .map_err(|_| Error::Joint(JointError::Driver(self.id)))?;
        driver
            .move_by(channel, travel)
            .map_err(|_| Error::Joint(JointError::Driver(self.id)))?;

        info!("joint {} homing, budget {} steps", self.id, travel);
        Ok(JointSignal::Homing(self.id))
    }

    /// Validate a position target without issuing a move.
    ///
    /// Records rejection faults exactly as [`Joint::set_position`] would, so
    /// the coordinator can pre-screen the axes of a synchronized move.
    pub fn check_move(&mut self, angle: Degrees) -> Result<()> {
        if !self.ready {
            return Err(Error::Joint(JointError::NotReady(self.id)));
        }
        if self.moving {
            return Err(Error::Joint(JointError::MoveInFlight(self.id)));
        }
        if !self.homed {
            self.fault = Some(JointFault::NeverHomed);
            return Err(Error::Joint(JointError::NeverHomed(self.id)));
        }
        if !self.geometry.limits.contains(angle) {
            self.fault = Some(JointFault::OutOfBounds);
            return Err(Error::Joint(JointError::OutOfBounds {
                joint: self.id,
                requested: angle.0,
                lim_pos: self.geometry.limits.pos.0,
                lim_neg: self.geometry.limits.neg.0,
            }));
        }
        Ok(())
    }

    /// Move to an absolute angle from logical zero.
    ///
    /// Speed and acceleration default to the joint's maxima. A synchronized
    /// move may pass solved values above a joint's nominal maximum; only the
    /// planner's hard ceilings bound them. The `home` flag is held for a
    /// short grace period after departure to absorb switch bounce.
    pub fn set_position<D: StepDriver>(
        &mut self,
        driver: &mut D,
        angle: Degrees,
        speed: Option<f32>,
        accel: Option<f32>,
        now_ms: u64,
    ) -> Result<()> {
        self.check_move(angle)?;

        let speed = speed.unwrap_or(self.geometry.max_speed);
        let accel = accel.unwrap_or(self.geometry.max_accel);
        let target = self.geometry.degrees_to_steps(angle);

        if self.home {
            self.depart_deadline = Some(now_ms + DEPART_GRACE_MS);
        }
        self.moving = true;

        let channel = self.config.channel;
        driver
            .set_speed(channel, speed)
            .map_err(|_| Error::Joint(JointError::Driver(self.id)))?;
        driver
            .set_acceleration(channel, accel)
            .map_err(|_| Error::Joint(JointError::Driver(self.id)))?;
        driver
            .move_to(channel, target.0)
            .map_err(|_| Error::Joint(JointError::Driver(self.id)))?;

        debug!(
            "joint {} -> {}° ({} steps) at {} steps/s",
            self.id, angle.0, target.0, speed
        );
        Ok(())
    }

    /// Move to logical zero.
    pub fn center<D: StepDriver>(&mut self, driver: &mut D, now_ms: u64) -> Result<()> {
        self.set_position(driver, Degrees(0.0), None, None, now_ms)
    }

    /// Drive the enable line on. Does not restore `homed`.
    pub fn enable<D: StepDriver>(&mut self, driver: &mut D) -> Result<()> {
        driver
            .enable(self.config.channel, true)
            .map_err(|_| Error::Joint(JointError::Driver(self.id)))?;
        self.enabled = true;
        Ok(())
    }

    /// Drive the enable line off.
    ///
    /// A disabled motor can be back-driven, so the homed reference is no
    /// longer trustworthy: the joint must re-home before it will move again.
    pub fn disable<D: StepDriver>(&mut self, driver: &mut D) -> Result<()> {
        driver
            .enable(self.config.channel, false)
            .map_err(|_| Error::Joint(JointError::Driver(self.id)))?;
        self.enabled = false;
        self.homed = false;
        self.home = false;
        Ok(())
    }

    /// Immediate stop without disabling. The stopped move's completion event
    /// still arrives later and records wherever the joint came to rest.
    pub fn freeze<D: StepDriver>(&mut self, driver: &mut D) -> Result<()> {
        driver
            .stop(self.config.channel)
            .map_err(|_| Error::Joint(JointError::Driver(self.id)))?;
        self.moving = false;
        Ok(())
    }

    /// Redefine the current physical pose as step zero.
    ///
    /// Recovery/debug path: bypasses the homed check and re-arms motion from
    /// the new reference.
    pub fn zero<D: StepDriver>(&mut self, driver: &mut D) -> Result<()> {
        let channel = self.config.channel;
        driver
            .zero(channel)
            .map_err(|_| Error::Joint(JointError::Driver(self.id)))?;
        driver
            .reset_encoder(channel)
            .map_err(|_| Error::Joint(JointError::Driver(self.id)))?;
        self.step_position = 0;
        self.encoder_position = 0;
        self.homed = true;
        self.home = false;
        info!("joint {} zeroed at current pose", self.id);
        Ok(())
    }

    /// Clear the recorded fault. Does not change any other state.
    pub fn reset_errors(&mut self) {
        self.fault = None;
    }

    /// Update the limit adjustment and recompute the zero offset.
    pub fn set_limit_adjustment(&mut self, adjustment: Degrees) {
        self.geometry.set_limit_adjustment(adjustment);
        debug!(
            "joint {} limit adjustment {}°, zero step {}",
            self.id,
            adjustment.0,
            self.geometry.zero_step()
        );
    }

    /// Handle a limit-switch edge on this joint's channel.
    pub fn on_limit_edge<D: StepDriver>(
        &mut self,
        driver: &mut D,
        _now_ms: u64,
    ) -> Option<JointSignal> {
        let channel = self.config.channel;

        if self.homing {
            // Success path: the switch is the homed reference.
            if driver.stop(channel).is_err()
                || driver.zero(channel).is_err()
                || driver.reset_encoder(channel).is_err()
            {
                warn!("joint {} driver fault while latching home", self.id);
            }
            self.step_position = 0;
            self.encoder_position = 0;
            self.home = true;
            self.homed = true;
            self.homing = false;
            self.moving = false;
            self.nohome_deadline = None;
            info!("joint {} is home", self.id);
            return Some(JointSignal::Home(self.id));
        }

        if self.home {
            // Bounce while sitting on (or just leaving) the switch.
            debug!("joint {} switch bounce ignored", self.id);
            return None;
        }

        // Unsolicited trip: the joint was driven into its end-stop.
        error!("joint {} hit its end-stop, disabling", self.id);
        if driver.zero(channel).is_err() || driver.enable(channel, false).is_err() {
            warn!("joint {} driver fault during end-stop shutdown", self.id);
        }
        self.enabled = false;
        self.homed = false;
        self.moving = false;
        self.homing = false;
        self.step_position = 0;
        self.fault = Some(JointFault::Limit);
        Some(JointSignal::Fault(self.id, JointFault::Limit))
    }

    /// Handle a move-completion event on this joint's channel.
    ///
    /// The driver's reported position is authoritative, including for moves
    /// that were stopped part-way.
    pub fn on_move_complete(&mut self, actual_steps: i64, now_ms: u64) -> Option<JointSignal> {
        self.step_position = actual_steps;

        // Completion is proof of departure; don't wait out the grace timer.
        if self.depart_deadline.take().is_some() {
            self.home = false;
        }

        if self.homing {
            // The bounded sweep ran out without a switch edge (yet). The
            // switch may still report in as the joint settles, so hold the
            // verdict for a grace window.
            self.moving = false;
            self.nohome_deadline = Some(now_ms + HOMING_GRACE_MS);
            return None;
        }

        if self.moving {
            self.moving = false;
            debug!("joint {} move complete at {} steps", self.id, actual_steps);
            return Some(JointSignal::Moved(self.id));
        }

        // Tail completion of a stopped move; position already recorded.
        None
    }

    /// Record an advisory encoder report. Never touches `step_position`.
    pub fn on_encoder_report(&mut self, position: i64) {
        self.encoder_position = position;
    }

    /// Advance time-based state. Call periodically with a monotonic
    /// millisecond clock.
    pub fn tick(&mut self, now_ms: u64) -> Option<JointSignal> {
        if let Some(deadline) = self.depart_deadline {
            if now_ms >= deadline {
                self.depart_deadline = None;
                self.home = false;
            }
        }

        if let Some(deadline) = self.nohome_deadline {
            if now_ms >= deadline {
                self.nohome_deadline = None;
                if self.homing && !self.home {
                    self.homing = false;
                    self.fault = Some(JointFault::NoHome);
                    error!("joint {} found no switch within its travel budget", self.id);
                    return Some(JointSignal::Fault(self.id, JointFault::NoHome));
                }
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ArmConfig;
    use crate::driver::MockDriver;

    fn make_joint(id: JointId) -> Joint {
        let config = ArmConfig::igus_default();
        Joint::new(id, config.joint(id).unwrap().clone())
    }

    fn started_joint(id: JointId, driver: &mut MockDriver) -> Joint {
        let mut joint = make_joint(id);
        joint.start(driver).unwrap();
        joint
    }

    fn homed_joint(id: JointId, driver: &mut MockDriver) -> Joint {
        let mut joint = started_joint(id, driver);
        joint.go_home(driver).unwrap();
        let signal = joint.on_limit_edge(driver, 0);
        assert_eq!(signal, Some(JointSignal::Home(id)));
        joint
    }

    #[test]
    fn test_set_position_rejects_never_homed() {
        let mut driver = MockDriver::new();
        let mut joint = started_joint(JointId::J0, &mut driver);

        let result = joint.set_position(&mut driver, Degrees(10.0), None, None, 0);
        assert!(matches!(
            result,
            Err(Error::Joint(JointError::NeverHomed(JointId::J0)))
        ));
        assert_eq!(joint.status().fault, Some(JointFault::NeverHomed));
        assert_eq!(driver.moves_issued(0), 0);
    }

    #[test]
    fn test_set_position_rejects_out_of_bounds() {
        let mut driver = MockDriver::new();
        // J1 travels [-42, +90]
        let mut joint = homed_joint(JointId::J1, &mut driver);
        let issued_during_homing = driver.moves_issued(1);

        for bad in [91.0, -43.0, 500.0] {
            let result = joint.set_position(&mut driver, Degrees(bad), None, None, 0);
            assert!(matches!(
                result,
                Err(Error::Joint(JointError::OutOfBounds { .. }))
            ));
        }
        assert_eq!(joint.status().fault, Some(JointFault::OutOfBounds));
        assert_eq!(driver.moves_issued(1), issued_during_homing);
    }

    #[test]
    fn test_double_home_rejected_without_driver_move() {
        let mut driver = MockDriver::new();
        let mut joint = homed_joint(JointId::J2, &mut driver);
        let issued = driver.moves_issued(2);

        let result = joint.go_home(&mut driver);
        assert!(matches!(
            result,
            Err(Error::Joint(JointError::DoubleHome(JointId::J2)))
        ));
        assert_eq!(joint.status().fault, Some(JointFault::DoubleHome));
        assert_eq!(driver.moves_issued(2), issued);
    }

    #[test]
    fn test_disable_clears_homed_until_rehome() {
        let mut driver = MockDriver::new();
        let mut joint = homed_joint(JointId::J0, &mut driver);
        assert!(joint.is_homed());

        joint.disable(&mut driver).unwrap();
        assert!(!joint.is_homed());
        assert!(!driver.is_enabled(0));

        joint.enable(&mut driver).unwrap();
        assert!(!joint.is_homed(), "enable must not restore the reference");

        joint.go_home(&mut driver).unwrap();
        joint.on_limit_edge(&mut driver, 0);
        assert!(joint.is_homed());
    }

    #[test]
    fn test_homing_success_zeros_everything() {
        let mut driver = MockDriver::new();
        let mut joint = started_joint(JointId::J3, &mut driver);

        joint.go_home(&mut driver).unwrap();
        assert!(joint.is_homing());
        assert!(joint.is_moving());
        assert!((driver.speed_of(3) - HOMING_SPEED_STEPS_PER_SEC).abs() < 0.001);

        let signal = joint.on_limit_edge(&mut driver, 100);
        assert_eq!(signal, Some(JointSignal::Home(JointId::J3)));

        let status = joint.status();
        assert!(status.home && status.homed);
        assert!(!status.homing && !status.moving);
        assert_eq!(status.step_position, 0);
        assert!(driver.was_stopped(3));
    }

    #[test]
    fn test_homing_budget_exhausted_faults_nohome() {
        let mut driver = MockDriver::new();
        let mut joint = started_joint(JointId::J4, &mut driver);
        joint.go_home(&mut driver).unwrap();

        // Sweep finishes with no switch edge
        let ev_pos = -joint.geometry().homing_travel_steps;
        assert_eq!(joint.on_move_complete(ev_pos, 1_000), None);
        assert!(joint.is_homing(), "verdict held for the grace window");

        // Nothing yet inside the window
        assert_eq!(joint.tick(1_000 + HOMING_GRACE_MS - 1), None);

        let signal = joint.tick(1_000 + HOMING_GRACE_MS);
        assert_eq!(
            signal,
            Some(JointSignal::Fault(JointId::J4, JointFault::NoHome))
        );
        let status = joint.status();
        assert!(status.enabled, "NOHOME leaves the joint enabled");
        assert!(!status.homed && !status.homing);
    }

    #[test]
    fn test_late_switch_edge_inside_grace_still_homes() {
        let mut driver = MockDriver::new();
        let mut joint = started_joint(JointId::J4, &mut driver);
        joint.go_home(&mut driver).unwrap();

        joint.on_move_complete(-9000, 1_000);
        let signal = joint.on_limit_edge(&mut driver, 1_100);
        assert_eq!(signal, Some(JointSignal::Home(JointId::J4)));

        // The abandoned verdict never fires
        assert_eq!(joint.tick(10_000), None);
        assert!(joint.status().fault.is_none());
    }

    #[test]
    fn test_unsolicited_limit_edge_is_a_crash_trip() {
        let mut driver = MockDriver::new();
        let mut joint = homed_joint(JointId::J1, &mut driver);

        // Move away and let home clear
        joint
            .set_position(&mut driver, Degrees(45.0), None, None, 2_000)
            .unwrap();
        let ev = driver.complete_move(1);
        if let crate::driver::DriverEvent::MoveComplete { actual_steps, .. } = ev {
            joint.on_move_complete(actual_steps, 2_050);
        }
        assert!(!joint.is_home());

        let signal = joint.on_limit_edge(&mut driver, 3_000);
        assert_eq!(
            signal,
            Some(JointSignal::Fault(JointId::J1, JointFault::Limit))
        );
        let status = joint.status();
        assert!(!status.enabled);
        assert_eq!(status.step_position, 0);
        assert_eq!(status.fault, Some(JointFault::Limit));
        assert!(!driver.is_enabled(1));
    }

    #[test]
    fn test_set_position_targets_absolute_steps() {
        let mut driver = MockDriver::new();
        let mut joint = homed_joint(JointId::J0, &mut driver);

        joint
            .set_position(&mut driver, Degrees(90.0), Some(800.0), None, 0)
            .unwrap();
        assert!(joint.is_moving());

        let expected = (90.0 * 44.444_443f32) as i64 + joint.geometry().zero_step();
        assert_eq!(driver.last_move_target(0), Some(expected));
        assert!((driver.speed_of(0) - 800.0).abs() < 0.001);

        let ev = driver.complete_move(0);
        if let crate::driver::DriverEvent::MoveComplete { actual_steps, .. } = ev {
            let signal = joint.on_move_complete(actual_steps, 100);
            assert_eq!(signal, Some(JointSignal::Moved(JointId::J0)));
        }
        assert!(!joint.is_moving());
        assert_eq!(joint.step_position(), expected);
    }

    #[test]
    fn test_speed_defaults_to_joint_maxima() {
        let mut driver = MockDriver::new();
        let mut joint = homed_joint(JointId::J5, &mut driver);

        joint
            .set_position(&mut driver, Degrees(10.0), None, None, 0)
            .unwrap();
        assert!((driver.speed_of(5) - joint.geometry().max_speed).abs() < 0.001);
        assert!((driver.accel_of(5) - joint.geometry().max_accel).abs() < 0.001);
    }

    #[test]
    fn test_home_flag_survives_depart_grace_then_clears() {
        let mut driver = MockDriver::new();
        let mut joint = homed_joint(JointId::J2, &mut driver);

        joint
            .set_position(&mut driver, Degrees(-30.0), None, None, 5_000)
            .unwrap();
        assert!(joint.is_home(), "grace window holds the flag");

        // Switch bounce right after departure is absorbed, not a fault
        assert_eq!(joint.on_limit_edge(&mut driver, 5_100), None);
        assert!(joint.status().fault.is_none());

        joint.tick(5_000 + DEPART_GRACE_MS);
        assert!(!joint.is_home());
    }

    #[test]
    fn test_overlapping_move_rejected() {
        let mut driver = MockDriver::new();
        let mut joint = homed_joint(JointId::J0, &mut driver);

        joint
            .set_position(&mut driver, Degrees(20.0), None, None, 0)
            .unwrap();
        let issued = driver.moves_issued(0);

        let result = joint.set_position(&mut driver, Degrees(40.0), None, None, 10);
        assert!(matches!(
            result,
            Err(Error::Joint(JointError::MoveInFlight(JointId::J0)))
        ));
        assert!(joint.status().fault.is_none(), "contract error, not a fault");
        assert_eq!(driver.moves_issued(0), issued);
    }

    #[test]
    fn test_freeze_then_tail_completion_records_actual() {
        let mut driver = MockDriver::new();
        let mut joint = homed_joint(JointId::J3, &mut driver);

        joint
            .set_position(&mut driver, Degrees(100.0), None, None, 0)
            .unwrap();
        joint.freeze(&mut driver).unwrap();
        assert!(!joint.is_moving());
        assert!(driver.was_stopped(3));

        // Driver reports where the axis actually came to rest
        let signal = joint.on_move_complete(1234, 500);
        assert_eq!(signal, None, "frozen move's tail raises no Moved signal");
        assert_eq!(joint.step_position(), 1234);
    }

    #[test]
    fn test_homing_tail_completion_is_inert() {
        let mut driver = MockDriver::new();
        let mut joint = homed_joint(JointId::J2, &mut driver);

        // The stopped homing sweep's completion arrives after the zero
        let signal = joint.on_move_complete(0, 200);
        assert_eq!(signal, None);

        let status = joint.status();
        assert!(status.home && status.homed);
        assert_eq!(status.step_position, 0);
        assert!(!status.moving);
    }

    #[test]
    fn test_zero_bypasses_homed_check() {
        let mut driver = MockDriver::new();
        let mut joint = started_joint(JointId::J1, &mut driver);
        assert!(!joint.is_homed());

        joint.zero(&mut driver).unwrap();
        assert_eq!(joint.step_position(), 0);
        assert!(joint.is_homed(), "zeroing re-arms motion from the new origin");

        assert!(joint
            .set_position(&mut driver, Degrees(5.0), None, None, 0)
            .is_ok());
    }

    #[test]
    fn test_reset_errors_only_clears_fault() {
        let mut driver = MockDriver::new();
        let mut joint = started_joint(JointId::J0, &mut driver);

        let _ = joint.set_position(&mut driver, Degrees(10.0), None, None, 0);
        assert_eq!(joint.status().fault, Some(JointFault::NeverHomed));

        joint.reset_errors();
        assert!(joint.status().fault.is_none());
        assert!(!joint.is_homed(), "the underlying condition is not repaired");
    }

    #[test]
    fn test_encoder_report_is_advisory() {
        let mut driver = MockDriver::new();
        let mut joint = homed_joint(JointId::J0, &mut driver);

        joint.on_encoder_report(777);
        assert_eq!(joint.status().encoder_position, 777);
        assert_eq!(joint.step_position(), 0, "encoder never moves step_position");
    }
}
