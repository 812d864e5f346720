//! Reference scalar motion engine.
//!
//! Motor state lives in a pool owned by the engine; a [`ScalarMotor`] is a
//! slot index into that pool and returns the slot when dropped. The engine
//! advances every live motor once per frame. Single-threaded.

use std::cell::RefCell;
use std::rc::Rc;

use super::spline::{hermite, hermite_slope, Spline};
use super::{MotionHandle, MotionInit, MotionTime, SplinePlayback, Target1f};
use crate::config::Config;
use crate::range::normalize_angle;

/// Owns the motor pool and steps it.
#[derive(Debug)]
pub struct MotionEngine {
    pool: Rc<RefCell<MotorPool>>,
}

impl MotionEngine {
    pub fn new(cfg: &Config) -> Self {
        Self {
            pool: Rc::new(RefCell::new(MotorPool::with_capacity(cfg.motor_capacity))),
        }
    }

    /// Advance every live motor by `dt` ticks.
    pub fn advance_frame(&mut self, dt: MotionTime) {
        if dt <= 0 {
            return;
        }
        let mut pool = self.pool.borrow_mut();
        for motor in pool.motors.iter_mut().filter(|m| m.in_use) {
            motor.advance(dt as f32);
        }
    }

    /// Motors currently held by a handle.
    pub fn live_motors(&self) -> usize {
        self.pool.borrow().live
    }

    fn acquire(&self, init: &MotionInit) -> ScalarMotor {
        let index = self.pool.borrow_mut().acquire(init);
        ScalarMotor {
            pool: Rc::clone(&self.pool),
            index,
        }
    }
}

impl Default for MotionEngine {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

#[derive(Debug, Default)]
struct MotorPool {
    motors: Vec<MotorState>,
    free: Vec<usize>,
    live: usize,
}

impl MotorPool {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            motors: Vec::with_capacity(capacity),
            free: Vec::new(),
            live: 0,
        }
    }

    fn acquire(&mut self, init: &MotionInit) -> usize {
        self.live += 1;
        match self.free.pop() {
            Some(index) => {
                self.motors[index].reset(*init);
                index
            }
            None => {
                let mut state = MotorState::default();
                state.reset(*init);
                self.motors.push(state);
                self.motors.len() - 1
            }
        }
    }

    fn release(&mut self, index: usize) {
        if let Some(motor) = self.motors.get_mut(index) {
            if motor.in_use {
                motor.in_use = false;
                self.live -= 1;
                self.free.push(index);
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Drive {
    /// Resting at `value`.
    Hold,
    /// Hermite from the state at `set_target` time to the target node.
    Seek {
        from_value: f32,
        from_velocity: f32,
        to_value: f32,
        to_velocity: f32,
        duration: f32,
    },
    /// Blend into `spline` over `blend_x`, then sample it.
    Follow {
        start_x: f32,
        blend_x: f32,
        from_value: f32,
        from_velocity: f32,
    },
}

#[derive(Debug)]
struct MotorState {
    init: MotionInit,
    in_use: bool,
    value: f32,
    velocity: f32,
    /// Spline playback rate. Seeks always run in real ticks.
    rate: f32,
    /// Ticks since the current drive started; spline x units when following.
    elapsed: f32,
    drive: Drive,
    /// Reused between `set_spline` calls.
    spline: Option<Spline>,
}

impl Default for MotorState {
    fn default() -> Self {
        Self {
            init: MotionInit::default(),
            in_use: false,
            value: 0.0,
            velocity: 0.0,
            rate: 1.0,
            elapsed: 0.0,
            drive: Drive::Hold,
            spline: None,
        }
    }
}

impl MotorState {
    fn reset(&mut self, init: MotionInit) {
        self.init = init;
        self.in_use = true;
        self.value = init.range.clamp(0.0);
        self.velocity = 0.0;
        self.rate = 1.0;
        self.elapsed = 0.0;
        self.drive = Drive::Hold;
    }

    fn wrap(&self, value: f32) -> f32 {
        if self.init.modular {
            normalize_angle(value)
        } else {
            self.init.range.clamp(value)
        }
    }

    /// `to` shifted so that travelling from `from` takes the short way round.
    fn shortest(&self, from: f32, to: f32) -> f32 {
        if self.init.modular {
            from + normalize_angle(to - from)
        } else {
            to
        }
    }

    fn set_target(&mut self, target: &Target1f) {
        if let Some(current) = target.current {
            self.value = self.wrap(current.value);
            self.velocity = current.velocity;
            self.drive = Drive::Hold;
        }
        self.elapsed = 0.0;
        match target.target {
            Some(node) if node.time > 0 => {
                self.drive = Drive::Seek {
                    from_value: self.value,
                    from_velocity: self.velocity,
                    to_value: self.shortest(self.value, node.value),
                    to_velocity: node.velocity,
                    duration: node.time as f32,
                };
            }
            Some(node) => {
                self.value = self.wrap(node.value);
                self.velocity = node.velocity;
                self.drive = Drive::Hold;
            }
            None => {}
        }
    }

    fn set_spline(&mut self, spline: &Spline, playback: &SplinePlayback) {
        match self.spline.as_mut() {
            Some(owned) => owned.clone_from(spline),
            None => self.spline = Some(spline.clone()),
        }
        self.rate = playback.playback_rate;
        self.elapsed = 0.0;
        self.drive = Drive::Follow {
            start_x: playback.start_x,
            blend_x: playback.blend_x.max(0.0),
            from_value: self.value,
            from_velocity: self.velocity,
        };
        self.sample();
    }

    fn advance(&mut self, dt: f32) {
        let step = match self.drive {
            Drive::Follow { .. } => dt * self.rate,
            Drive::Hold | Drive::Seek { .. } => dt,
        };
        // A non-positive rate holds the spline in place; it never rewinds.
        self.elapsed = (self.elapsed + step).max(self.elapsed);
        self.sample();
    }

    /// Recompute value/velocity from the drive and `elapsed`.
    fn sample(&mut self) {
        match self.drive {
            Drive::Hold => {}
            Drive::Seek {
                from_value,
                from_velocity,
                to_value,
                to_velocity,
                duration,
            } => {
                if self.elapsed >= duration {
                    self.value = self.wrap(to_value);
                    self.velocity = to_velocity;
                    self.drive = Drive::Hold;
                    return;
                }
                let t = self.elapsed / duration;
                self.value = self.wrap(hermite(
                    from_value,
                    from_velocity,
                    to_value,
                    to_velocity,
                    duration,
                    t,
                ));
                self.velocity =
                    hermite_slope(from_value, from_velocity, to_value, to_velocity, duration, t);
            }
            Drive::Follow {
                start_x,
                blend_x,
                from_value,
                from_velocity,
            } => {
                let Some(spline) = self.spline.as_ref() else {
                    return;
                };
                let x = (start_x + self.elapsed).min(spline.end_x());
                if self.elapsed < blend_x {
                    let join_x = (start_x + blend_x).min(spline.end_x());
                    let join_y = spline.evaluate(join_x);
                    let join_slope = spline.derivative(join_x);
                    let from = self.shortest(join_y, from_value);
                    let t = self.elapsed / blend_x;
                    let value = hermite(from, from_velocity, join_y, join_slope, blend_x, t);
                    self.velocity =
                        hermite_slope(from, from_velocity, join_y, join_slope, blend_x, t);
                    self.value = self.wrap(value);
                } else {
                    self.value = self.wrap(spline.evaluate(x));
                    self.velocity = spline.derivative(x);
                }
            }
        }
    }

    fn target_value(&self) -> f32 {
        match self.drive {
            Drive::Hold => self.value,
            Drive::Seek { to_value, .. } => self.wrap(to_value),
            Drive::Follow { .. } => self
                .spline
                .as_ref()
                .map_or(self.value, |s| self.wrap(s.end_y())),
        }
    }

    fn time_remaining(&self) -> MotionTime {
        let ticks = match self.drive {
            Drive::Hold => 0.0,
            Drive::Seek { duration, .. } => duration - self.elapsed,
            Drive::Follow { start_x, .. } => {
                let remaining = self
                    .spline
                    .as_ref()
                    .map_or(0.0, |s| s.end_x() - (start_x + self.elapsed));
                if remaining <= 0.0 {
                    return 0;
                }
                if self.rate <= 0.0 {
                    // Frozen spline never arrives.
                    return MotionTime::MAX;
                }
                remaining / self.rate
            }
        };
        if ticks <= 0.0 {
            return 0;
        }
        ticks.ceil() as MotionTime
    }
}

/// Handle to one motor in a [`MotionEngine`].
#[derive(Debug)]
pub struct ScalarMotor {
    pool: Rc<RefCell<MotorPool>>,
    index: usize,
}

impl ScalarMotor {
    fn with_state<R>(&self, f: impl FnOnce(&MotorState) -> R) -> R {
        f(&self.pool.borrow().motors[self.index])
    }

    fn with_state_mut<R>(&mut self, f: impl FnOnce(&mut MotorState) -> R) -> R {
        f(&mut self.pool.borrow_mut().motors[self.index])
    }
}

impl MotionHandle for ScalarMotor {
    type Engine = MotionEngine;

    fn new(init: &MotionInit, engine: &MotionEngine) -> Self {
        engine.acquire(init)
    }

    fn set_target(&mut self, target: &Target1f) {
        self.with_state_mut(|m| m.set_target(target));
    }

    fn set_spline(&mut self, spline: &Spline, playback: &SplinePlayback) {
        self.with_state_mut(|m| m.set_spline(spline, playback));
    }

    fn set_playback_rate(&mut self, rate: f32) {
        self.with_state_mut(|m| m.rate = rate);
    }

    fn value(&self) -> f32 {
        self.with_state(|m| m.value)
    }

    fn velocity(&self) -> f32 {
        self.with_state(|m| m.velocity)
    }

    fn target_value(&self) -> f32 {
        self.with_state(MotorState::target_value)
    }

    fn time_remaining(&self) -> MotionTime {
        self.with_state(MotorState::time_remaining)
    }
}

impl Drop for ScalarMotor {
    fn drop(&mut self) {
        self.pool.borrow_mut().release(self.index);
    }
}
